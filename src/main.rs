use std::process::ExitCode;

use clap::Parser;
use fuse_settings::app::{init_logging, run, Cli};
use log::*;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
