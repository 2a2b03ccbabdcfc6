use std::path::PathBuf;

use anstyle::{AnsiColor, Effects};
use clap::{builder::Styles, ArgAction, Parser, Subcommand, ValueEnum};

use crate::core::{Machine, RomSpace};

/// Inspect and maintain the emulator settings store.
#[derive(Parser, Debug)]
#[command(name = "fuse-settings", version, about, long_about = None, styles = styles())]
pub struct Cli {
    /// Settings store to use instead of the default location
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
    /// Override a setting for this run, can be given more than once
    #[arg(
        short = 's',
        long = "set",
        value_name = "NAME=VALUE",
        value_parser = parse_override,
        global = true
    )]
    pub overrides: Vec<(String, String)>,
    /// Log more, repeat for even more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the effective value of every setting, or of a single one
    Show {
        /// Setting to print, command line spellings like `sound-freq` or `machine` work too
        name: Option<String>,
    },
    /// Print every setting with its type and built-in default
    Defaults,
    /// Write the effective settings to the store. The other commands never write it,
    /// even with `autosave_settings` on
    Write,
    /// Print the ROM held by a slot of one of the ROM tables
    Rom {
        #[arg(value_enum)]
        space: SpaceArg,
        index: usize,
    },
    /// Print the ROMs a machine loads, the start machine if none is given
    Roms {
        #[arg(value_parser = parse_machine)]
        machine: Option<Machine>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceArg {
    Machine,
    Peripheral,
}

impl From<SpaceArg> for RomSpace {
    fn from(value: SpaceArg) -> Self {
        match value {
            SpaceArg::Machine => RomSpace::Machine,
            SpaceArg::Peripheral => RomSpace::Peripheral,
        }
    }
}

/// Split a `NAME=VALUE` override. A bare `NAME` means an empty value, which switches a flag on.
pub fn parse_override(s: &str) -> Result<(String, String), String> {
    let (name, value) = s.split_once('=').unwrap_or((s, ""));
    if name.trim().is_empty() {
        return Err(format!("no setting name in {:?}", s));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

fn parse_machine(s: &str) -> Result<Machine, String> {
    Machine::from_id(s).ok_or_else(|| {
        let ids: Vec<&str> = Machine::ALL.iter().map(|m| m.id()).collect();
        format!("unknown machine {:?}, expected one of {}", s, ids.join(", "))
    })
}

pub fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}
