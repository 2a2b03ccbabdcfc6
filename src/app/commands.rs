use clap::CommandFactory;
use log::*;

use crate::{
    app::{Cli, Command},
    core::{
        locate_rom, resolve_name, rom_search_dirs, ConfigStore, Machine, OptionInfo, RomSlot,
        Settings, SettingsContext, SettingsError, OPTIONS,
    },
};

/// Run a parsed command line.
///
/// A store that can't be read only stops `write`, which would otherwise replace it with
/// defaults. Every other command carries on with the built-in defaults.
/// Only `write` touches the store, `autosave_settings` doesn't apply to the other commands.
pub fn run(cli: Cli) -> Result<(), SettingsError> {
    let store = match &cli.config {
        Some(path) => ConfigStore::new(path.clone()),
        None => ConfigStore::default_location(),
    };
    debug!("Using settings store {:?}", store.path());
    let mut context = SettingsContext::new(store);
    if let Err(e) = context.init(cli.overrides.iter().map(|(n, v)| (n, v))) {
        if cli.command == Command::Write {
            return Err(e);
        }
        warn!("Continuing with default settings");
    }

    let settings = context.current();
    if settings.show_version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    if settings.show_help {
        if let Err(e) = Cli::command().print_help() {
            error!("Unable to print help: {}", e);
        }
    }

    let result = match &cli.command {
        Command::Show { name } => show(settings, name.as_deref()),
        Command::Defaults => {
            OPTIONS.iter().for_each(print_default);
            Ok(())
        }
        Command::Write => context.save(),
        Command::Rom { space, index } => {
            RomSlot::from_index(*index, (*space).into()).map(|slot| print_rom(settings, slot))
        }
        Command::Roms { machine } => {
            let machine = (*machine).or_else(|| settings.start_machine()).unwrap_or_else(|| {
                warn!(
                    "Unknown start machine {:?}, showing the 48K ROMs",
                    settings.start_machine
                );
                Machine::Spectrum48
            });
            println!("{} ({})", machine, machine.id());
            for rom in machine.roms() {
                print_rom(settings, (*rom).into());
            }
            Ok(())
        }
    };
    result
}

fn show(settings: &Settings, name: Option<&str>) -> Result<(), SettingsError> {
    match name {
        Some(name) => {
            let (info, _) =
                resolve_name(name).ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))?;
            if let Some(value) = settings.get(info.name) {
                println!("{} = {}", info.name, value);
            }
        }
        None => {
            for (info, value) in settings.values() {
                let marker = if settings.is_default(info.name) == Some(false) {
                    "*"
                } else {
                    " "
                };
                println!("{}{:<32} {}", marker, info.name, value);
            }
        }
    }
    Ok(())
}

fn print_default(info: &OptionInfo) {
    println!(
        "{:<32} {:<8} {}{}",
        info.name,
        info.kind(),
        info.default.to_value(),
        if info.persisted { "" } else { " (not saved)" }
    );
}

fn print_rom(settings: &Settings, slot: RomSlot) {
    let file = settings.rom(slot);
    let found = file.and_then(|f| locate_rom(f, rom_search_dirs().as_slice()));
    println!(
        "  {:>2} {:<24} {:<20} {:<16} {}",
        slot.index(),
        slot.description(),
        slot.setting_name(),
        file.unwrap_or("(none)"),
        match found {
            Some(path) => path.display().to_string(),
            None => "not found".to_string(),
        }
    );
}
