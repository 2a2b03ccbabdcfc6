//! The settings engine, provided as a library.
//!
//! Holds every configurable option of the emulator in a single [Settings] snapshot, along with
//! its built-in defaults, the on-disk store it is persisted to, and the command line overrides
//! layered on top. Every setting is declared once in a registry ([OPTIONS]) which drives
//! loading, saving and merging generically.
//! ```
//! use fuse_settings::core::{apply_overrides, Machine, MachineRom, Settings, get_rom_setting, set_string};
//! // Start from the built-in defaults
//! let mut settings = Settings::default();
//! // Layer some command line overrides on top
//! let warnings = apply_overrides(&mut settings, [("machine", "128"), ("no-fastload", "")]);
//! assert!(warnings.is_empty());
//! assert_eq!(settings.start_machine(), Some(Machine::Spectrum128));
//! assert!(!settings.fastload);
//! // Look at the ROMs the machine will load
//! for (rom, path) in settings.machine_roms(Machine::Spectrum128) {
//!     println!("{}: {:?}", rom.description(), path);
//! }
//! // Replace a ROM by its slot index
//! let slot = get_rom_setting(&mut settings, MachineRom::Spectrum48.index(), false).unwrap();
//! set_string(slot, Some("custom48.rom")).unwrap();
//! assert_eq!(settings.rom(MachineRom::Spectrum48.into()), Some("custom48.rom"));
//! ```
mod schema;
pub use schema::{DefaultValue, Kind, OptionInfo, SettingType, Value};
mod options;
pub use options::{Settings, OPTIONS};
mod settings;
pub use settings::{option, set_string};
mod error;
pub use error::{SettingsError, Warning};
mod rom;
pub use rom::*;
mod store;
pub use store::*;
mod overrides;
pub use overrides::{apply_overrides, resolve_name};
mod context;
pub use context::{init, SettingsContext};
