//! The application code, used when running fuse-settings as a standalone tool.
//!
//! Inspects and maintains the emulator's settings store from the command line: print the
//! effective settings or the built-in defaults, write a complete store, and look up the ROM
//! images the machines load. Overrides given with `-s NAME=VALUE` are layered on top exactly
//! as the emulator layers its own command line.
//! All of the actual settings handling is done by importing from [core][crate::core].
mod cli;
pub use cli::{parse_override, styles, Cli, Command, SpaceArg};
mod commands;
pub use commands::run;
mod logging;
pub use logging::{init_logging, level_for};
