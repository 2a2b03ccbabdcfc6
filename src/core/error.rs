use std::{collections::TryReserveError, fmt::Display, io, path::PathBuf, str::Utf8Error};

use crate::core::RomSpace;

/// Errors surfaced to the caller.
///
/// Problems with a single setting while loading or merging are not errors,
/// they are reported as [Warning]s and the setting keeps its previous value.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Unable to access settings store {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Settings store {path:?} is not text: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: Utf8Error,
    },
    #[error("No {space} ROM slot {index}")]
    OutOfRange { space: RomSpace, index: usize },
    #[error("Unknown setting {0:?}")]
    UnknownSetting(String),
    #[error("Invalid value {value} for setting {name:?}")]
    InvalidValue { name: String, value: String },
    #[error("Unable to allocate setting value: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

/// A recoverable problem with a single setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The value could not be parsed for the setting's kind, the setting was left as it was
    Parse { name: String, value: String },
    /// No setting has this name, the entry was ignored
    UnknownKey { name: String },
    /// A store line that isn't a `name: value` pair, counted from 1
    Syntax { line: usize, text: String },
}

impl Warning {
    /// The name of the setting (or unrecognised key) this warning is about.
    /// For a line naming no setting, the line itself.
    pub fn name(&self) -> &str {
        match self {
            Warning::Parse { name, .. } | Warning::UnknownKey { name } => name,
            Warning::Syntax { text, .. } => text,
        }
    }
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::Parse { name, value } => {
                write!(f, "Ignoring invalid value {} for setting {:?}", value, name)
            }
            Warning::UnknownKey { name } => write!(f, "Ignoring unknown setting {:?}", name),
            Warning::Syntax { line, text } => {
                write!(f, "Ignoring line {} of the settings store: {:?}", line, text)
            }
        }
    }
}
