//! Reading and writing the settings store.
//!
//! The store is a YAML mapping with one `name: value` line per persisted setting, written in
//! registry order. Every persisted setting is written, defaults included, so a store always
//! holds a complete snapshot. Text is always written double quoted with escapes, so every
//! value stays on its own line.
//!
//! Reading goes line by line: a line that doesn't parse, an unknown key or a value that
//! doesn't fit its setting is skipped with a [Warning] and the rest of the store still loads.
//! Only an unreadable file, or one that isn't UTF-8 text, fails the whole load.
use std::{
    collections::HashSet,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::*;
use serde_yaml::Value as YamlValue;

use crate::core::{option, Kind, Settings, SettingsError, Value, Warning};

/// Directory (under the platform config directory) holding the store.
pub const STORE_DIR: &str = "fuse";
/// File name of the store.
pub const STORE_FILE: &str = "settings.yaml";

const HEADER: &str = "# Emulator settings, one `name: value` per line. Unknown names are ignored.\n";

/// A settings store at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> ConfigStore {
        ConfigStore { path: path.into() }
    }

    /// The store at the platform's conventional location.
    ///
    /// On Linux: `~/.config/fuse/settings.yaml`
    /// On macOS: `~/Library/Application Support/fuse/settings.yaml`
    /// On Windows: `%APPDATA%\fuse\settings.yaml`
    /// Falls back to `~/.fuse/settings.yaml`, then to the working directory.
    pub fn default_location() -> ConfigStore {
        let path = dirs::config_dir()
            .map(|dir| dir.join(STORE_DIR))
            .or_else(|| dirs::home_dir().map(|home| home.join(".fuse")))
            .unwrap_or_default()
            .join(STORE_FILE);
        ConfigStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Overlay the store's values onto `settings`.
    ///
    /// A missing store leaves `settings` as it is. On error nothing is applied.
    pub fn read(&self, settings: &mut Settings) -> Result<Vec<Warning>, SettingsError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No settings store at {:?}, using defaults", self.path);
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let text = std::str::from_utf8(&bytes).map_err(|source| SettingsError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        let warnings = parse_document(text, settings);
        debug!(
            "Read settings from {:?} with {} warning(s)",
            self.path,
            warnings.len()
        );
        Ok(warnings)
    }

    /// Write every persisted setting to the store.
    ///
    /// The document is written to a temporary file next to the store and then renamed over
    /// it, so the previous store survives a failed write.
    pub fn write(&self, settings: &Settings) -> Result<(), SettingsError> {
        let document = to_document(settings);
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| SettingsError::Io { path, source }
        };
        fs::create_dir_all(&dir).map_err(io_error(dir.as_path()))?;
        let mut file = tempfile::Builder::new()
            .prefix(".settings.")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(io_error(dir.as_path()))?;
        file.write_all(document.as_bytes())
            .and_then(|_| file.as_file().sync_all())
            .map_err(io_error(file.path()))?;
        file.persist(&self.path)
            .map_err(|e| SettingsError::Io {
                path: self.path.clone(),
                source: e.error,
            })?;
        debug!("Wrote settings to {:?}", self.path);
        Ok(())
    }
}

/// Read the store at its default location into `settings`.
pub fn read_config_file(settings: &mut Settings) -> Result<Vec<Warning>, SettingsError> {
    ConfigStore::default_location().read(settings)
}

/// Write `settings` to the store at its default location.
pub fn write_config_file(settings: &Settings) -> Result<(), SettingsError> {
    ConfigStore::default_location().write(settings)
}

/// Serialize every persisted setting, in registry order.
pub fn to_document(settings: &Settings) -> String {
    let mut document = String::from(HEADER);
    for (info, value) in settings.values() {
        if info.persisted {
            document.push_str(info.name);
            document.push_str(": ");
            document.push_str(&render(&value));
            document.push('\n');
        }
    }
    document
}

/// Overlay a store document onto `settings`, one line at a time.
///
/// Lines that can't be used are reported and skipped, so this never fails. When a setting
/// appears more than once the last usable value wins.
pub fn parse_document(text: &str, settings: &mut Settings) -> Vec<Warning> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line == "---" || line == "..." {
            continue;
        }
        let (name, raw) = match line.split_once(':') {
            Some((name, raw)) => (name.trim(), raw.trim()),
            None => {
                warnings.push(Warning::Syntax {
                    line: number + 1,
                    text: line.to_string(),
                });
                continue;
            }
        };
        let info = match option(name) {
            Some(info) if info.persisted => info,
            _ => {
                warnings.push(Warning::UnknownKey {
                    name: name.to_string(),
                });
                continue;
            }
        };
        if !seen.insert(info.name) {
            warn!(
                "Setting {:?} appears more than once in the store, using the last value",
                info.name
            );
        }
        let applied = serde_yaml::from_str::<YamlValue>(raw)
            .ok()
            .and_then(|yaml| from_yaml(info.kind(), &yaml))
            .and_then(|value| settings.set(info.name, value).ok());
        if applied.is_none() {
            warnings.push(Warning::Parse {
                name: name.to_string(),
                value: raw.to_string(),
            });
        }
    }
    for warning in &warnings {
        warn!("{}", warning);
    }
    warnings
}

/// Convert a stored value to a setting of `kind`.
///
/// Hand edited stores often hold `0/1` for flags or quote numbers, so both are accepted.
fn from_yaml(kind: Kind, raw: &YamlValue) -> Option<Value> {
    match (kind, raw) {
        (Kind::Flag, YamlValue::Bool(b)) => Some(Value::Flag(*b)),
        (Kind::Flag, YamlValue::Number(n)) => n.as_i64().map(|n| Value::Flag(n != 0)),
        (Kind::Int, YamlValue::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Value::Int),
        (Kind::Flag | Kind::Int, YamlValue::String(s)) => kind.parse(s),
        (Kind::Text, YamlValue::Null) => Some(Value::Text(None)),
        (Kind::Text, YamlValue::String(s)) => Some(Value::Text(Some(s.clone()))),
        (Kind::Text, YamlValue::Number(n)) => Some(Value::Text(Some(n.to_string()))),
        (Kind::Text, YamlValue::Bool(b)) => Some(Value::Text(Some(b.to_string()))),
        _ => None,
    }
}

/// The single line form of a value.
fn render(value: &Value) -> String {
    match value {
        Value::Flag(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Text(None) => "null".to_string(),
        Value::Text(Some(s)) => quote(s),
    }
}

/// Quote text as a YAML double quoted scalar, escaping anything that could end the line.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control()
                || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}') =>
            {
                quoted.push_str(&format!("\\u{:04x}", c as u32))
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_round_trip() {
        let mut settings = Settings::default();
        settings.tape_file = Some("games/manic miner.tzx".to_string());
        settings.start_machine = Some("128".to_string());
        settings.rom_48_0 = None;
        settings.volume_ay = i32::MIN;
        settings.sound_freq = i32::MAX;
        settings.fastload = false;

        let document = to_document(&settings);
        let mut read = Settings::default();
        let warnings = parse_document(&document, &mut read);
        assert!(warnings.is_empty());
        assert_eq!(read, settings);
    }

    #[test]
    fn test_awkward_text_round_trip() {
        let awkward = [
            "", "null", "~", "yes", "0x10", "a: b", "# not a comment", " padded ", "[x]", "{y: 1}",
            "'single'", "\"double\"", "back\\slash", "l1\nl2\r\n", "tab\there", "bell\u{7}",
            "line\u{2028}sep", "\u{feff}bom", "C:\\roms\\48.rom", "joystick \u{1f3ae}",
        ];
        let persisted = crate::core::OPTIONS.iter().filter(|o| o.persisted).count();
        for text in awkward {
            let mut settings = Settings::default();
            settings.sound_device = Some(text.to_string());
            let document = to_document(&settings);
            assert_eq!(
                document.lines().count(),
                1 + persisted,
                "{:?}",
                text
            );
            let mut read = Settings::default();
            assert!(parse_document(&document, &mut read).is_empty(), "{:?}", text);
            assert_eq!(read.sound_device.as_deref(), Some(text));
        }
    }

    #[test]
    fn test_document_skips_transient() {
        let document = to_document(&Settings::default());
        assert!(document.contains("\nfastload: true\n"));
        assert!(document.contains("\nstart_machine: \"48\"\n"));
        assert!(document.contains("\ntape_file: null\n"));
        assert!(!document.contains("show_help"));
        assert!(!document.contains("show_version"));
    }

    #[test]
    fn test_empty_document() {
        let mut settings = Settings::default();
        assert!(parse_document("", &mut settings).is_empty());
        assert!(parse_document("# nothing\n\n---\n", &mut settings).is_empty());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_corrupt_lines_only_lose_themselves() {
        for bad in [
            "volume_ay: \"50",
            "volume_ay 50",
            "volume_ay: [50",
            "volume_ay: 5: 0",
            "- volume_ay",
        ] {
            let mut settings = Settings::default();
            let document = format!(
                "sound_freq: 22050\n{}\nfastload: false\nstart_machine: plus3\n",
                bad
            );
            let warnings = parse_document(&document, &mut settings);
            assert_eq!(warnings.len(), 1, "{:?}", bad);
            assert_eq!(settings.sound_freq, 22050, "{:?}", bad);
            assert!(!settings.fastload, "{:?}", bad);
            assert_eq!(settings.start_machine.as_deref(), Some("plus3"), "{:?}", bad);
            assert_eq!(settings.volume_ay, 100, "{:?}", bad);
        }
    }

    #[test]
    fn test_line_without_separator() {
        let mut settings = Settings::default();
        let warnings = parse_document("fastload: false\nvolume_ay 50\n", &mut settings);
        assert_eq!(
            warnings,
            vec![Warning::Syntax {
                line: 2,
                text: "volume_ay 50".to_string()
            }]
        );
        assert!(!settings.fastload);
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let mut settings = Settings::default();
        let warnings = parse_document(
            "sound_freq: 1\nvolume_ay: 20\nsound_freq: 22050\n",
            &mut settings,
        );
        assert!(warnings.is_empty());
        assert_eq!(settings.sound_freq, 22050);
        assert_eq!(settings.volume_ay, 20);
    }

    #[test]
    fn test_lenient_values() {
        let mut settings = Settings::default();
        let warnings = parse_document(
            "fastload: 0\nissue2: \"yes\"\nsound_freq: \"22050\"\nstart_machine: 128\nvolume_ay: 40 # quieter\n",
            &mut settings,
        );
        assert!(warnings.is_empty());
        assert!(!settings.fastload);
        assert!(settings.issue2);
        assert_eq!(settings.sound_freq, 22050);
        assert_eq!(settings.start_machine.as_deref(), Some("128"));
        assert_eq!(settings.volume_ay, 40);
    }

    #[test]
    fn test_bad_values_are_reported() {
        let mut settings = Settings::default();
        let warnings = parse_document(
            "sound_freq: lots\nvolume_ay: 5000000000\ntape_file: [a, b]\nshow_help: true\nbogus: 1\n",
            &mut settings,
        );
        assert_eq!(
            warnings.iter().map(|w| w.name()).collect::<Vec<_>>(),
            vec!["sound_freq", "volume_ay", "tape_file", "show_help", "bogus"]
        );
        assert!(matches!(warnings[0], Warning::Parse { .. }));
        assert!(matches!(warnings[3], Warning::UnknownKey { .. }));
        assert_eq!(settings, Settings::default());
    }
}
