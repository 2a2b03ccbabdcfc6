use log::*;

use crate::core::{apply_overrides, ConfigStore, Settings, SettingsError, Warning};

/// Populate `settings` from built-in defaults, then the store, then `overrides`.
///
/// Later sources win. If the store can't be read `settings` is left holding the defaults
/// (without any overrides) and the error is returned, so the caller can carry on degraded.
pub fn init<I, N, V>(
    settings: &mut Settings,
    store: &ConfigStore,
    overrides: I,
) -> Result<Vec<Warning>, SettingsError>
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<str>,
{
    let mut loaded = Settings::default();
    let mut warnings = match store.read(&mut loaded) {
        Ok(warnings) => warnings,
        Err(e) => {
            settings.reset_to_defaults();
            return Err(e);
        }
    };
    warnings.extend(apply_overrides(&mut loaded, overrides));
    *settings = loaded;
    Ok(warnings)
}

/// The configuration shared by the rest of the emulator.
///
/// Holds the live `current` settings and the built-in defaults they are reset from, along with
/// the store both are loaded from and saved to. Create one at startup and hand it to whatever
/// needs settings; display and audio backends only ever need [SettingsContext::current].
#[derive(Debug, Clone)]
pub struct SettingsContext {
    current: Settings,
    default: Settings,
    store: ConfigStore,
}

impl SettingsContext {
    /// A context holding only defaults. Call [SettingsContext::init] to load the store.
    pub fn new(store: ConfigStore) -> SettingsContext {
        SettingsContext {
            current: Settings::default(),
            default: Settings::default(),
            store,
        }
    }

    /// Load the store and apply `overrides` to the current settings, see [init].
    pub fn init<I, N, V>(&mut self, overrides: I) -> Result<Vec<Warning>, SettingsError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let result = init(&mut self.current, &self.store, overrides);
        if let Err(e) = &result {
            error!("{}, falling back to default settings", e);
        }
        result
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Settings {
        &mut self.current
    }

    pub fn defaults(&self) -> &Settings {
        &self.default
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// An independent copy of the current settings, for readers that need several
    /// settings to agree with each other.
    pub fn snapshot(&self) -> Settings {
        self.current.clone()
    }

    /// Put every current setting back to its default.
    pub fn reset(&mut self) {
        self.current.copy_from(&self.default);
    }

    /// Write the current settings to the store.
    pub fn save(&self) -> Result<(), SettingsError> {
        self.store.write(&self.current)?;
        info!("Saved settings to {:?}", self.store.path());
        Ok(())
    }

    /// Shut the settings down, saving them first if `autosave_settings` is on.
    pub fn end(self) -> Result<(), SettingsError> {
        if self.current.autosave_settings {
            self.save()?;
        }
        Ok(())
    }
}
