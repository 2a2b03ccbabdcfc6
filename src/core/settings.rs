use crate::core::{OptionInfo, Settings, SettingsError, OPTIONS};

/// Find a setting's registry entry by name.
pub fn option(name: &str) -> Option<&'static OptionInfo> {
    OPTIONS.iter().find(|o| o.name == name)
}

/// Replace an owned text setting.
///
/// The new value is duplicated before the old one is released, so a failed allocation
/// leaves `field` untouched and passing a copy of the field's own value is harmless.
pub fn set_string(field: &mut Option<String>, value: Option<&str>) -> Result<(), SettingsError> {
    let new = match value {
        Some(v) => {
            let mut s = String::new();
            s.try_reserve_exact(v.len())?;
            s.push_str(v);
            Some(s)
        }
        None => None,
    };
    *field = new;
    Ok(())
}

impl Settings {
    /// Reset every setting to its built-in default, releasing any strings currently held.
    pub fn reset_to_defaults(&mut self) {
        *self = Settings::default();
    }

    /// Make this snapshot a deep copy of `src`.
    ///
    /// Strings previously held by `self` are released, and every string afterwards is
    /// owned by `self` alone.
    pub fn copy_from(&mut self, src: &Settings) {
        self.clone_from(src);
    }

    /// Set a text setting by name, see [set_string].
    pub fn set_text(&mut self, name: &str, value: Option<&str>) -> Result<(), SettingsError> {
        match self.text_mut(name) {
            Some(field) => set_string(field, value),
            None => match option(name) {
                Some(info) => Err(SettingsError::InvalidValue {
                    name: name.to_string(),
                    value: format!("text for a {} setting", info.kind()),
                }),
                None => Err(SettingsError::UnknownSetting(name.to_string())),
            },
        }
    }

    /// Parse `text` according to the setting's kind and set it.
    pub fn set_from_str(&mut self, name: &str, text: &str) -> Result<(), SettingsError> {
        let info = option(name).ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))?;
        let value = info
            .kind()
            .parse(text)
            .ok_or_else(|| SettingsError::InvalidValue {
                name: name.to_string(),
                value: format!("{:?}", text),
            })?;
        self.set(name, value)
    }

    /// Names of the settings whose value differs from `other`.
    pub fn diff(&self, other: &Settings) -> Vec<&'static str> {
        self.values()
            .into_iter()
            .zip(other.values())
            .filter(|((_, a), (_, b))| a != b)
            .map(|((info, _), _)| info.name)
            .collect()
    }

    /// Whether a setting still holds its built-in default.
    pub fn is_default(&self, name: &str) -> Option<bool> {
        let info = option(name)?;
        self.get(name).map(|v| v == info.default.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_defaults() {
        let mut settings = Settings::default();
        settings.tape_file = Some("game.tzx".to_string());
        settings.start_machine = None;
        settings.sound_freq = 22050;
        settings.fastload = false;
        settings.reset_to_defaults();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_copy_is_independent() {
        let mut src = Settings::default();
        src.tape_file = Some("a.tap".to_string());
        let mut dest = Settings::default();
        dest.snapshot = Some("old.z80".to_string());
        dest.copy_from(&src);
        assert_eq!(dest, src);

        set_string(&mut dest.tape_file, Some("b.tap")).unwrap();
        assert_eq!(src.tape_file.as_deref(), Some("a.tap"));
        set_string(&mut src.rom_48_0, Some("custom.rom")).unwrap();
        assert_eq!(dest.rom_48_0.as_deref(), Some("48.rom"));
    }

    #[test]
    fn test_set_string_with_own_value() {
        let mut settings = Settings::default();
        let current = settings.start_machine.clone();
        set_string(&mut settings.start_machine, current.as_deref()).unwrap();
        assert_eq!(settings.start_machine.as_deref(), Some("48"));
    }

    #[test]
    fn test_set_string_clears() {
        let mut settings = Settings::default();
        set_string(&mut settings.rom_48_0, None).unwrap();
        assert_eq!(settings.rom_48_0, None);
    }

    #[test]
    fn test_set_text_rejects_numeric_settings() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set_text("sound_freq", Some("x")),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set_text("nope", Some("x")),
            Err(SettingsError::UnknownSetting(_))
        ));
        settings.set_text("sound_device", Some("hw:0")).unwrap();
        assert_eq!(settings.sound_device.as_deref(), Some("hw:0"));
    }

    #[test]
    fn test_set_from_str() {
        let mut settings = Settings::default();
        settings.set_from_str("volume_ay", "50").unwrap();
        settings.set_from_str("issue2", "yes").unwrap();
        settings.set_from_str("start_machine", "plus3").unwrap();
        assert_eq!(settings.volume_ay, 50);
        assert!(settings.issue2);
        assert_eq!(settings.start_machine.as_deref(), Some("plus3"));
        assert!(settings.set_from_str("volume_ay", "loud").is_err());
        assert_eq!(settings.volume_ay, 50);
    }

    #[test]
    fn test_diff_and_is_default() {
        let mut settings = Settings::default();
        assert!(settings.diff(&Settings::default()).is_empty());
        settings.frame_rate = 2;
        settings.tape_file = Some("x.tap".to_string());
        assert_eq!(
            settings.diff(&Settings::default()),
            vec!["frame_rate", "tape_file"]
        );
        assert_eq!(settings.is_default("frame_rate"), Some(false));
        assert_eq!(settings.is_default("fastload"), Some(true));
        assert_eq!(settings.is_default("bogus"), None);
    }
}
