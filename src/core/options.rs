//! The option registry.
//!
//! Every setting is declared exactly once in the [settings!] invocation below, which generates
//! the [Settings] struct, its [Default] implementation, the [OPTIONS] table and the name-keyed
//! accessors used by the generic load/save/override routines.
//! Declaration order is the order settings are written to the store, so new settings go
//! wherever they belong alphabetically without reshuffling the rest.
use crate::core::{DefaultValue, OptionInfo, SettingType, SettingsError, Value};

macro_rules! setting_type {
    (flag) => {
        bool
    };
    (int) => {
        i32
    };
    (text) => {
        Option<String>
    };
}

macro_rules! setting_default {
    (flag, $default: expr) => {
        $default
    };
    (int, $default: expr) => {
        $default
    };
    (text) => {
        None
    };
    (text, $default: expr) => {
        Some(String::from($default))
    };
}

macro_rules! setting_default_value {
    (flag, $default: expr) => {
        DefaultValue::Flag($default)
    };
    (int, $default: expr) => {
        DefaultValue::Int($default)
    };
    (text) => {
        DefaultValue::Text(None)
    };
    (text, $default: expr) => {
        DefaultValue::Text(Some($default))
    };
}

macro_rules! setting_persisted {
    () => {
        true
    };
    (transient) => {
        false
    };
}

macro_rules! settings {
    ($(
        $(#[doc = $doc: literal])*
        $kind: ident $name: ident $(= $default: expr)? $(, $transient: ident)?;
    )*) => {
        /// One complete, self-consistent set of configuration values.
        ///
        /// Text settings are owned by the snapshot holding them, cloning a [Settings] deep copies
        /// every string and dropping it releases them.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct Settings {
            $(
                $(#[doc = $doc])*
                pub $name: setting_type!($kind),
            )*
        }

        impl Default for Settings {
            fn default() -> Self {
                Settings {
                    $( $name: setting_default!($kind $(, $default)?), )*
                }
            }
        }

        /// Every known setting, in declaration order.
        pub static OPTIONS: &[OptionInfo] = &[
            $(
                OptionInfo {
                    name: stringify!($name),
                    default: setting_default_value!($kind $(, $default)?),
                    persisted: setting_persisted!($($transient)?),
                },
            )*
        ];

        impl Settings {
            /// Get a copy of a setting's value by name.
            pub fn get(&self, name: &str) -> Option<Value> {
                match name {
                    $( stringify!($name) => Some(SettingType::to_value(&self.$name)), )*
                    _ => None,
                }
            }

            /// Set a setting by name.
            ///
            /// The value must be of the setting's kind, use [Settings::set_from_str] to parse text.
            pub fn set(&mut self, name: &str, value: Value) -> Result<(), SettingsError> {
                match name {
                    $(
                        stringify!($name) => {
                            self.$name = SettingType::from_value(value).map_err(|value| {
                                SettingsError::InvalidValue {
                                    name: name.to_string(),
                                    value: value.to_string(),
                                }
                            })?;
                        }
                    )*
                    _ => return Err(SettingsError::UnknownSetting(name.to_string())),
                }
                Ok(())
            }

            /// Get the field behind a text setting, `None` if `name` is unknown or not text.
            pub fn text_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
                match name {
                    $( stringify!($name) => SettingType::as_text_mut(&mut self.$name), )*
                    _ => None,
                }
            }

            /// Every setting paired with its current value, in declaration order.
            pub fn values(&self) -> Vec<(&'static OptionInfo, Value)> {
                let values = [$( SettingType::to_value(&self.$name), )*];
                OPTIONS.iter().zip(values).collect()
            }
        }
    };
}

settings! {
    flag accelerate_loader = true;
    /// Hint to the display backend to keep the 4:3 aspect ratio
    flag aspect_hint = true;
    /// Automatically load a tape when it is opened
    flag auto_load = true;
    /// Write the settings back to the store on shutdown
    flag autosave_settings = false;
    flag beta128 = false;
    flag beta128_48boot = false;
    text betadisk_file;
    flag bilinear_filter = false;
    flag bw_tv = false;
    int competition_code = 0;
    flag competition_mode = false;
    flag confirm_actions = true;
    /// Timex dock cartridge
    text dck_file;
    text debugger_command;
    flag detect_loader = true;
    flag didaktik80 = false;
    text didaktik80disk_file;
    flag disciple = false;
    text discipledisk_file;
    flag disk_ask_merge = true;
    text disk_try_merge = "With single-sided drives";
    flag divide_enabled = false;
    text divide_master_file;
    text divide_slave_file;
    flag divide_wp = false;
    int doublescan_mode = 1;
    int drive_40_max_track = 41;
    int drive_80_max_track = 83;
    text drive_beta128a_type = "Generic 80 track double sided";
    text drive_beta128b_type = "Generic 80 track double sided";
    text drive_beta128c_type = "Generic 80 track double sided";
    text drive_beta128d_type = "Generic 80 track double sided";
    text drive_didaktik80a_type = "Generic 80 track double sided";
    text drive_didaktik80b_type = "Generic 80 track double sided";
    text drive_disciple1_type = "Generic 80 track double sided";
    text drive_disciple2_type = "Generic 80 track double sided";
    text drive_opus1_type = "Generic 40 track single sided";
    text drive_opus2_type = "Generic 40 track single sided";
    text drive_plus3a_type = "Single-sided 40 track";
    text drive_plus3b_type = "Double-sided 80 track";
    text drive_plusd1_type = "Generic 80 track double sided";
    text drive_plusd2_type = "Generic 80 track double sided";
    flag embed_snapshot = true;
    /// Emulation speed as a percentage of a real machine
    int emulation_speed = 100;
    flag fastload = true;
    int fb_mode = 0;
    /// Render every n-th frame
    int frame_rate = 1;
    flag full_screen = false;
    flag full_screen_panorama = false;
    flag fuller = false;
    /// Interface 2 cartridge
    text if2_file;
    flag interface1 = false;
    flag interface2 = false;
    flag issue2 = false;
    int joy1_number = 0;
    int joy1_xaxis = 0;
    int joy1_yaxis = 1;
    int joy2_number = 1;
    int joy2_xaxis = 0;
    int joy2_yaxis = 1;
    flag joy_kempston = false;
    flag joy_keyboard = false;
    flag joy_prompt = true;
    /// Device of the first physical joystick
    text joystick_1;
    // Fire button mappings hold the key code pressed by that button, 4096 is joystick fire
    int joystick_1_fire_1 = 4096;
    int joystick_1_fire_10 = 4096;
    int joystick_1_fire_11 = 4096;
    int joystick_1_fire_12 = 4096;
    int joystick_1_fire_13 = 4096;
    int joystick_1_fire_14 = 4096;
    int joystick_1_fire_15 = 4096;
    int joystick_1_fire_2 = 4096;
    int joystick_1_fire_3 = 4096;
    int joystick_1_fire_4 = 4096;
    int joystick_1_fire_5 = 4096;
    int joystick_1_fire_6 = 4096;
    int joystick_1_fire_7 = 4096;
    int joystick_1_fire_8 = 4096;
    int joystick_1_fire_9 = 4096;
    /// Emulated joystick type driven by the first physical joystick
    int joystick_1_output = 0;
    /// Device of the second physical joystick
    text joystick_2;
    int joystick_2_fire_1 = 4096;
    int joystick_2_fire_10 = 4096;
    int joystick_2_fire_11 = 4096;
    int joystick_2_fire_12 = 4096;
    int joystick_2_fire_13 = 4096;
    int joystick_2_fire_14 = 4096;
    int joystick_2_fire_15 = 4096;
    int joystick_2_fire_2 = 4096;
    int joystick_2_fire_3 = 4096;
    int joystick_2_fire_4 = 4096;
    int joystick_2_fire_5 = 4096;
    int joystick_2_fire_6 = 4096;
    int joystick_2_fire_7 = 4096;
    int joystick_2_fire_8 = 4096;
    int joystick_2_fire_9 = 4096;
    int joystick_2_output = 0;
    // Key codes for the keyboard joystick (q, a, o, p, space)
    int joystick_keyboard_down = 97;
    int joystick_keyboard_fire = 32;
    int joystick_keyboard_left = 111;
    int joystick_keyboard_output = 0;
    int joystick_keyboard_right = 112;
    int joystick_keyboard_up = 113;
    flag kempston_mouse = false;
    flag late_timings = false;
    text mdr_file;
    text mdr_file2;
    text mdr_file3;
    text mdr_file4;
    text mdr_file5;
    text mdr_file6;
    text mdr_file7;
    text mdr_file8;
    /// Length of newly created microdrive cartridges, in blocks
    int mdr_len = 180;
    flag mdr_random_len = false;
    flag melodik = false;
    flag mouse_swap_buttons = false;
    text movie_compr = "Lossless";
    text movie_start;
    flag movie_stop_after_rzx = false;
    flag opus = false;
    text opusdisk_file;
    flag pal_tv2x = false;
    /// RZX file to play back on startup
    text playback_file;
    flag plus3_detect_speedlock = false;
    text plus3disk_file;
    flag plusd = false;
    text plusddisk_file;
    int preferences_tab = 0;
    flag printer = false;
    text printer_graphics_filename = "printout.pbm";
    text printer_text_filename = "printout.txt";
    flag raw_s_net = false;
    /// RZX file to record to on startup
    text record_file;
    flag recreated_spectrum = false;
    // ROM images, resolved through the ROM table
    text rom_128_0 = "128-0.rom";
    text rom_128_1 = "128-1.rom";
    text rom_16_0 = "48.rom";
    text rom_2048_0 = "tc2048.rom";
    text rom_2068_0 = "tc2068-0.rom";
    text rom_2068_1 = "tc2068-1.rom";
    text rom_48_0 = "48.rom";
    text rom_beta128 = "trdos.rom";
    text rom_didaktik80 = "gdos.rom";
    text rom_disciple = "disciple.rom";
    text rom_interface1 = "if1-2.rom";
    text rom_opus = "opus.rom";
    text rom_pentagon1024_0 = "128p-0.rom";
    text rom_pentagon1024_1 = "128p-1.rom";
    text rom_pentagon1024_2 = "trdos.rom";
    text rom_pentagon1024_3 = "gluck.rom";
    text rom_pentagon512_0 = "128p-0.rom";
    text rom_pentagon512_1 = "128p-1.rom";
    text rom_pentagon512_2 = "trdos.rom";
    text rom_pentagon512_3 = "gluck.rom";
    text rom_pentagon_0 = "128p-0.rom";
    text rom_pentagon_1 = "128p-1.rom";
    text rom_pentagon_2 = "trdos.rom";
    text rom_plus2_0 = "plus2-0.rom";
    text rom_plus2_1 = "plus2-1.rom";
    text rom_plus2a_0 = "plus3-0.rom";
    text rom_plus2a_1 = "plus3-1.rom";
    text rom_plus2a_2 = "plus3-2.rom";
    text rom_plus2a_3 = "plus3-3.rom";
    text rom_plus3_0 = "plus3-0.rom";
    text rom_plus3_1 = "plus3-1.rom";
    text rom_plus3_2 = "plus3-2.rom";
    text rom_plus3_3 = "plus3-3.rom";
    text rom_plus3e_0 = "plus3e-0.rom";
    text rom_plus3e_1 = "plus3e-1.rom";
    text rom_plus3e_2 = "plus3e-2.rom";
    text rom_plus3e_3 = "plus3e-3.rom";
    text rom_plusd = "plusd.rom";
    text rom_scorpion_0 = "256s-0.rom";
    text rom_scorpion_1 = "256s-1.rom";
    text rom_scorpion_2 = "256s-2.rom";
    text rom_scorpion_3 = "256s-3.rom";
    text rom_se_0 = "se-0.rom";
    text rom_se_1 = "se-1.rom";
    text rom_speccyboot = "speccyboot-1.4.rom";
    text rom_ts2068_0 = "tc2068-0.rom";
    text rom_ts2068_1 = "tc2068-1.rom";
    text rom_usource = "usource.rom";
    flag rs232_handshake = true;
    text rs232_rx;
    text rs232_tx;
    flag rzx_autosaves = true;
    flag rzx_compression = true;
    flag simpleide_active = false;
    text simpleide_master_file;
    text simpleide_slave_file;
    flag slt_traps = true;
    /// Snapshot to load on startup
    text snapshot;
    text snet;
    flag sound = true;
    text sound_device;
    flag sound_force_8bit = false;
    /// Output sample rate in Hz
    int sound_freq = 44100;
    /// Play tape loading noises
    flag sound_load = true;
    text speaker_type = "TV speaker";
    flag speccyboot = false;
    text speccyboot_tap;
    flag specdrum = false;
    flag spectranet = false;
    flag spectranet_disable = false;
    /// Machine id to start with, see [Machine::id][crate::core::Machine::id]
    text start_machine = "48";
    /// Name of the scaler the display backend starts with
    text start_scaler_mode = "normal";
    flag statusbar = true;
    /// AY stereo separation: `None`, `ACB` or `ABC`
    text stereo_ay = "None";
    flag strict_aspect_hint = false;
    text svga_modes;
    /// Tape to open on startup
    text tape_file;
    flag tape_traps = true;
    flag unittests = false;
    flag usource = false;
    // Volumes are percentages
    int volume_ay = 100;
    int volume_beeper = 100;
    int volume_specdrum = 100;
    flag writable_roms = false;
    flag z80_is_cmos = false;
    flag zxatasp_active = false;
    text zxatasp_master_file;
    text zxatasp_slave_file;
    flag zxatasp_upload = false;
    flag zxatasp_wp = false;
    flag zxcf_active = false;
    text zxcf_pri_file;
    flag zxcf_upload = false;
    flag zxprinter = true;

    /// Print usage and exit
    flag show_help = false, transient;
    /// Print the version and exit
    flag show_version = false, transient;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for info in OPTIONS {
            assert!(seen.insert(info.name), "{} declared twice", info.name);
        }
    }

    #[test]
    fn test_defaults_match_table() {
        let settings = Settings::default();
        for (info, value) in settings.values() {
            assert_eq!(value, info.default.to_value(), "{}", info.name);
            assert_eq!(value.kind(), info.kind(), "{}", info.name);
        }
    }

    #[test]
    fn test_get_and_set_by_name() {
        let mut settings = Settings::default();
        settings.set("sound_freq", Value::Int(48000)).unwrap();
        assert_eq!(settings.sound_freq, 48000);
        assert_eq!(settings.get("sound_freq"), Some(Value::Int(48000)));
        assert_eq!(settings.get("no_such_setting"), None);
    }

    #[test]
    fn test_set_wrong_kind_is_rejected() {
        let mut settings = Settings::default();
        let err = settings.set("fastload", Value::Int(0)).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(settings.fastload);
    }

    #[test]
    fn test_set_unknown_is_rejected() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("volume", Value::Int(3)),
            Err(SettingsError::UnknownSetting(_))
        ));
    }

    #[test]
    fn test_text_mut_only_for_text() {
        let mut settings = Settings::default();
        assert!(settings.text_mut("tape_file").is_some());
        assert!(settings.text_mut("fastload").is_none());
        *settings.text_mut("tape_file").unwrap() = Some("game.tzx".to_string());
        assert_eq!(settings.tape_file.as_deref(), Some("game.tzx"));
    }

    #[test]
    fn test_transient_settings_are_not_persisted() {
        let transient: Vec<_> = OPTIONS
            .iter()
            .filter(|o| !o.persisted)
            .map(|o| o.name)
            .collect();
        assert_eq!(transient, vec!["show_help", "show_version"]);
    }
}
