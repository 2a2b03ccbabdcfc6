mod common;
use fuse_settings::core::{init, Settings, SettingsContext, SettingsError, Warning};
use test_case::test_case;

const NO_OVERRIDES: [(&str, &str); 0] = [];

#[test]
fn test_override_beats_store_beats_default() {
    let (_dir, store) = temp_store!("sound_freq: 22050\nvolume_ay: 30\n");
    let mut settings = Settings::default();
    let warnings = init(&mut settings, &store, [("sound-freq", "48000")]).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(settings.sound_freq, 48000);
    assert_eq!(settings.volume_ay, 30);
    assert_eq!(settings.volume_beeper, 100);
}

#[test]
fn test_init_discards_previous_values() {
    let (_dir, store) = temp_store!("volume_ay: 30\n");
    let mut settings = Settings::default();
    settings.tape_file = Some("left over.tap".to_string());
    settings.frame_rate = 5;
    init(&mut settings, &store, NO_OVERRIDES).unwrap();
    assert_eq!(settings.tape_file, None);
    assert_eq!(settings.frame_rate, 1);
    assert_eq!(settings.volume_ay, 30);
}

#[test]
fn test_init_collects_warnings_from_every_layer() {
    let (_dir, store) = temp_store!("volume_ay: loud\n");
    let mut settings = Settings::default();
    let warnings = init(&mut settings, &store, [("turbo", "1")]).unwrap();
    assert_eq!(
        warnings.iter().map(Warning::name).collect::<Vec<_>>(),
        vec!["volume_ay", "turbo"]
    );
}

#[test]
fn test_corrupt_lines_keep_the_rest_of_the_store() {
    let (_dir, store) = temp_store!("volume_ay: 30\nsound_freq: [\nvolume_beeper 7\nissue2: true\n");
    let mut settings = Settings::default();
    let warnings = init(&mut settings, &store, [("machine", "128")]).unwrap();
    assert_eq!(warnings.len(), 2);
    assert_eq!(settings.volume_ay, 30);
    assert_eq!(settings.sound_freq, 44100);
    assert!(settings.issue2);
    assert_eq!(settings.start_machine.as_deref(), Some("128"));
}

#[test]
fn test_failed_load_falls_back_to_defaults() {
    let (_dir, store) = temp_store!(b"volume_ay: 30\n\xc3\x28\n");
    let mut settings = Settings::default();
    settings.sound_freq = 8000;
    let result = init(&mut settings, &store, [("machine", "128")]);
    assert!(matches!(result, Err(SettingsError::Malformed { .. })));
    assert_eq!(settings, Settings::default());
}

#[test_case("autosave_settings", true ; "saves when autosave is on")]
#[test_case("no-autosave-settings", false ; "leaves the store when autosave is off")]
fn test_end(autosave: &str, saved: bool) {
    let (_dir, store) = temp_store!();
    let mut context = SettingsContext::new(store.clone());
    context.init([(autosave, ""), ("volume-ay", "12")]).unwrap();
    context.end().unwrap();
    assert_eq!(store.exists(), saved);

    if saved {
        let mut read = Settings::default();
        store.read(&mut read).unwrap();
        assert_eq!(read.volume_ay, 12);
        assert!(read.autosave_settings);
    }
}

#[test]
fn test_context_save_and_reload() {
    let (_dir, store) = temp_store!();
    let mut context = SettingsContext::new(store.clone());
    context.init(NO_OVERRIDES).unwrap();
    context.current_mut().set_from_str("start_machine", "pentagon").unwrap();
    context.save().unwrap();

    let mut reloaded = SettingsContext::new(store);
    reloaded.init(NO_OVERRIDES).unwrap();
    assert_eq!(reloaded.current().start_machine.as_deref(), Some("pentagon"));
    reloaded.reset();
    assert_eq!(reloaded.current(), reloaded.defaults());
}

#[test]
fn test_snapshot_is_independent() {
    let (_dir, store) = temp_store!();
    let mut context = SettingsContext::new(store);
    context.init([("tape", "a.tzx")]).unwrap();
    let snapshot = context.snapshot();
    context.current_mut().set_text("tape_file", Some("b.tzx")).unwrap();
    assert_eq!(snapshot.tape_file.as_deref(), Some("a.tzx"));
    assert_eq!(context.current().tape_file.as_deref(), Some("b.tzx"));
}
