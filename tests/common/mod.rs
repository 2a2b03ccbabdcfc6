// Create a store in a fresh temporary directory, holding the given document if one is given.
// Evaluates to `(TempDir, ConfigStore)`, keep the directory alive for as long as the store is used.
#[macro_export]
macro_rules! temp_store {
    () => {{
        let dir = tempfile::tempdir().unwrap();
        let store = fuse_settings::core::ConfigStore::new(dir.path().join("settings.yaml"));
        (dir, store)
    }};
    ($contents: expr) => {{
        let (dir, store) = temp_store!();
        std::fs::write(store.path(), $contents).unwrap();
        (dir, store)
    }};
}
