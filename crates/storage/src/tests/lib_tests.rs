use super::*;

#[tokio::test]
async fn missing_key_reads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert_eq!(storage.get("theme").await.expect("get"), None);
}

#[tokio::test]
async fn set_overwrites_previous_value() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.set("theme", "dark").await.expect("first set");
    storage.set("theme", "light").await.expect("second set");
    assert_eq!(
        storage.get("theme").await.expect("get").as_deref(),
        Some("light")
    );
}

#[tokio::test]
async fn theme_defaults_to_light_and_round_trips() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert_eq!(
        load_theme(&storage).await.expect("load"),
        ThemePreference::Light
    );

    save_theme(&storage, ThemePreference::Dark).await.expect("save");
    assert_eq!(
        load_theme(&storage).await.expect("load"),
        ThemePreference::Dark
    );
}

#[tokio::test]
async fn unknown_stored_theme_falls_back_to_light() {
    let store = MemoryStore::new();
    store.set(THEME_STORAGE_KEY, "sepia").await.expect("set");
    assert_eq!(load_theme(&store).await.expect("load"), ThemePreference::Light);
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("prefs.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[test]
fn memory_url_has_no_path() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/prefs.db?mode=rwc"),
        Some(PathBuf::from("./data/prefs.db"))
    );
}
