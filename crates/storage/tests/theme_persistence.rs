use shared::domain::ThemePreference;
use storage::{load_theme, save_theme, Storage};

#[tokio::test]
async fn theme_survives_reopening_the_database() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("prefs.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    {
        let storage = Storage::new(&database_url).await.expect("db");
        save_theme(&storage, ThemePreference::Dark).await.expect("save");
        storage.close().await;
    }

    let reopened = Storage::new(&database_url).await.expect("reopen");
    assert_eq!(
        load_theme(&reopened).await.expect("load"),
        ThemePreference::Dark
    );
}
