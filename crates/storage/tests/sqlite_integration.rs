use storage::repository::{PREFERENCES_KEY, PackRepository, PreferencesRepository, Storage};
use storage::sqlite::SqlitePreferenceStore;

fn memory_url(name: &str) -> String {
    format!("sqlite:file:{name}?mode=memory&cache=shared")
}

async fn connect(name: &str) -> SqlitePreferenceStore {
    SqlitePreferenceStore::open(&memory_url(name))
        .await
        .expect("open")
}

#[tokio::test]
async fn sqlite_roundtrip_overwrites_value() {
    let repo = connect("memdb_prefs_roundtrip").await;

    assert_eq!(repo.get_raw(PREFERENCES_KEY).await.unwrap(), None);

    repo.put_raw(PREFERENCES_KEY, r#"{"mode":"typing","pack":"Liczby 0–10"}"#)
        .await
        .unwrap();
    repo.put_raw(PREFERENCES_KEY, r#"{"mode":"listening","pack":"Zwroty ważne"}"#)
        .await
        .unwrap();

    let stored = repo.get_raw(PREFERENCES_KEY).await.unwrap();
    assert_eq!(
        stored.as_deref(),
        Some(r#"{"mode":"listening","pack":"Zwroty ważne"}"#)
    );
}

#[tokio::test]
async fn sqlite_remove_clears_only_that_key() {
    let repo = connect("memdb_prefs_remove").await;

    repo.put_raw(PREFERENCES_KEY, "{}").await.unwrap();
    repo.put_raw("other", "kept").await.unwrap();
    repo.remove(PREFERENCES_KEY).await.unwrap();
    repo.remove(PREFERENCES_KEY).await.unwrap();

    assert_eq!(repo.get_raw(PREFERENCES_KEY).await.unwrap(), None);
    assert_eq!(repo.get_raw("other").await.unwrap().as_deref(), Some("kept"));
}

#[tokio::test]
async fn sqlite_stores_malformed_values_verbatim() {
    let repo = connect("memdb_prefs_malformed").await;

    repo.put_raw(PREFERENCES_KEY, "{not json").await.unwrap();
    assert_eq!(
        repo.get_raw(PREFERENCES_KEY).await.unwrap().as_deref(),
        Some("{not json")
    );
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_prefs_migrate_twice").await;
    let reopened = SqlitePreferenceStore::open(&memory_url("memdb_prefs_migrate_twice"))
        .await
        .expect("second open");
    reopened.put_raw("k", "v").await.unwrap();
    assert_eq!(repo.get_raw("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn sqlite_storage_serves_builtin_packs() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage_packs?mode=memory&cache=shared")
        .await
        .expect("storage");
    let catalog = storage.packs.load_catalog().await.unwrap();
    assert_eq!(catalog.first().name(), "Powitania i podstawy");

    storage.preferences.put_raw(PREFERENCES_KEY, "{}").await.unwrap();
    assert!(storage.preferences.get_raw(PREFERENCES_KEY).await.unwrap().is_some());
}
