//! Override store tests: SQLite persistence, schema, memory store parity.

use std::sync::Arc;
use std::thread;

use switchboard_core::config::{BuildConfiguration, BuildContext, StoreBackend, StoreConfig};
use switchboard_core::errors::StoreError;
use switchboard_core::flags::{FeatureFlag, FlagRegistry};
use switchboard_core::store::{self, initialize_override_db, StoreLock, OVERRIDE_SCHEMA_VERSION};
use switchboard_core::{IOverrideStore, MemoryOverrideStore, SqliteOverrideStore};

fn exercise_store(store: &dyn IOverrideStore) {
    assert_eq!(store.get("blaze").unwrap(), None);
    assert!(store.entries().unwrap().is_empty());

    store.set("blaze", true).unwrap();
    store.set("site_name", false).unwrap();
    assert_eq!(store.get("blaze").unwrap(), Some(true));
    assert_eq!(store.get("site_name").unwrap(), Some(false));

    // Replace
    store.set("blaze", false).unwrap();
    assert_eq!(store.get("blaze").unwrap(), Some(false));

    assert_eq!(
        store.entries().unwrap(),
        vec![("blaze".to_string(), false), ("site_name".to_string(), false)]
    );

    assert!(store.remove("blaze").unwrap());
    assert!(!store.remove("blaze").unwrap());
    assert_eq!(store.clear().unwrap(), 1);
    assert!(store.entries().unwrap().is_empty());
}

// ============================================================
// Contract
// ============================================================

#[test]
fn memory_store_contract() {
    exercise_store(&MemoryOverrideStore::new());
}

#[test]
fn sqlite_in_memory_store_contract() {
    exercise_store(&SqliteOverrideStore::open_in_memory().unwrap());
}

#[test]
fn sqlite_file_store_contract() {
    let dir = tempfile::tempdir().unwrap();
    exercise_store(&SqliteOverrideStore::open(dir.path()).unwrap());
}

// ============================================================
// Persistence
// ============================================================

#[test]
fn overrides_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = BuildContext::new(BuildConfiguration::AppStore);

    {
        let store = Arc::new(SqliteOverrideStore::open(dir.path()).unwrap());
        let reg = FlagRegistry::new(ctx, store);
        reg.set_override(FeatureFlag::Blaze, true).unwrap();
        reg.set_override(FeatureFlag::HomepageSettings, false).unwrap();
    }

    let store = Arc::new(SqliteOverrideStore::open(dir.path()).unwrap());
    let reg = FlagRegistry::new(ctx, store);
    assert!(reg.resolve(FeatureFlag::Blaze));
    assert!(!reg.resolve(FeatureFlag::HomepageSettings));
    assert_eq!(reg.overrides().unwrap().len(), 2);
}

#[test]
fn open_creates_db_and_lock_files() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join(".switchboard");
    let store = SqliteOverrideStore::open(&nested).unwrap();
    assert!(store.db_path().exists());
    assert!(nested.join("overrides.lock").exists());
    assert_eq!(store.schema_version().unwrap(), OVERRIDE_SCHEMA_VERSION);
}

#[test]
fn store_lock_lives_next_to_database() {
    let dir = tempfile::tempdir().unwrap();
    let mut lock = StoreLock::new(dir.path()).unwrap();
    assert_eq!(lock.path(), dir.path().join("overrides.lock"));
    assert!(lock.path().exists());
    drop(lock.write().unwrap());
}

#[test]
fn schema_init_is_idempotent() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    initialize_override_db(&conn).unwrap();
    conn.execute(
        "INSERT INTO flag_overrides (key, value) VALUES ('blaze', 1)",
        [],
    )
    .unwrap();
    initialize_override_db(&conn).unwrap();
    let value: bool = conn
        .query_row("SELECT value FROM flag_overrides WHERE key = 'blaze'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert!(value);
}

#[test]
fn newer_schema_is_rejected() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "user_version", OVERRIDE_SCHEMA_VERSION + 1)
        .unwrap();
    let err = initialize_override_db(&conn).unwrap_err();
    assert!(matches!(err, StoreError::SchemaTooNew { .. }));
}

// ============================================================
// Concurrency
// ============================================================

#[test]
fn concurrent_writers_do_not_lose_updates() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteOverrideStore::open(dir.path()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                for j in 0..10 {
                    store.set(&format!("key_{i}_{j}"), j % 2 == 0).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.entries().unwrap().len(), 80);
}

#[test]
fn two_handles_on_same_dir_share_state() {
    let dir = tempfile::tempdir().unwrap();
    let a = SqliteOverrideStore::open(dir.path()).unwrap();
    let b = SqliteOverrideStore::open(dir.path()).unwrap();

    a.set("blaze", true).unwrap();
    assert_eq!(b.get("blaze").unwrap(), Some(true));
    b.remove("blaze").unwrap();
    assert_eq!(a.get("blaze").unwrap(), None);
}

// ============================================================
// Factory
// ============================================================

#[test]
fn open_store_honors_backend() {
    let dir = tempfile::tempdir().unwrap();

    let memory = StoreConfig {
        backend: Some(StoreBackend::Memory),
        dir: None,
    };
    let s = store::open_store(&memory, dir.path()).unwrap();
    s.set("blaze", true).unwrap();
    assert!(!dir.path().join(".switchboard").exists());

    let sqlite = StoreConfig::default();
    let s = store::open_store(&sqlite, dir.path()).unwrap();
    s.set("blaze", true).unwrap();
    assert!(dir.path().join(".switchboard").join("overrides.db").exists());
}
