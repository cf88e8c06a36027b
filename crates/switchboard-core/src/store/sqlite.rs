//! `SqliteOverrideStore` — persistent `IOverrideStore` backed by SQLite.
//!
//! One writer connection behind a mutex plus one read-only connection.
//! Every write also holds the `overrides.lock` file lock, so writes from
//! separate processes are serialized. Readers never take the file lock and
//! see the last committed state (WAL).

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::debug;

use crate::errors::StoreError;
use crate::traits::IOverrideStore;

use super::lock::StoreLock;
use super::migration::{configure_readonly_connection, get_schema_version, initialize_override_db};

/// File name of the override database inside the store directory.
pub const DB_FILE_NAME: &str = "overrides.db";

struct Writer {
    conn: Connection,
    lock: Option<StoreLock>,
}

pub struct SqliteOverrideStore {
    writer: Mutex<Writer>,
    /// `None` for in-memory stores; reads then go through the writer.
    reader: Option<Mutex<Connection>>,
    db_path: PathBuf,
}

impl SqliteOverrideStore {
    /// Open (creating if needed) `<dir>/overrides.db`.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        let db_path = dir.join(DB_FILE_NAME);

        let mut lock = StoreLock::new(dir)?;
        let conn = Connection::open(&db_path)?;
        {
            // Schema setup is a write.
            let _guard = lock.write()?;
            initialize_override_db(&conn)?;
        }

        let reader = Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        configure_readonly_connection(&reader)?;
        debug!(
            db = %db_path.display(),
            lock = %lock.path().display(),
            "Opened override store"
        );

        Ok(Self {
            writer: Mutex::new(Writer {
                conn,
                lock: Some(lock),
            }),
            reader: Some(Mutex::new(reader)),
            db_path,
        })
    }

    /// Non-persistent store with the same SQL behavior, for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        initialize_override_db(&conn)?;
        Ok(Self {
            writer: Mutex::new(Writer { conn, lock: None }),
            reader: None,
            db_path: PathBuf::from(":memory:"),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn schema_version(&self) -> Result<u32, StoreError> {
        self.with_reader(get_schema_version)
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, Writer>, StoreError> {
        self.writer.lock().map_err(|_| StoreError::Locked {
            message: "override writer mutex poisoned".to_string(),
        })
    }

    fn with_writer<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut writer = self.lock_writer()?;
        let Writer { conn, lock } = &mut *writer;
        match lock {
            Some(lock) => {
                let _guard = lock.write()?;
                f(&*conn)
            }
            None => f(&*conn),
        }
    }

    fn with_reader<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        match &self.reader {
            Some(reader) => {
                let conn = reader.lock().map_err(|_| StoreError::Locked {
                    message: "override reader mutex poisoned".to_string(),
                })?;
                f(&conn)
            }
            None => {
                let writer = self.lock_writer()?;
                f(&writer.conn)
            }
        }
    }
}

impl IOverrideStore for SqliteOverrideStore {
    fn get(&self, key: &str) -> Result<Option<bool>, StoreError> {
        self.with_reader(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM flag_overrides WHERE key = ?1",
                    [key],
                    |row| row.get::<_, bool>(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.with_writer(|conn| {
            conn.execute(
                "INSERT INTO flag_overrides (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE
                 SET value = excluded.value, updated_at = datetime('now')",
                params![key, value],
            )?;
            debug!(key, value, "Override written");
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        self.with_writer(|conn| {
            let removed = conn.execute("DELETE FROM flag_overrides WHERE key = ?1", [key])?;
            Ok(removed > 0)
        })
    }

    fn entries(&self) -> Result<Vec<(String, bool)>, StoreError> {
        self.with_reader(|conn| {
            let mut stmt = conn.prepare("SELECT key, value FROM flag_overrides ORDER BY key")?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?))
            })?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
    }

    fn clear(&self) -> Result<usize, StoreError> {
        self.with_writer(|conn| Ok(conn.execute("DELETE FROM flag_overrides", [])?))
    }
}
