//! Schema creation for the override database.
//! Uses PRAGMA user_version tracking.

use rusqlite::Connection;
use tracing::info;

use crate::errors::StoreError;

/// Schema version written by this build.
pub const OVERRIDE_SCHEMA_VERSION: u32 = 1;

/// Override schema SQL — one row per overridden flag.
pub const OVERRIDE_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS flag_overrides (
    key TEXT PRIMARY KEY,
    value INTEGER NOT NULL CHECK (value IN (0, 1)),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
) STRICT;
"#;

/// Apply connection PRAGMAs. Must run on every writer connection.
pub fn configure_connection(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        ",
    )?;
    Ok(())
}

/// Same as [`configure_connection`] plus `query_only` so a reader can never write.
pub fn configure_readonly_connection(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA query_only = ON;
        ",
    )?;
    Ok(())
}

/// Initialize a writer connection with PRAGMAs and the override table.
/// Called every time the store opens — idempotent.
pub fn initialize_override_db(conn: &Connection) -> Result<(), StoreError> {
    configure_connection(conn)?;

    let found = get_schema_version(conn)?;
    if found > OVERRIDE_SCHEMA_VERSION {
        return Err(StoreError::SchemaTooNew {
            found,
            supported: OVERRIDE_SCHEMA_VERSION,
        });
    }

    conn.execute_batch(OVERRIDE_SCHEMA_SQL)?;

    if found < OVERRIDE_SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", OVERRIDE_SCHEMA_VERSION)?;
        info!(
            from = found,
            to = OVERRIDE_SCHEMA_VERSION,
            "Override schema migrated"
        );
    }

    Ok(())
}

/// Current `PRAGMA user_version`.
pub fn get_schema_version(conn: &Connection) -> Result<u32, StoreError> {
    let version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
