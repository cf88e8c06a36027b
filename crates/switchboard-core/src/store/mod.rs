//! Override stores.
//!
//! ## Components
//! - **memory** — process-local store, nothing survives a restart
//! - **sqlite** — persistent store in `<dir>/overrides.db`
//! - **migration** — schema creation via `PRAGMA user_version`
//! - **lock** — cross-process writer exclusion via `fd-lock`

pub mod lock;
pub mod memory;
pub mod migration;
pub mod sqlite;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::errors::StoreResult;
use crate::traits::IOverrideStore;

pub use lock::StoreLock;
pub use memory::MemoryOverrideStore;
pub use migration::{get_schema_version, initialize_override_db, OVERRIDE_SCHEMA_VERSION};
pub use sqlite::SqliteOverrideStore;

/// Open the store selected by `[store]`, resolving its directory against `root`.
pub fn open_store(config: &StoreConfig, root: &Path) -> StoreResult<Arc<dyn IOverrideStore>> {
    match config.effective_backend() {
        StoreBackend::Memory => {
            info!("Using in-memory override store");
            Ok(Arc::new(MemoryOverrideStore::new()))
        }
        StoreBackend::Sqlite => {
            let dir = config.effective_dir(root);
            let store = SqliteOverrideStore::open(&dir)?;
            info!(path = %store.db_path().display(), "Opened override store");
            Ok(Arc::new(store))
        }
    }
}
