//! Override store configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which override store backs the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

/// `[store]` section of switchboard.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend. Default: sqlite.
    pub backend: Option<StoreBackend>,
    /// Directory holding overrides.db and overrides.lock. Default: ".switchboard".
    pub dir: Option<String>,
}

impl StoreConfig {
    pub fn effective_backend(&self) -> StoreBackend {
        self.backend.unwrap_or_default()
    }

    /// Store directory, resolved against `root` when relative.
    pub fn effective_dir(&self, root: &Path) -> PathBuf {
        let dir = self.dir.as_deref().unwrap_or(".switchboard");
        let path = Path::new(dir);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }
}
