//! In-memory override store. Used by tests and by hosts that manage
//! persistence themselves.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;

use crate::errors::StoreError;
use crate::traits::IOverrideStore;

#[derive(Debug, Default)]
pub struct MemoryOverrideStore {
    entries: RwLock<FxHashMap<String, bool>>,
}

impl MemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, e.g. for fixtures.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    // A poisoned map is still a valid map of bools.
    fn read(&self) -> RwLockReadGuard<'_, FxHashMap<String, bool>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FxHashMap<String, bool>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl IOverrideStore for MemoryOverrideStore {
    fn get(&self, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(self.read().get(key).copied())
    }

    fn set(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.write().remove(key).is_some())
    }

    fn entries(&self) -> Result<Vec<(String, bool)>, StoreError> {
        let mut entries: Vec<(String, bool)> =
            self.read().iter().map(|(k, v)| (k.clone(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    fn clear(&self) -> Result<usize, StoreError> {
        let mut map = self.write();
        let removed = map.len();
        map.clear();
        Ok(removed)
    }
}
