//! `IOverrideStore` trait — persisted `flag key -> bool` overrides.
//!
//! Keys are plain strings so a store can hold entries written by an older
//! build whose flag no longer exists; the registry decides what they mean.
//! All implementations are object-safe and `Send + Sync`.

use std::sync::Arc;

use crate::errors::StoreError;

/// Key-value override storage.
pub trait IOverrideStore: Send + Sync {
    /// Stored override for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<bool>, StoreError>;

    /// Insert or replace the override for `key`.
    fn set(&self, key: &str, value: bool) -> Result<(), StoreError>;

    /// Delete the override for `key`. Returns whether an entry existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// All stored entries, sorted by key.
    fn entries(&self) -> Result<Vec<(String, bool)>, StoreError>;

    /// Delete every override. Returns the number removed.
    fn clear(&self) -> Result<usize, StoreError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: IOverrideStore + ?Sized> IOverrideStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<bool>, StoreError> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: bool) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        (**self).remove(key)
    }
    fn entries(&self) -> Result<Vec<(String, bool)>, StoreError> {
        (**self).entries()
    }
    fn clear(&self) -> Result<usize, StoreError> {
        (**self).clear()
    }
}
