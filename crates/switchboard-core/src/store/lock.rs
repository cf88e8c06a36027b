//! Store locking via fd-lock.
//! Exclusive write locks keep two processes from interleaving override writes.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fd_lock::{RwLock, RwLockWriteGuard};

use crate::errors::StoreError;

/// Advisory lock file at `<dir>/overrides.lock`.
pub struct StoreLock {
    lock_file: RwLock<File>,
    lock_path: PathBuf,
}

impl StoreLock {
    pub fn new(dir: &Path) -> Result<Self, StoreError> {
        let lock_path = dir.join("overrides.lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        Ok(Self {
            lock_file: RwLock::new(file),
            lock_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.lock_path
    }

    /// Acquire the exclusive write lock, blocking until other writers finish.
    pub fn write(&mut self) -> Result<RwLockWriteGuard<'_, File>, StoreError> {
        self.lock_file.write().map_err(StoreError::from)
    }
}
