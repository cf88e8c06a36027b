//! FlagRegistry — central authority for feature flag values.
//!
//! Resolution order: local override (overridable flags only) > remote
//! snapshot > compiled default rule. With no remote snapshot applied the
//! value is exactly `override ?? default`.

use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{BuildContext, SwitchboardConfig};
use crate::errors::{FlagError, FlagResult};
use crate::store::{open_store, MemoryOverrideStore};
use crate::traits::IOverrideStore;

use super::catalog::FeatureFlag;
use super::remote::{parse_payload, RemoteApplyReport, RemotePayload, RemoteSnapshot};

/// Which layer produced a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    LocalOverride,
    Remote,
    Default,
}

impl ValueSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalOverride => "override",
            Self::Remote => "remote",
            Self::Default => "default",
        }
    }
}

/// A resolved flag value and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub flag: FeatureFlag,
    pub value: bool,
    pub source: ValueSource,
    pub default_value: bool,
}

/// Thread-safe flag registry over a shared override store.
pub struct FlagRegistry {
    context: BuildContext,
    store: Arc<dyn IOverrideStore>,
    remote: RwLock<RemoteSnapshot>,
}

impl FlagRegistry {
    pub fn new(context: BuildContext, store: Arc<dyn IOverrideStore>) -> Self {
        Self {
            context,
            store,
            remote: RwLock::new(RemoteSnapshot::default()),
        }
    }

    /// Registry over a fresh in-memory store.
    pub fn in_memory(context: BuildContext) -> Self {
        Self::new(context, Arc::new(MemoryOverrideStore::new()))
    }

    /// Build a registry from config: open the configured store and, when
    /// `[remote] payload_path` is set, apply the cached payload.
    /// A missing or malformed payload is logged and skipped.
    pub fn from_config(config: &SwitchboardConfig, root: &Path) -> FlagResult<Self> {
        let store = open_store(&config.store, root)?;
        let registry = Self::new(config.build_context(), store);

        if let Some(path) = config.remote.payload_path.as_deref() {
            let path = root.join(path);
            match std::fs::read_to_string(&path) {
                Ok(json) => match parse_payload(&json) {
                    Ok(payload) => {
                        registry.apply_remote(&payload);
                    }
                    Err(e) => warn!(path = %path.display(), error = %e, "Ignoring remote payload"),
                },
                Err(e) => debug!(path = %path.display(), error = %e, "No remote payload"),
            }
        }

        Ok(registry)
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Effective value of `flag`. Never fails; store errors fall through
    /// to the next layer.
    pub fn resolve(&self, flag: FeatureFlag) -> bool {
        self.explain(flag).value
    }

    /// Effective value plus the layer that produced it.
    pub fn explain(&self, flag: FeatureFlag) -> Resolution {
        let default_value = self.default_value(flag);

        let (value, source) = if let Some(value) = self.overridden_value(flag) {
            (value, ValueSource::LocalOverride)
        } else if let Some(value) = self.remote_value(flag) {
            (value, ValueSource::Remote)
        } else {
            (default_value, ValueSource::Default)
        };

        Resolution {
            flag,
            value,
            source,
            default_value,
        }
    }

    /// Compiled default only, ignoring overrides and remote values.
    pub fn default_value(&self, flag: FeatureFlag) -> bool {
        flag.default_value(&self.context)
    }

    /// Local override in effect for `flag`. Entries stored for pinned flags
    /// are never in effect.
    pub fn overridden_value(&self, flag: FeatureFlag) -> Option<bool> {
        if !flag.is_overridable() {
            return None;
        }
        match self.store.get(flag.as_str()) {
            Ok(value) => value,
            Err(e) => {
                warn!(flag = flag.as_str(), error = %e, "Override read failed, using fallback");
                None
            }
        }
    }

    /// Record a local override. Pinned flags are rejected and the store is
    /// left untouched. Setting the value already stored is a no-op.
    pub fn set_override(&self, flag: FeatureFlag, value: bool) -> FlagResult<()> {
        if !flag.is_overridable() {
            debug!(flag = flag.as_str(), "Rejected override of pinned flag");
            return Err(FlagError::NotOverridable {
                flag: flag.as_str(),
            });
        }

        if self.store.get(flag.as_str())? == Some(value) {
            return Ok(());
        }

        self.store.set(flag.as_str(), value)?;
        info!(flag = flag.as_str(), value, "Override set");
        Ok(())
    }

    /// Remove any local override. Always succeeds; returns whether one existed.
    pub fn clear_override(&self, flag: FeatureFlag) -> bool {
        match self.store.remove(flag.as_str()) {
            Ok(removed) => {
                if removed {
                    info!(flag = flag.as_str(), "Override cleared");
                }
                removed
            }
            Err(e) => {
                warn!(flag = flag.as_str(), error = %e, "Override clear failed");
                false
            }
        }
    }

    pub fn remote_key(&self, flag: FeatureFlag) -> Option<&'static str> {
        flag.remote_key()
    }

    /// Local overrides for known flags, in catalog order.
    pub fn overrides(&self) -> FlagResult<Vec<(FeatureFlag, bool)>> {
        let mut known: Vec<(FeatureFlag, bool)> = self
            .store
            .entries()?
            .into_iter()
            .filter_map(|(key, value)| FeatureFlag::parse(&key).map(|flag| (flag, value)))
            .collect();
        known.sort_by_key(|(flag, _)| *flag);
        Ok(known)
    }

    /// Remove every stored override. Returns how many were removed.
    pub fn reset_overrides(&self) -> FlagResult<usize> {
        let removed = self.store.clear()?;
        info!(removed, "All overrides cleared");
        Ok(removed)
    }

    /// Delete stored entries that name no known flag or a pinned flag.
    /// Returns the deleted keys.
    pub fn prune_stale_overrides(&self) -> FlagResult<Vec<String>> {
        let mut pruned = Vec::new();
        for (key, _) in self.store.entries()? {
            let stale = match FeatureFlag::parse(&key) {
                Some(flag) => !flag.is_overridable(),
                None => true,
            };
            if stale && self.store.remove(&key)? {
                pruned.push(key);
            }
        }
        if !pruned.is_empty() {
            info!(count = pruned.len(), "Pruned stale overrides");
        }
        Ok(pruned)
    }

    /// Replace the remote layer with values matched from `payload`.
    pub fn apply_remote(&self, payload: &RemotePayload) -> RemoteApplyReport {
        let (snapshot, report) = RemoteSnapshot::from_payload(payload);
        if !report.ignored.is_empty() {
            debug!(ignored = ?report.ignored, "Unmatched remote keys ignored");
        }
        info!(matched = report.matched.len(), "Remote overrides applied");
        *self.remote_write() = snapshot;
        report
    }

    /// Drop the remote layer.
    pub fn clear_remote(&self) {
        *self.remote_write() = RemoteSnapshot::default();
    }

    pub fn remote_value(&self, flag: FeatureFlag) -> Option<bool> {
        self.remote_read().value(flag)
    }

    /// Resolution for every flag, in catalog order.
    pub fn snapshot(&self) -> Vec<Resolution> {
        FeatureFlag::ALL.iter().map(|f| self.explain(*f)).collect()
    }

    // A poisoned snapshot is still a complete snapshot.
    fn remote_read(&self) -> RwLockReadGuard<'_, RemoteSnapshot> {
        self.remote.read().unwrap_or_else(|e| e.into_inner())
    }

    fn remote_write(&self) -> RwLockWriteGuard<'_, RemoteSnapshot> {
        self.remote.write().unwrap_or_else(|e| e.into_inner())
    }
}
