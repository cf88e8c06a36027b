//! Remote overrides — server-pushed values keyed by each flag's remote key.
//!
//! The fetch itself belongs to the host app. This module only matches a
//! payload against the catalog. Keys that name no flag (stale or from a
//! newer server) are reported and ignored, never an error.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::errors::{FlagError, FlagResult};

use super::catalog::FeatureFlag;

/// `remote key -> value` as delivered by the server.
pub type RemotePayload = BTreeMap<String, bool>;

/// Parse a JSON object into a payload. Non-boolean values are skipped.
pub fn parse_payload(json: &str) -> FlagResult<RemotePayload> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| FlagError::RemotePayload {
            message: e.to_string(),
        })?;

    let object = value.as_object().ok_or_else(|| FlagError::RemotePayload {
        message: "expected a JSON object of remote key to boolean".to_string(),
    })?;

    let mut payload = RemotePayload::new();
    for (key, value) in object {
        match value.as_bool() {
            Some(b) => {
                payload.insert(key.clone(), b);
            }
            None => debug!(key = %key, "Skipping non-boolean remote value"),
        }
    }
    Ok(payload)
}

/// Outcome of matching a payload against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoteApplyReport {
    pub matched: Vec<FeatureFlag>,
    pub ignored: Vec<String>,
}

/// Remote values resolved to flags.
#[derive(Debug, Clone, Default)]
pub struct RemoteSnapshot {
    values: FxHashMap<FeatureFlag, bool>,
}

impl RemoteSnapshot {
    pub fn from_payload(payload: &RemotePayload) -> (Self, RemoteApplyReport) {
        let mut values = FxHashMap::default();
        let mut report = RemoteApplyReport::default();

        for (key, value) in payload {
            match FeatureFlag::from_remote_key(key) {
                Some(flag) => {
                    values.insert(flag, *value);
                    report.matched.push(flag);
                }
                None => report.ignored.push(key.clone()),
            }
        }

        report.matched.sort();
        (Self { values }, report)
    }

    pub fn value(&self, flag: FeatureFlag) -> Option<bool> {
        self.values.get(&flag).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
