//! Remote override payload location.

use serde::{Deserialize, Serialize};

/// `[remote]` section of switchboard.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RemoteConfig {
    /// JSON file holding the last payload fetched by the host app
    /// (`{"remote_key": bool, ...}`). Absent means no remote layer.
    pub payload_path: Option<String>,
}
