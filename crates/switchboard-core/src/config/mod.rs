pub mod build_config;
pub mod logging_config;
pub mod remote_config;
pub mod store_config;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ConfigError, ConfigResult};

pub use build_config::{AppFlavor, BuildConfig, BuildConfiguration, BuildContext};
pub use logging_config::LoggingConfig;
pub use remote_config::RemoteConfig;
pub use store_config::{StoreBackend, StoreConfig};

/// Config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "switchboard.toml";

/// Environment variable that overrides `[build] configuration`.
pub const BUILD_ENV_VAR: &str = "SWITCHBOARD_BUILD";

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SwitchboardConfig {
    pub build: BuildConfig,
    pub store: StoreConfig,
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
}

impl SwitchboardConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load config for a project.
    /// Priority: explicit path > `<root>/switchboard.toml` > defaults,
    /// then `SWITCHBOARD_BUILD` is applied on top.
    pub fn load(root: &Path, explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::load_file(root, explicit)?;
        config.apply_build_override(std::env::var(BUILD_ENV_VAR).ok().as_deref())?;
        Ok(config)
    }

    /// Like [`load`](Self::load) without the `SWITCHBOARD_BUILD` override.
    pub fn load_file(root: &Path, explicit: Option<&Path>) -> ConfigResult<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                candidate.exists().then_some(candidate)
            }
        };

        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                debug!(path = %path.display(), "Loaded switchboard config");
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    /// Replace the build configuration with `value` when present and non-empty.
    pub fn apply_build_override(&mut self, value: Option<&str>) -> ConfigResult<()> {
        if let Some(raw) = value.filter(|v| !v.trim().is_empty()) {
            let configuration: BuildConfiguration = raw.parse()?;
            debug!(%configuration, "Build configuration overridden from environment");
            self.build.configuration = Some(configuration);
        }
        Ok(())
    }

    pub fn build_context(&self) -> BuildContext {
        self.build.context()
    }
}
