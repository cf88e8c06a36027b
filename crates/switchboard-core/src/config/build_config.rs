//! Build configuration — the release channel and app flavor that default
//! rules are evaluated against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Release channel the application was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildConfiguration {
    /// Built locally by a developer.
    LocalDeveloper,
    /// Internal build from a feature branch.
    BranchTest,
    /// Internal pre-release testing build.
    PrereleaseTesting,
    /// Public store release.
    AppStore,
}

impl BuildConfiguration {
    pub const ALL: [BuildConfiguration; 4] = [
        Self::LocalDeveloper,
        Self::BranchTest,
        Self::PrereleaseTesting,
        Self::AppStore,
    ];

    /// The channel implied by how this binary was compiled.
    /// Debug builds are local developer builds; release builds are store builds.
    pub fn compiled() -> Self {
        if cfg!(debug_assertions) {
            Self::LocalDeveloper
        } else {
            Self::AppStore
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalDeveloper => "local_developer",
            Self::BranchTest => "branch_test",
            Self::PrereleaseTesting => "prerelease_testing",
            Self::AppStore => "app_store",
        }
    }

    /// Internal channels (everything except the public release).
    pub fn is_internal(&self) -> bool {
        !matches!(self, Self::AppStore)
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildConfiguration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local_developer" | "local" | "debug" => Ok(Self::LocalDeveloper),
            "branch_test" => Ok(Self::BranchTest),
            "prerelease_testing" | "prerelease" => Ok(Self::PrereleaseTesting),
            "app_store" | "release" => Ok(Self::AppStore),
            other => Err(ConfigError::InvalidValue {
                field: "build.configuration",
                value: other.to_string(),
            }),
        }
    }
}

/// Which of the two app flavors is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppFlavor {
    #[default]
    #[serde(rename = "wordpress", alias = "word_press")]
    WordPress,
    Jetpack,
}

impl AppFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WordPress => "wordpress",
            Self::Jetpack => "jetpack",
        }
    }
}

impl FromStr for AppFlavor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wordpress" | "word_press" => Ok(Self::WordPress),
            "jetpack" => Ok(Self::Jetpack),
            other => Err(ConfigError::InvalidValue {
                field: "build.app",
                value: other.to_string(),
            }),
        }
    }
}

/// `[build]` section of switchboard.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BuildConfig {
    /// Release channel. Default: derived from the compilation profile.
    pub configuration: Option<BuildConfiguration>,
    /// App flavor. Default: wordpress.
    pub app: Option<AppFlavor>,
    /// Whether the app configuration ships the stats revamp. Default: false.
    pub stats_revamp_v2: Option<bool>,
}

impl BuildConfig {
    pub fn effective_configuration(&self) -> BuildConfiguration {
        self.configuration.unwrap_or_else(BuildConfiguration::compiled)
    }

    pub fn effective_app(&self) -> AppFlavor {
        self.app.unwrap_or_default()
    }

    pub fn effective_stats_revamp_v2(&self) -> bool {
        self.stats_revamp_v2.unwrap_or(false)
    }

    /// Resolve all optional fields into the context default rules read.
    pub fn context(&self) -> BuildContext {
        BuildContext {
            configuration: self.effective_configuration(),
            app: self.effective_app(),
            stats_revamp_v2: self.effective_stats_revamp_v2(),
        }
    }
}

/// Everything a default rule may consult. Plain data, cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildContext {
    pub configuration: BuildConfiguration,
    pub app: AppFlavor,
    pub stats_revamp_v2: bool,
}

impl BuildContext {
    pub fn new(configuration: BuildConfiguration) -> Self {
        Self {
            configuration,
            app: AppFlavor::WordPress,
            stats_revamp_v2: false,
        }
    }

    pub fn with_app(mut self, app: AppFlavor) -> Self {
        self.app = app;
        self
    }

    pub fn with_stats_revamp_v2(mut self, enabled: bool) -> Self {
        self.stats_revamp_v2 = enabled;
        self
    }

    pub fn is_jetpack(&self) -> bool {
        self.app == AppFlavor::Jetpack
    }
}
