//! Configuration loading errors.

use super::error_code::{self, SwitchboardErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl SwitchboardErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            Self::TomlParse(_) => error_code::CONFIG_PARSE_ERROR,
            Self::InvalidValue { .. } => error_code::CONFIG_INVALID_VALUE,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
