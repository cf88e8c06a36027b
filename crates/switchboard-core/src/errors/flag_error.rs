//! Errors raised by flag lookup and override mutation.

use super::error_code::{self, SwitchboardErrorCode};
use super::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum FlagError {
    #[error("Flag '{flag}' is pinned and cannot be overridden")]
    NotOverridable { flag: &'static str },

    #[error("Unknown feature flag: {key}")]
    UnknownFlag { key: String },

    #[error("Remote payload invalid: {message}")]
    RemotePayload { message: String },

    #[error("Override store error: {0}")]
    Store(#[from] StoreError),
}

impl SwitchboardErrorCode for FlagError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotOverridable { .. } => error_code::NOT_OVERRIDABLE,
            Self::UnknownFlag { .. } => error_code::UNKNOWN_FLAG,
            Self::RemotePayload { .. } => error_code::REMOTE_PAYLOAD_INVALID,
            Self::Store(e) => e.error_code(),
        }
    }
}

pub type FlagResult<T> = Result<T, FlagError>;
