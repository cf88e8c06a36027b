//! Override store errors (SQLite, file locking, I/O).

use super::error_code::{self, SwitchboardErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("Override store locked: {message}")]
    Locked { message: String },

    #[error("Schema version {found} is newer than supported version {supported}")]
    SchemaTooNew { found: u32, supported: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked) => {
                Self::Locked {
                    message: e.to_string(),
                }
            }
            _ => Self::Sqlite {
                message: e.to_string(),
            },
        }
    }
}

impl SwitchboardErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Sqlite { .. } => error_code::STORE_ERROR,
            Self::Locked { .. } => error_code::STORE_LOCKED,
            Self::SchemaTooNew { .. } => error_code::SCHEMA_MISMATCH,
            Self::Io(_) => error_code::IO_ERROR,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
