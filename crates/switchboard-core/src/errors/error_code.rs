//! Stable error codes shared by the CLI and any embedding host.

pub const NOT_OVERRIDABLE: &str = "NOT_OVERRIDABLE";
pub const UNKNOWN_FLAG: &str = "UNKNOWN_FLAG";
pub const STORE_ERROR: &str = "STORE_ERROR";
pub const STORE_LOCKED: &str = "STORE_LOCKED";
pub const SCHEMA_MISMATCH: &str = "SCHEMA_MISMATCH";
pub const IO_ERROR: &str = "IO_ERROR";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
pub const CONFIG_INVALID_VALUE: &str = "CONFIG_INVALID_VALUE";
pub const REMOTE_PAYLOAD_INVALID: &str = "REMOTE_PAYLOAD_INVALID";

/// Implemented by every error enum so callers can branch on a string code
/// without matching the concrete type.
pub trait SwitchboardErrorCode {
    fn error_code(&self) -> &'static str;
}
