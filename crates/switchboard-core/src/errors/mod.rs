//! Error types for every Switchboard subsystem.
//! Each enum maps to a stable code via [`SwitchboardErrorCode`].

pub mod error_code;

mod config_error;
mod flag_error;
mod store_error;

pub use config_error::{ConfigError, ConfigResult};
pub use error_code::SwitchboardErrorCode;
pub use flag_error::{FlagError, FlagResult};
pub use store_error::{StoreError, StoreResult};
