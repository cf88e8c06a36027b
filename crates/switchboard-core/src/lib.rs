//! # switchboard-core
//!
//! Foundation crate for Switchboard feature flags.
//! Defines the flag catalog, the resolving registry, override stores,
//! config, errors and tracing setup. The CLI depends on this.

pub mod config;
pub mod errors;
pub mod flags;
pub mod store;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{BuildConfiguration, BuildContext, SwitchboardConfig};
pub use errors::error_code::SwitchboardErrorCode;
pub use errors::{ConfigError, FlagError, StoreError};
pub use flags::{FeatureFlag, FlagRegistry, RemoteApplyReport, Resolution, ValueSource};
pub use store::{MemoryOverrideStore, SqliteOverrideStore};
pub use traits::IOverrideStore;
