//! Feature flags — catalog, resolution and remote matching.
//!
//! ## Components
//! - **catalog** — the 44 flags and their static properties (one table)
//! - **registry** — FlagRegistry: resolve, override, clear, explain
//! - **remote** — server payload matching by remote key

pub mod catalog;
pub mod registry;
pub mod remote;

pub use catalog::{DefaultRule, FeatureFlag, FlagSpec, CATALOG};
pub use registry::{FlagRegistry, Resolution, ValueSource};
pub use remote::{parse_payload, RemoteApplyReport, RemotePayload, RemoteSnapshot};
