//! Shared traits used across Switchboard crates.

pub mod override_store;

pub use override_store::IOverrideStore;
