//! Adapter implementations for external services (feature `adapters`)

#[cfg(feature = "reqwest")]
pub mod rest_store;

#[cfg(feature = "reqwest")]
pub use rest_store::{RestColorStore, RestStoreConfig};
