//! Threat catalog storage.
//!
//! The catalog is loaded exactly once per session, either from the embedded
//! dataset, a local JSON file, or a remote URL, and is immutable afterwards.

pub mod store;

pub use store::{CatalogError, ThreatCatalog};
