//! Core data types for threats, their sub-records, and identifiers.

pub mod threat;
pub mod types;

pub use threat::{Implementation, ThreatEntry, ThreatObject};
pub use types::ThreatId;
