//! # threat-browser
//!
//! A library for browsing a catalog of threat records and aggregating the
//! sub-records they contribute.
//!
//! Each catalog entry ("threat") carries two ordered sequences of
//! sub-records: affected objects and implementation methods. Users select
//! any number of entries and view the combined, de-duplicated union of
//! everything the selection contributes. When several selected threats
//! contribute a sub-record with the same identifier, the first selected
//! contributor's fields win and later duplicates are dropped whole.
//!
//! ## Example
//!
//! ```rust,no_run
//! use threat_browser::{aggregate, ThreatCatalog, ThreatId};
//!
//! // Load the embedded threat catalog
//! let catalog = ThreatCatalog::load_embedded().unwrap();
//!
//! // Combine two threats' sub-records, de-duplicated, first writer wins
//! let ids = [ThreatId::new("T.1"), ThreatId::new("T.2")];
//! let combined = aggregate(&ids, &catalog);
//!
//! for obj in &combined.objects {
//!     println!("{}: {}", obj.id, obj.name);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Threat catalog storage and loading
//! - [`core`]: Core data types for threats and sub-records
//! - [`aggregate`]: The de-duplicating selection merge
//! - [`session`]: Selection set and browsing-session state machine
//! - [`view`]: Pure presenter view models and the live text filter
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based catalog browsing

pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod session;
pub mod view;
pub mod web;

// Re-export commonly used types for convenience
pub use aggregate::engine::{aggregate, Aggregate, CatalogAccess};
pub use aggregate::DetailsProvider;
pub use catalog::store::{CatalogError, ThreatCatalog};
pub use core::threat::{Implementation, ThreatEntry, ThreatObject};
pub use core::types::ThreatId;
pub use session::selection::SelectionSet;
pub use session::{SessionContext, SessionError, SessionPhase};
