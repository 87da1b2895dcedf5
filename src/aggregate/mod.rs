//! Selection aggregation: the de-duplicating merge of sub-records across
//! selected threats.
//!
//! The merge runs exactly once per explicit "show selected" action, never
//! incrementally on each toggle, so toggling stays O(1). A single
//! implementation serves both catalog shapes: raw per-entry data merged
//! locally, or a details endpoint that returns pre-merged results.

pub mod engine;
pub mod remote;

pub use engine::{aggregate, Aggregate, CatalogAccess};
pub use remote::RemoteCatalog;

use crate::core::types::ThreatId;

/// A collaborator that can produce combined details for a set of threats.
pub trait DetailsProvider {
    fn combined_details(&self, ids: &[ThreatId]) -> anyhow::Result<Aggregate>;
}

impl DetailsProvider for crate::catalog::store::ThreatCatalog {
    fn combined_details(&self, ids: &[ThreatId]) -> anyhow::Result<Aggregate> {
        Ok(engine::aggregate(ids, self))
    }
}
