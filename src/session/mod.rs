//! Browsing session state.
//!
//! A [`SessionContext`] owns the loaded catalog and the live selection for
//! one browsing session. It only exists once a catalog has loaded
//! successfully, so the load lifecycle (idle, loading, ready) is enforced by
//! construction: a failed load never produces a context, and the failure is
//! surfaced inline with no retry.

pub mod selection;

use thiserror::Error;

use crate::aggregate::engine::{aggregate, Aggregate};
use crate::catalog::store::ThreatCatalog;
use crate::core::types::ThreatId;
use selection::SelectionSet;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// User pressed "show" without selecting anything. Recoverable:
    /// surfaced as an inline prompt, never a crash.
    #[error("Select at least one threat")]
    EmptySelection,
}

/// Where the session currently is within the ready state.
///
/// Any toggle after details were shown drops back to `HasSelection` (or
/// `NoSelection`), so stale details are never left on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NoSelection,
    HasSelection,
    DetailsShown,
}

/// Session state: loaded catalog plus the mutable selection.
///
/// An explicit context object rather than ambient globals; created after a
/// successful load, dropped when the session ends.
#[derive(Debug)]
pub struct SessionContext {
    catalog: ThreatCatalog,
    selection: SelectionSet,
    phase: SessionPhase,
}

impl SessionContext {
    pub fn new(catalog: ThreatCatalog) -> Self {
        Self {
            catalog,
            selection: SelectionSet::new(),
            phase: SessionPhase::NoSelection,
        }
    }

    pub fn catalog(&self) -> &ThreatCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Toggle a threat in or out of the selection.
    ///
    /// Unknown identifiers are a silent no-op: they can only arise from
    /// stale display state, so they are logged at debug and never surfaced.
    /// Returns the new membership state, or `None` for unknown ids.
    pub fn toggle(&mut self, id: &ThreatId) -> Option<bool> {
        if !self.catalog.contains(id) {
            tracing::debug!("ignoring toggle for unknown threat id {id}");
            return None;
        }

        let selected = self.selection.toggle(id);
        self.phase = if self.selection.is_empty() {
            SessionPhase::NoSelection
        } else {
            SessionPhase::HasSelection
        };
        Some(selected)
    }

    /// Explicit clear action: empties the selection and resets the details
    /// panel to its prompt state.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.phase = SessionPhase::NoSelection;
    }

    /// The explicit "show selected" action.
    ///
    /// Recomputes the aggregate from catalog + selection; the result is
    /// ephemeral and is invalidated by the next toggle or clear.
    pub fn show_details(&mut self) -> Result<Aggregate, SessionError> {
        if self.selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let result = aggregate(self.selection.as_slice(), &self.catalog);
        self.phase = SessionPhase::DetailsShown;
        Ok(result)
    }
}
