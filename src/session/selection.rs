use crate::core::types::ThreatId;

/// The mutable set of currently chosen threat identifiers.
///
/// Insertion order is preserved because the aggregator's output order is
/// defined by the order in which threats were selected. Selections are
/// small (a user clicking list entries), so membership checks scan the
/// backing vec directly.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    ids: Vec<ThreatId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership; returns the new membership state.
    ///
    /// Toggling the same id twice returns the set to its prior state.
    pub fn toggle(&mut self, id: &ThreatId) -> bool {
        if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.clone());
            true
        }
    }

    pub fn contains(&self, id: &ThreatId) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids in insertion order
    pub fn as_slice(&self) -> &[ThreatId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThreatId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
