use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::store::ThreatCatalog;
use crate::core::threat::{Implementation, ThreatEntry, ThreatObject};
use crate::core::types::ThreatId;

/// Read access to per-threat records.
///
/// The merge below is written once against this trait, so it works the same
/// whether entries come from the embedded dataset, a file, or a fetched
/// remote document.
pub trait CatalogAccess {
    fn entry(&self, id: &ThreatId) -> Option<&ThreatEntry>;
}

impl CatalogAccess for ThreatCatalog {
    fn entry(&self, id: &ThreatId) -> Option<&ThreatEntry> {
        self.get(id)
    }
}

/// De-duplicated union of sub-records across the selected threats.
///
/// Ephemeral: recomputed from catalog + selection on every show action and
/// discarded on the next selection change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// The requested identifiers, echoed verbatim in request order
    pub selected_threats: Vec<ThreatId>,

    /// Affected objects in first-insertion order
    pub objects: Vec<ThreatObject>,

    /// Implementations in first-insertion order
    pub implementations: Vec<Implementation>,
}

impl Aggregate {
    pub fn empty() -> Self {
        Self {
            selected_threats: Vec::new(),
            objects: Vec::new(),
            implementations: Vec::new(),
        }
    }
}

/// Merge the sub-records of the given threats into a single [`Aggregate`].
///
/// For each id in the given order, sub-records are inserted in their
/// entry-declaration order only if their identifier has not been seen yet:
/// first writer wins, later duplicates are dropped whole, never merged
/// field-by-field. Unknown ids are skipped; an empty input yields an empty
/// aggregate (callers gate the user-facing "select at least one threat"
/// precondition before getting here).
pub fn aggregate(ids: &[ThreatId], source: &impl CatalogAccess) -> Aggregate {
    let mut objects: IndexMap<String, ThreatObject> = IndexMap::new();
    let mut implementations: IndexMap<String, Implementation> = IndexMap::new();

    for id in ids {
        let Some(entry) = source.entry(id) else {
            tracing::debug!("skipping unknown threat id {id}");
            continue;
        };

        for obj in &entry.objects {
            if !objects.contains_key(&obj.id) {
                objects.insert(obj.id.clone(), obj.clone());
            }
        }

        for imp in &entry.implementations {
            if !implementations.contains_key(&imp.id) {
                implementations.insert(imp.id.clone(), imp.clone());
            }
        }
    }

    Aggregate {
        selected_threats: ids.to_vec(),
        objects: objects.into_values().collect(),
        implementations: implementations.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::ThreatCatalog;

    fn two_entry_catalog() -> ThreatCatalog {
        // T.1 and T.2 both contribute an object with id O1 but different names
        ThreatCatalog::from_json(
            r#"{
                "version": "1.0.0",
                "created_at": "2026-01-01T00:00:00Z",
                "threats": {
                    "T.1": {
                        "objects": [{ "id": "O1", "name": "Server" }],
                        "implementations": [{ "id": "I1", "name": "Phishing" }]
                    },
                    "T.2": {
                        "objects": [
                            { "id": "O1", "name": "ServerDup" },
                            { "id": "O2", "name": "DB" }
                        ]
                    }
                }
            }"#,
        )
        .unwrap()
    }

    fn ids(raw: &[&str]) -> Vec<ThreatId> {
        raw.iter().map(|s| ThreatId::new(*s)).collect()
    }

    #[test]
    fn test_first_writer_wins_across_entries() {
        let catalog = two_entry_catalog();

        let result = aggregate(&ids(&["T.1", "T.2"]), &catalog);
        assert_eq!(result.selected_threats, ids(&["T.1", "T.2"]));
        let names: Vec<&str> = result.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Server", "DB"]);
        let impls: Vec<&str> = result
            .implementations
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(impls, ["Phishing"]);
    }

    #[test]
    fn test_order_dependence_of_duplicate_fields() {
        let catalog = two_entry_catalog();

        // Same sub-record set either way, but the winner's fields differ
        let forward = aggregate(&ids(&["T.1", "T.2"]), &catalog);
        let reverse = aggregate(&ids(&["T.2", "T.1"]), &catalog);

        let o1_forward = forward.objects.iter().find(|o| o.id == "O1").unwrap();
        let o1_reverse = reverse.objects.iter().find(|o| o.id == "O1").unwrap();
        assert_eq!(o1_forward.name, "Server");
        assert_eq!(o1_reverse.name, "ServerDup");

        let mut fwd_ids: Vec<&str> = forward.objects.iter().map(|o| o.id.as_str()).collect();
        let mut rev_ids: Vec<&str> = reverse.objects.iter().map(|o| o.id.as_str()).collect();
        fwd_ids.sort_unstable();
        rev_ids.sort_unstable();
        assert_eq!(fwd_ids, rev_ids);
    }

    #[test]
    fn test_duplicate_identifier_appears_once() {
        let catalog = two_entry_catalog();
        let result = aggregate(&ids(&["T.1", "T.2"]), &catalog);
        let o1_count = result.objects.iter().filter(|o| o.id == "O1").count();
        assert_eq!(o1_count, 1);
    }

    #[test]
    fn test_empty_input_yields_empty_aggregate() {
        let catalog = two_entry_catalog();
        let result = aggregate(&[], &catalog);
        assert!(result.selected_threats.is_empty());
        assert!(result.objects.is_empty());
        assert!(result.implementations.is_empty());
    }

    #[test]
    fn test_unknown_ids_are_skipped_not_errors() {
        let catalog = two_entry_catalog();
        let result = aggregate(&ids(&["T.404", "T.2"]), &catalog);

        // The input sequence is echoed verbatim, including the unknown id
        assert_eq!(result.selected_threats, ids(&["T.404", "T.2"]));
        let names: Vec<&str> = result.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["ServerDup", "DB"]);
    }

    #[test]
    fn test_missing_sequences_treated_as_empty() {
        let catalog = ThreatCatalog::from_json(
            r#"{
                "version": "1.0.0",
                "created_at": "2026-01-01T00:00:00Z",
                "threats": { "T.1": { "name": "bare" } }
            }"#,
        )
        .unwrap();

        let result = aggregate(&ids(&["T.1"]), &catalog);
        assert!(result.objects.is_empty());
        assert!(result.implementations.is_empty());
        assert_eq!(result.selected_threats.len(), 1);
    }

    #[test]
    fn test_duplicate_input_ids_echoed_verbatim() {
        // Callers are expected to pass a set; the engine does not second-guess
        let catalog = two_entry_catalog();
        let result = aggregate(&ids(&["T.1", "T.1"]), &catalog);
        assert_eq!(result.selected_threats.len(), 2);
        assert_eq!(result.objects.len(), 1);
    }
}
