use serde::Serialize;

use crate::aggregate::engine::Aggregate;
use crate::catalog::store::ThreatCatalog;
use crate::core::threat::{Implementation, ThreatObject};
use crate::core::types::ThreatId;
use crate::session::selection::SelectionSet;

/// One selectable row in the catalog list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub id: ThreatId,
    pub selected: bool,
}

/// One itemized row in the details panel.
///
/// `search_text` is the lowercase concatenation of everything the row
/// displays, including metadata lines, and is what the view filter matches
/// against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedItem {
    pub id: String,
    pub title: String,
    pub meta: Vec<String>,
    pub search_text: String,
}

impl RenderedItem {
    fn new(id: &str, name: &str, meta: Vec<String>) -> Self {
        let mut search_text = format!("{id} {name}");
        for line in &meta {
            search_text.push(' ');
            search_text.push_str(line);
        }
        Self {
            id: id.to_string(),
            title: name.to_string(),
            meta,
            search_text: search_text.to_lowercase(),
        }
    }
}

/// A details section for one sub-record kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub heading: String,
    pub count: usize,
    pub items: Vec<RenderedItem>,
    /// Explicit empty-state text, present exactly when `items` is empty
    pub empty_marker: Option<String>,
}

/// View model for the details panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsView {
    pub threat_count: usize,
    pub chips: Vec<String>,
    pub objects: SectionView,
    pub implementations: SectionView,
}

/// Pure catalog-list projection; the selected flag is sourced from the
/// selection set.
pub fn render_list(catalog: &ThreatCatalog, selection: &SelectionSet) -> Vec<ListItem> {
    catalog
        .sorted_ids()
        .into_iter()
        .map(|id| {
            let selected = selection.contains(&id);
            ListItem { id, selected }
        })
        .collect()
}

/// Whether the "show selected" action is available.
pub fn show_button_enabled(selection: &SelectionSet) -> bool {
    !selection.is_empty()
}

/// Project an aggregate into the details view model. Pure: no I/O, no state.
pub fn render_details(aggregate: &Aggregate) -> DetailsView {
    let objects = object_section(&aggregate.objects);
    let implementations = implementation_section(&aggregate.implementations);

    DetailsView {
        threat_count: aggregate.selected_threats.len(),
        chips: aggregate
            .selected_threats
            .iter()
            .map(|id| id.as_str().to_string())
            .collect(),
        objects,
        implementations,
    }
}

fn object_section(objects: &[ThreatObject]) -> SectionView {
    let items: Vec<RenderedItem> = objects
        .iter()
        .map(|obj| {
            let meta = obj
                .object_type
                .iter()
                .map(|t| format!("type: {t}"))
                .collect();
            RenderedItem::new(&obj.id, &obj.name, meta)
        })
        .collect();

    SectionView {
        heading: format!("Shared affected objects ({})", items.len()),
        count: items.len(),
        empty_marker: items
            .is_empty()
            .then(|| "No shared objects".to_string()),
        items,
    }
}

fn implementation_section(implementations: &[Implementation]) -> SectionView {
    let items: Vec<RenderedItem> = implementations
        .iter()
        .map(|imp| {
            let mut meta = Vec::new();
            if let Some(category) = &imp.category {
                meta.push(format!("category: {category}"));
            }
            if let Some(risk) = &imp.risk_level {
                meta.push(format!("risk_level: {risk}"));
            }
            RenderedItem::new(&imp.id, &imp.name, meta)
        })
        .collect();

    SectionView {
        heading: format!("Implementation methods ({})", items.len()),
        count: items.len(),
        empty_marker: items
            .is_empty()
            .then(|| "No implementation methods".to_string()),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::engine::aggregate;

    fn catalog() -> ThreatCatalog {
        ThreatCatalog::load_embedded().unwrap()
    }

    #[test]
    fn test_render_list_marks_selection() {
        let catalog = catalog();
        let mut selection = SelectionSet::new();
        selection.toggle(&ThreatId::new("T.2"));

        let list = render_list(&catalog, &selection);
        assert_eq!(list.len(), catalog.len());

        let t2 = list.iter().find(|item| item.id.as_str() == "T.2").unwrap();
        assert!(t2.selected);
        assert!(list.iter().filter(|item| item.selected).count() == 1);
    }

    #[test]
    fn test_show_button_tracks_selection() {
        let mut selection = SelectionSet::new();
        assert!(!show_button_enabled(&selection));

        selection.toggle(&ThreatId::new("T.1"));
        assert!(show_button_enabled(&selection));
    }

    #[test]
    fn test_details_view_counts_and_chips() {
        let catalog = catalog();
        let ids = [ThreatId::new("T.1"), ThreatId::new("T.2")];
        let view = render_details(&aggregate(&ids, &catalog));

        assert_eq!(view.threat_count, 2);
        assert_eq!(view.chips, ["T.1", "T.2"]);
        assert_eq!(view.objects.count, view.objects.items.len());
        assert!(view.objects.empty_marker.is_none());
    }

    #[test]
    fn test_empty_section_gets_marker() {
        let view = render_details(&Aggregate::empty());
        assert_eq!(view.threat_count, 0);
        assert_eq!(
            view.objects.empty_marker.as_deref(),
            Some("No shared objects")
        );
        assert_eq!(
            view.implementations.empty_marker.as_deref(),
            Some("No implementation methods")
        );
    }

    #[test]
    fn test_search_text_includes_metadata() {
        let catalog = catalog();
        let ids = [ThreatId::new("T.1")];
        let view = render_details(&aggregate(&ids, &catalog));

        let phishing = view
            .implementations
            .items
            .iter()
            .find(|item| item.id == "I.1")
            .unwrap();
        assert!(phishing.search_text.contains("risk_level: high"));
        assert!(phishing.search_text.contains("category: social engineering"));
    }
}
