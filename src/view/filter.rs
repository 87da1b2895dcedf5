use crate::view::presenter::RenderedItem;

/// Text shown in place of the item list when a non-empty query matches
/// nothing.
pub const NO_RESULTS_MARKER: &str = "Nothing found";

/// Outcome of applying a live text query over the rendered details.
///
/// `visible` is index-aligned with the input items. At most one no-results
/// marker exists per outcome; recomputing on every keystroke replaces the
/// previous one, so it can never be duplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible: Vec<bool>,
    pub visible_count: usize,
    pub no_matches: bool,
}

impl FilterOutcome {
    pub fn marker(&self) -> Option<&'static str> {
        self.no_matches.then_some(NO_RESULTS_MARKER)
    }
}

/// Case-insensitive substring narrowing over rendered items.
///
/// Matches the item's full visible text, metadata lines included. The
/// underlying aggregate is never touched, so clearing the query restores
/// everything.
pub fn apply_filter(items: &[RenderedItem], query: &str) -> FilterOutcome {
    let needle = query.to_lowercase();

    if needle.is_empty() {
        return FilterOutcome {
            visible: vec![true; items.len()],
            visible_count: items.len(),
            no_matches: false,
        };
    }

    let visible: Vec<bool> = items
        .iter()
        .map(|item| item.search_text.contains(&needle))
        .collect();
    let visible_count = visible.iter().filter(|v| **v).count();

    FilterOutcome {
        visible,
        visible_count,
        no_matches: visible_count == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::engine::aggregate;
    use crate::catalog::store::ThreatCatalog;
    use crate::core::types::ThreatId;
    use crate::view::presenter::render_details;

    fn rendered_items() -> Vec<RenderedItem> {
        let catalog = ThreatCatalog::load_embedded().unwrap();
        let ids = [ThreatId::new("T.1"), ThreatId::new("T.3")];
        let view = render_details(&aggregate(&ids, &catalog));

        let mut items = view.objects.items;
        items.extend(view.implementations.items);
        items
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let items = rendered_items();
        let outcome = apply_filter(&items, "");

        assert_eq!(outcome.visible_count, items.len());
        assert!(outcome.visible.iter().all(|v| *v));
        assert!(!outcome.no_matches);
        assert!(outcome.marker().is_none());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let items = rendered_items();
        let outcome = apply_filter(&items, "RISK_LEVEL: HIGH");
        assert!(outcome.visible_count > 0);
        assert!(!outcome.no_matches);
    }

    #[test]
    fn test_filter_matches_metadata_not_just_titles() {
        let items = rendered_items();
        // "supply chain" only appears in a category metadata line
        let outcome = apply_filter(&items, "supply chain");
        assert!(outcome.visible_count > 0);
    }

    #[test]
    fn test_zero_matches_emit_single_marker() {
        let items = rendered_items();
        let outcome = apply_filter(&items, "zzz-no-such-record");

        assert_eq!(outcome.visible_count, 0);
        assert!(outcome.no_matches);
        assert_eq!(outcome.marker(), Some(NO_RESULTS_MARKER));
    }

    #[test]
    fn test_clearing_query_is_fully_reversible() {
        let items = rendered_items();

        let narrowed = apply_filter(&items, "xyz");
        assert!(narrowed.no_matches);

        // Marker is replaced, not accumulated, and visibility is restored
        let restored = apply_filter(&items, "");
        assert_eq!(restored.visible_count, items.len());
        assert!(restored.marker().is_none());
    }
}
