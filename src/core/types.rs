use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Unique identifier for a threat in the catalog.
///
/// Identifiers follow the `"<prefix>.<ordinal>"` convention (e.g. `"T.12"`);
/// the numeric ordinal drives catalog sort order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreatId(pub String);

impl ThreatId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric ordinal parsed from the suffix after the first delimiter.
    ///
    /// `"T.12"` yields `Some(12)`; identifiers with a missing or non-numeric
    /// suffix yield `None`.
    pub fn ordinal(&self) -> Option<u64> {
        self.0.split_once('.').and_then(|(_, tail)| tail.parse().ok())
    }

    /// Catalog ordering: numeric ordinal first, malformed identifiers after
    /// all numeric ones, ties broken lexicographically on the full id.
    pub fn catalog_cmp(&self, other: &Self) -> Ordering {
        match (self.ordinal(), other.ordinal()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl std::fmt::Display for ThreatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ThreatId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
