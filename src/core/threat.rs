use serde::{Deserialize, Serialize};

/// An affected object contributed by a threat entry.
///
/// Object identifiers are unique across the whole catalog, not just within
/// one entry, so the same object may be contributed by several threats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatObject {
    pub id: String,

    pub name: String,

    /// Object classification (e.g. "server", "database")
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub object_type: Option<String>,
}

/// A way the threat can be realized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implementation {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
}

/// A single selectable threat record.
///
/// Both sub-record sequences keep their declaration order from the catalog
/// file; missing sequences deserialize as empty rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<ThreatObject>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implementations: Vec<Implementation>,
}

impl ThreatEntry {
    pub fn sub_record_count(&self) -> usize {
        self.objects.len() + self.implementations.len()
    }
}
