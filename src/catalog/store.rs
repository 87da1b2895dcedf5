use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::threat::ThreatEntry;
use crate::core::types::ThreatId;

/// Load failures are terminal for the session: callers surface the cause
/// inline and never retry automatically.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to fetch catalog: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub threats: HashMap<ThreatId, ThreatEntry>,
}

/// The full threat dataset, loaded once and immutable for the session.
#[derive(Debug)]
pub struct ThreatCatalog {
    threats: HashMap<ThreatId, ThreatEntry>,
}

impl ThreatCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            threats: HashMap::new(),
        }
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Embedded at compile time; validated by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/threats.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Fetch catalog from a remote URL (one-time load, no retry)
    pub fn load_from_url(url: &str) -> Result<Self, CatalogError> {
        let content = reqwest::blocking::get(url)?.error_for_status()?.text()?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            eprintln!(
                "Warning: Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION, data.version
            );
        }

        Ok(Self {
            threats: data.threats,
        })
    }

    /// Get a threat entry by id
    pub fn get(&self, id: &ThreatId) -> Option<&ThreatEntry> {
        self.threats.get(id)
    }

    pub fn contains(&self, id: &ThreatId) -> bool {
        self.threats.contains_key(id)
    }

    /// All threat identifiers in catalog order: ascending numeric ordinal,
    /// with malformed identifiers placed after the numeric ones in
    /// lexicographic order.
    pub fn sorted_ids(&self) -> Vec<ThreatId> {
        let mut ids: Vec<ThreatId> = self.threats.keys().cloned().collect();
        ids.sort_by(ThreatId::catalog_cmp);
        ids
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            threats: self.threats.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of threats in catalog
    pub fn len(&self) -> usize {
        self.threats.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.threats.is_empty()
    }
}

impl Default for ThreatCatalog {
    fn default() -> Self {
        Self::new()
    }
}
