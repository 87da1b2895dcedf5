use serde::Deserialize;

use crate::aggregate::engine::Aggregate;
use crate::aggregate::DetailsProvider;
use crate::core::types::ThreatId;

/// Client for a server that exposes the two-endpoint catalog interface:
/// a list endpoint returning threat identifiers and a details endpoint
/// returning pre-aggregated results for a comma-joined id set.
///
/// Because the server already performs the merge, [`DetailsProvider`] for
/// this type is a pass-through.
pub struct RemoteCatalog {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct ListResponse {
    threats: Vec<ThreatId>,
}

impl RemoteCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Fetch the sorted threat id list from the server.
    pub fn list_ids(&self) -> anyhow::Result<Vec<ThreatId>> {
        let url = format!("{}/api/threats", self.base_url);
        let response: ListResponse = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response.threats)
    }
}

impl DetailsProvider for RemoteCatalog {
    fn combined_details(&self, ids: &[ThreatId]) -> anyhow::Result<Aggregate> {
        let joined = ids
            .iter()
            .map(ThreatId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let url = format!("{}/api/details", self.base_url);
        let aggregate: Aggregate = self
            .client
            .get(&url)
            .query(&[("ids", joined.as_str())])
            .send()?
            .error_for_status()?
            .json()?;
        Ok(aggregate)
    }
}
