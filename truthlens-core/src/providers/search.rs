use crate::config::SearchSettings;
use crate::error::ProviderError;
use crate::models::SearchHit;
use crate::pipeline::traits::SearchProvider;
use crate::providers::http::{build_client, read_json};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Brave web search.
pub struct BraveSearch {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<SearchHit>,
}

impl BraveSearch {
    pub fn new(api_key: &str, endpoint: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client()?,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_settings(settings: &SearchSettings) -> Result<Self, ProviderError> {
        Self::new(&settings.api_key, &settings.endpoint)
    }
}

#[async_trait]
impl SearchProvider for BraveSearch {
    async fn search(
        &self,
        query: &str,
        count: u32,
        freshness: &str,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&[
                ("q", query.to_string()),
                ("count", count.to_string()),
                ("freshness", freshness.to_string()),
            ])
            .send()
            .await?;

        let body: BraveResponse = read_json(response).await?;
        Ok(body.web.map(|w| w.results).unwrap_or_default())
    }
}
