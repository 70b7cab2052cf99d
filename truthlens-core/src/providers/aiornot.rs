use crate::error::ProviderError;
use crate::providers::http::{build_client, read_json};
use reqwest::Client;
use serde_json::{json, Value};

/// AI or Not image report endpoint. Replies in the confidence-report shape.
pub struct AiOrNotClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl AiOrNotClient {
    pub fn new(api_key: &str, endpoint: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client()?,
            endpoint: endpoint.to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    pub async fn detect(&self, media_url: &str) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({ "object": media_url }))
            .send()
            .await?;
        read_json(response).await
    }
}
