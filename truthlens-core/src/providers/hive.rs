use crate::error::ProviderError;
use crate::providers::http::{build_client, read_json};
use reqwest::Client;
use serde_json::{json, Value};

/// Hive synchronous task endpoint. Replies in the classifier-array shape.
pub struct HiveClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HiveClient {
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
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Accept", "application/json")
            .json(&json!({ "url": media_url }))
            .send()
            .await?;
        read_json(response).await
    }
}
