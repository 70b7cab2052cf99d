use crate::error::ProviderError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub const USER_AGENT: &str = concat!("TruthLens/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body kept in provider errors and logs.
const ERROR_BODY_CHARS: usize = 500;

pub fn build_client() -> Result<Client, ProviderError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(ProviderError::from)
}

/// Decode a 2xx JSON body, or classify the failure by status code.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::from_status(
            status.as_u16(),
            body.chars().take(ERROR_BODY_CHARS).collect::<String>(),
        ));
    }
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ProviderError::Malformed(e.to_string()))
}
