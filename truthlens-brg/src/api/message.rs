use serde::{Deserialize, Serialize};
use truthlens::models::{FactCheckResult, MediaCheckResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    FactCheckRequest {
        id: String,
        ts: String,
        payload: FactCheckRequestPayload,
    },
    FactCheckResult {
        id: String,
        ts: String,
        payload: FactCheckResult,
    },
    MediaCheckRequest {
        id: String,
        ts: String,
        payload: MediaCheckRequestPayload,
    },
    MediaCheckResult {
        id: String,
        ts: String,
        payload: MediaCheckResult,
    },
    Health {
        id: String,
        ts: String,
    },
    Status {
        id: String,
        ts: String,
        payload: StatusPayload,
    },
    Error {
        id: String,
        ts: String,
        payload: ErrorPayload,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactCheckRequestPayload {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaCheckRequestPayload {
    pub media_url: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
}

fn default_media_type() -> String {
    "image".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: String,
    pub model: String,
    pub search: String,
    pub media_detection: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// HTTP-style status: 400 bad request, 500 upstream failure, 503 unavailable.
    pub code: u16,
    pub detail: String,
}
