use crate::config::{DetectorKind, DetectorSettings};
use crate::error::ProviderError;
use crate::media::normalize::ResponseShape;
use crate::providers::{AiOrNotClient, HiveClient};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait MediaDetector: Send + Sync {
    /// Response shape this detector returns, which decides normalization.
    fn shape(&self) -> ResponseShape;

    async fn detect(&self, media_url: &str) -> Result<Value, ProviderError>;
}

/// The configured detection service. Exactly one variant is active per process.
pub enum Detector {
    AiOrNot(AiOrNotClient),
    Hive(HiveClient),
}

impl Detector {
    /// `Ok(None)` when the selected service has no usable API key.
    pub fn from_settings(settings: &DetectorSettings) -> Result<Option<Self>, ProviderError> {
        let Some(key) = settings.api_key.as_deref() else {
            return Ok(None);
        };
        let detector = match settings.kind {
            DetectorKind::AiOrNot => {
                Detector::AiOrNot(AiOrNotClient::new(key, &settings.endpoint)?)
            }
            DetectorKind::Hive => Detector::Hive(HiveClient::new(key, &settings.endpoint)?),
        };
        Ok(Some(detector))
    }

    /// Environment variable holding this service's credential.
    pub fn credential_name(kind: DetectorKind) -> &'static str {
        match kind {
            DetectorKind::AiOrNot => "AIORNOT_API_KEY",
            DetectorKind::Hive => "HIVE_API_KEY",
        }
    }
}

#[async_trait]
impl MediaDetector for Detector {
    fn shape(&self) -> ResponseShape {
        match self {
            Detector::AiOrNot(_) => ResponseShape::ConfidenceReport,
            Detector::Hive(_) => ResponseShape::ClassifierArray,
        }
    }

    async fn detect(&self, media_url: &str) -> Result<Value, ProviderError> {
        match self {
            Detector::AiOrNot(c) => c.detect(media_url).await,
            Detector::Hive(c) => c.detect(media_url).await,
        }
    }
}
