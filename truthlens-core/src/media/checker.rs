use crate::error::MediaCheckError;
use crate::media::detector::MediaDetector;
use crate::models::MediaCheckResult;
use crate::pool::WorkerPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Runs one detector call per request and normalizes the reply.
pub struct MediaChecker<D: MediaDetector> {
    detector: Option<Arc<D>>,
    /// Named in the not-configured error, e.g. `AIORNOT_API_KEY`.
    credential: String,
    pool: WorkerPool,
    timeout: Duration,
}

impl<D: MediaDetector> MediaChecker<D> {
    pub fn new(
        detector: Option<Arc<D>>,
        credential: impl Into<String>,
        pool: WorkerPool,
        timeout: Duration,
    ) -> Self {
        Self {
            detector,
            credential: credential.into(),
            pool,
            timeout,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.detector.is_some()
    }

    pub async fn run_media_check(
        &self,
        media_url: &str,
        media_type: &str,
    ) -> Result<MediaCheckResult, MediaCheckError> {
        let Some(detector) = &self.detector else {
            return Err(MediaCheckError::NotConfigured(format!(
                "{} not configured",
                self.credential
            )));
        };

        let shape = detector.shape();
        if let Some(rejected) = shape.reject_unsupported(media_type) {
            warn!(media_type, "media type not supported by detector");
            return Ok(rejected);
        }

        if !media_url.starts_with("http") {
            return Err(MediaCheckError::InvalidMediaUrl(media_url.to_string()));
        }

        let started = Instant::now();
        let body = self
            .pool
            .run(self.timeout, detector.detect(media_url))
            .await
            .map_err(|err| {
                warn!(error = %err, "media detection failed");
                MediaCheckError::from(err)
            })?;

        let result = shape.normalize(&body, media_type);
        info!(
            ai_generated = result.ai_generated,
            confidence = result.confidence,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "media check complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ResponseShape;
    use crate::pipeline::mock::CannedDetector;
    use serde_json::json;

    fn checker(detector: Option<Arc<CannedDetector>>) -> MediaChecker<CannedDetector> {
        MediaChecker::new(detector, "AIORNOT_API_KEY", WorkerPool::new(1), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn unconfigured_detector_is_a_configuration_error() {
        let err = checker(None)
            .run_media_check("https://img.example/a.png", "image")
            .await
            .unwrap_err();
        assert!(matches!(err, MediaCheckError::NotConfigured(_)));
        assert_eq!(err.status_code(), 503);
    }

    #[tokio::test]
    async fn video_is_rejected_without_a_call() {
        let detector = Arc::new(CannedDetector::new(ResponseShape::ConfidenceReport, Ok(json!({}))));
        let result = checker(Some(detector.clone()))
            .run_media_check("https://img.example/a.mp4", "video")
            .await
            .unwrap();
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.media_type, "video");
        assert_eq!(detector.calls(), 0);
    }

    #[tokio::test]
    async fn non_http_url_is_invalid() {
        let detector = Arc::new(CannedDetector::new(ResponseShape::ConfidenceReport, Ok(json!({}))));
        let err = checker(Some(detector.clone()))
            .run_media_check("data:image/png;base64,AAAA", "image")
            .await
            .unwrap_err();
        assert!(matches!(err, MediaCheckError::InvalidMediaUrl(_)));
        assert_eq!(detector.calls(), 0);
    }

    #[tokio::test]
    async fn auth_and_generic_failures_are_distinct() {
        for (status, expected) in [(401, 503), (403, 503), (400, 503), (500, 500)] {
            let detector = Arc::new(CannedDetector::new(ResponseShape::ConfidenceReport, Err(status)));
            let err = checker(Some(detector))
                .run_media_check("https://img.example/a.png", "image")
                .await
                .unwrap_err();
            assert_eq!(err.status_code(), expected, "status {status}");
        }
    }

    #[tokio::test]
    async fn successful_report_is_normalized() {
        let detector = Arc::new(CannedDetector::new(
            ResponseShape::ConfidenceReport,
            Ok(json!({"report": {"verdict": "ai", "ai": {"confidence": 0.91}}})),
        ));
        let result = checker(Some(detector.clone()))
            .run_media_check("https://img.example/a.png", "image")
            .await
            .unwrap();
        assert!(result.ai_generated);
        assert_eq!(result.message, "Likely AI-generated");
        assert_eq!(detector.calls(), 1);
    }
}
