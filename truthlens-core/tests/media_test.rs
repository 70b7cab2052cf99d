//! Media checks across both detector response shapes.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use truthlens::config::{DetectorKind, DetectorSettings};
use truthlens::media::{Detector, MediaChecker, MediaDetector, ResponseShape};
use truthlens::pipeline::CannedDetector;
use truthlens::pool::WorkerPool;

fn checker(detector: CannedDetector) -> MediaChecker<CannedDetector> {
    MediaChecker::new(
        Some(Arc::new(detector)),
        "HIVE_API_KEY",
        WorkerPool::default(),
        Duration::from_secs(1),
    )
}

#[test]
fn detector_follows_configured_kind() {
    let mut settings = DetectorSettings {
        kind: DetectorKind::Hive,
        api_key: Some("key".into()),
        endpoint: "https://api.thehive.ai/api/v2/task/sync".into(),
        timeout: Duration::from_secs(30),
    };
    let hive = Detector::from_settings(&settings).unwrap().unwrap();
    assert_eq!(hive.shape(), ResponseShape::ClassifierArray);

    settings.kind = DetectorKind::AiOrNot;
    let aiornot = Detector::from_settings(&settings).unwrap().unwrap();
    assert_eq!(aiornot.shape(), ResponseShape::ConfidenceReport);

    settings.api_key = None;
    assert!(Detector::from_settings(&settings).unwrap().is_none());
}

#[tokio::test]
async fn classifier_array_accepts_video() {
    let body = json!({"status": [{"response": {"output": [
        {"time": 0, "classes": [{"class": "not_ai_generated", "score": 0.1}]},
        {"time": 1, "classes": [{"class": "ai_generated", "score": 0.88}]}
    ]}}]});
    let result = checker(CannedDetector::new(ResponseShape::ClassifierArray, Ok(body)))
        .run_media_check("https://cdn.example/clip.mp4", "video")
        .await
        .unwrap();
    assert!(result.ai_generated);
    assert_eq!(result.confidence, 0.88);
    assert_eq!(result.media_type, "video");
    assert_eq!(result.message, "Likely AI-generated");
}

#[tokio::test]
async fn classifier_array_low_score_reads_uncertain() {
    let body = json!({"status": [{"response": {"output": [
        {"classes": [{"class": "ai_generated", "score": 0.3}]}
    ]}}]});
    let result = checker(CannedDetector::new(ResponseShape::ClassifierArray, Ok(body)))
        .run_media_check("https://cdn.example/a.jpg", "image")
        .await
        .unwrap();
    assert!(!result.ai_generated);
    assert_eq!(result.confidence, 0.3);
    assert_eq!(result.message, "Uncertain");
}

#[tokio::test]
async fn serialized_contract_uses_snake_case_fields() {
    let body = json!({"report": {"verdict": "human", "human": {"confidence": 0.6}}});
    let result = checker(CannedDetector::new(ResponseShape::ConfidenceReport, Ok(body)))
        .run_media_check("https://cdn.example/a.jpg", "image")
        .await
        .unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({"ai_generated": false, "confidence": 0.6, "media_type": "image", "message": "Uncertain"})
    );
}
