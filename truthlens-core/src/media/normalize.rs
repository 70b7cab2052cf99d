//! Provider-specific response shapes mapped onto [`MediaCheckResult`].

use crate::models::{clamp_unit, AuthenticThreshold, MediaCheckResult};
use serde_json::Value;

const UNKNOWN_CONFIDENCE: f64 = 0.5;
const AI_CLASS: &str = "ai_generated";
/// Score above which the classifier-array shape counts as AI-generated.
const AI_SCORE_CUTOFF: f64 = 0.5;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResponseShape {
    /// `{"report": {"verdict": "ai"|"human"|"unknown", "ai": {"confidence"}, "human": {"confidence"}}}`
    ConfidenceReport,
    /// `{"status": [{"response": {"output": [{"classes": [{"class", "score"}]}]}}]}`
    ClassifierArray,
}

impl ResponseShape {
    pub fn threshold(&self) -> AuthenticThreshold {
        match self {
            ResponseShape::ConfidenceReport => AuthenticThreshold::Above(0.8),
            ResponseShape::ClassifierArray => AuthenticThreshold::Below(0.2),
        }
    }

    /// Fixed result for media types this shape's provider cannot inspect.
    pub fn reject_unsupported(&self, media_type: &str) -> Option<MediaCheckResult> {
        match self {
            ResponseShape::ConfidenceReport if media_type == "video" => Some(
                MediaCheckResult::unsupported(media_type, "Video detection not available (images only)"),
            ),
            _ => None,
        }
    }

    pub fn normalize(&self, body: &Value, media_type: &str) -> MediaCheckResult {
        let (ai_generated, confidence) = match self {
            ResponseShape::ConfidenceReport => read_confidence_report(body),
            ResponseShape::ClassifierArray => read_classifier_array(body),
        };
        MediaCheckResult::new(ai_generated, confidence, media_type, self.threshold())
    }
}

fn read_confidence_report(body: &Value) -> (bool, f64) {
    let Some(report) = body.get("report") else {
        return (false, UNKNOWN_CONFIDENCE);
    };
    let verdict = report
        .get("verdict")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let confidence = match verdict {
        "ai" | "human" => report
            .get(verdict)
            .and_then(|v| v.get("confidence"))
            .and_then(Value::as_f64)
            .unwrap_or(UNKNOWN_CONFIDENCE),
        _ => UNKNOWN_CONFIDENCE,
    };
    (verdict == "ai", clamp_unit(confidence, UNKNOWN_CONFIDENCE))
}

fn read_classifier_array(body: &Value) -> (bool, f64) {
    let score = body
        .get("status")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|status| status.pointer("/response/output").and_then(Value::as_array))
        .flatten()
        .filter_map(|output| output.get("classes").and_then(Value::as_array))
        .flatten()
        .find(|entry| entry.get("class").and_then(Value::as_str) == Some(AI_CLASS))
        .and_then(|entry| entry.get("score").and_then(Value::as_f64));

    match score {
        Some(score) => {
            let score = clamp_unit(score, 0.0);
            (score > AI_SCORE_CUTOFF, score)
        }
        None => (false, 0.0),
    }
}
