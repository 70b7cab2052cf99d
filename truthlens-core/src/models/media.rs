use serde::{Deserialize, Serialize};

/// Normalized outcome of one media-authenticity check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaCheckResult {
    pub ai_generated: bool,
    pub confidence: f64,
    pub media_type: String,
    pub message: String,
}

/// When a non-generated result counts as "Likely authentic".
///
/// The two detector families report confidence in opposite senses, so each
/// carries its own threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AuthenticThreshold {
    /// Confidence is the detector's certainty in its human verdict.
    Above(f64),
    /// Confidence is the AI-class score; low means authentic.
    Below(f64),
}

pub const LIKELY_AI_THRESHOLD: f64 = 0.8;

impl MediaCheckResult {
    pub fn new(
        ai_generated: bool,
        confidence: f64,
        media_type: impl Into<String>,
        threshold: AuthenticThreshold,
    ) -> Self {
        let confidence = clamp_unit(confidence, 0.0);
        Self {
            ai_generated,
            confidence,
            media_type: media_type.into(),
            message: describe(ai_generated, confidence, threshold).to_string(),
        }
    }

    /// Fixed result for media the active detector cannot inspect.
    pub fn unsupported(media_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ai_generated: false,
            confidence: 0.0,
            media_type: media_type.into(),
            message: message.into(),
        }
    }
}

pub fn describe(ai_generated: bool, confidence: f64, threshold: AuthenticThreshold) -> &'static str {
    if ai_generated {
        if confidence > LIKELY_AI_THRESHOLD {
            "Likely AI-generated"
        } else {
            "Possibly AI-generated"
        }
    } else {
        let authentic = match threshold {
            AuthenticThreshold::Above(t) => confidence > t,
            AuthenticThreshold::Below(t) => confidence < t,
        };
        if authentic {
            "Likely authentic"
        } else {
            "Uncertain"
        }
    }
}

/// Clamp into `[0, 1]`; NaN becomes `fallback`.
pub fn clamp_unit(value: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_follow_thresholds() {
        let above = AuthenticThreshold::Above(0.8);
        let below = AuthenticThreshold::Below(0.2);
        assert_eq!(describe(true, 0.81, above), "Likely AI-generated");
        assert_eq!(describe(true, 0.8, above), "Possibly AI-generated");
        assert_eq!(describe(false, 0.95, above), "Likely authentic");
        assert_eq!(describe(false, 0.5, above), "Uncertain");
        assert_eq!(describe(false, 0.1, below), "Likely authentic");
        assert_eq!(describe(false, 0.3, below), "Uncertain");
        assert_eq!(describe(false, 0.95, below), "Uncertain");
    }

    #[test]
    fn confidence_is_clamped() {
        let result = MediaCheckResult::new(true, 1.7, "image", AuthenticThreshold::Above(0.8));
        assert_eq!(result.confidence, 1.0);
        assert_eq!(clamp_unit(f64::NAN, 0.5), 0.5);
        assert_eq!(clamp_unit(-0.2, 0.5), 0.0);
    }
}
