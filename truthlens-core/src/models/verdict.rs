use crate::models::evidence::EvidenceSet;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum VerdictLabel {
    True,
    False,
    Misleading,
    Unverifiable,
    Error,
}

impl VerdictLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::True => "True",
            VerdictLabel::False => "False",
            VerdictLabel::Misleading => "Misleading",
            VerdictLabel::Unverifiable => "Unverifiable",
            VerdictLabel::Error => "Error",
        }
    }

    /// Classify the remainder of a `LABEL:` line.
    ///
    /// Substring containment on the upper-cased text. `FALSE` wins whenever it
    /// appears, even alongside `TRUE`; anything unrecognized is `Unverifiable`.
    pub fn classify(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        if upper.contains("TRUE") && !upper.contains("FALSE") {
            VerdictLabel::True
        } else if upper.contains("FALSE") {
            VerdictLabel::False
        } else if upper.contains("MISLEADING") {
            VerdictLabel::Misleading
        } else {
            VerdictLabel::Unverifiable
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Political-bias assessment of the post's framing.
///
/// The generator is asked for `None`, `Potential` or `Likely`; any other text
/// is kept verbatim.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BiasAssessment {
    NotDetected,
    Potential,
    Likely,
    Unrecognized(String),
}

impl BiasAssessment {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "None" => BiasAssessment::NotDetected,
            "Potential" => BiasAssessment::Potential,
            "Likely" => BiasAssessment::Likely,
            other => BiasAssessment::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BiasAssessment::NotDetected => "None",
            BiasAssessment::Potential => "Potential",
            BiasAssessment::Likely => "Likely",
            BiasAssessment::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for BiasAssessment {
    fn from(raw: String) -> Self {
        BiasAssessment::parse(&raw)
    }
}

impl From<BiasAssessment> for String {
    fn from(bias: BiasAssessment) -> Self {
        bias.as_str().to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    pub label: VerdictLabel,
    pub explanation: String,
    pub confidence: f64,
    pub bias: Option<BiasAssessment>,
}

impl Verdict {
    pub const DEFAULT_EXPLANATION: &'static str = "Unable to determine accuracy.";
    pub const DEFAULT_CONFIDENCE: f64 = 0.5;

    /// Pre-parse defaults used when the generator reply carries no fields.
    pub fn undetermined() -> Self {
        Self {
            label: VerdictLabel::Unverifiable,
            explanation: Self::DEFAULT_EXPLANATION.to_string(),
            confidence: Self::DEFAULT_CONFIDENCE,
            bias: None,
        }
    }
}

/// Terminal artifact of one fact-check request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub label: VerdictLabel,
    pub explanation: String,
    pub sources: EvidenceSet,
    pub confidence: f64,
    pub bias: Option<BiasAssessment>,
}

impl FactCheckResult {
    pub fn from_verdict(verdict: Verdict, sources: EvidenceSet) -> Self {
        Self {
            label: verdict.label,
            explanation: verdict.explanation,
            sources,
            confidence: verdict.confidence,
            bias: verdict.bias,
        }
    }

    /// Early-exit result: no evidence, zero confidence.
    pub fn unverifiable(explanation: impl Into<String>) -> Self {
        Self {
            label: VerdictLabel::Unverifiable,
            explanation: explanation.into(),
            sources: EvidenceSet::empty(),
            confidence: 0.0,
            bias: None,
        }
    }

    /// Terminal failure of the synthesis call, reported as a regular result.
    pub fn error() -> Self {
        Self {
            label: VerdictLabel::Error,
            explanation: "An error occurred while analyzing this claim.".to_string(),
            sources: EvidenceSet::empty(),
            confidence: 0.0,
            bias: None,
        }
    }
}
