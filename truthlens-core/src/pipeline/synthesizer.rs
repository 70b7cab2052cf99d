use crate::models::{
    clamp_unit, truncate_chars, BiasAssessment, ClaimText, EvidenceSet, FactCheckResult, Verdict,
    VerdictLabel, PROMPT_SNIPPET_CHARS, SOURCE_SNIPPET_CHARS,
};
use crate::pipeline::traits::TextGenerator;
use crate::pool::WorkerPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Evidence items rendered into the prompt.
pub const PROMPT_EVIDENCE_LIMIT: usize = 5;

const LABEL_PREFIX: &str = "LABEL:";
const EXPLANATION_PREFIX: &str = "EXPLANATION:";
const BIAS_PREFIX: &str = "BIAS:";
const CONFIDENCE_PREFIX: &str = "CONFIDENCE:";

pub struct VerdictSynthesizer<G: TextGenerator> {
    generator: Arc<G>,
    pool: WorkerPool,
    timeout: Duration,
    max_sources: usize,
}

impl<G: TextGenerator> VerdictSynthesizer<G> {
    pub fn new(generator: Arc<G>, pool: WorkerPool, timeout: Duration, max_sources: usize) -> Self {
        Self {
            generator,
            pool,
            timeout,
            max_sources,
        }
    }

    pub fn build_prompt(claim: &ClaimText, evidence: &EvidenceSet) -> String {
        let evidence_text = evidence
            .iter()
            .take(PROMPT_EVIDENCE_LIMIT)
            .enumerate()
            .map(|(i, item)| {
                format!(
                    "Source {}:\nTitle: {}\nURL: {}\nContent: {}",
                    i + 1,
                    item.title,
                    item.url,
                    truncate_chars(&item.snippet, PROMPT_SNIPPET_CHARS)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"
<context>
ROLE: Senior Fact-Checker.
TASK: Verify the CLAIM against the provided SEARCH_EVIDENCE.
</context>

<search_evidence>
{evidence_text}
</search_evidence>

<claim>
"{claim}"
</claim>

<instructions>
1. CROSS-REFERENCE: Does the evidence mention the specific entities in the claim?
2. VERIFY: Label based on direct evidence matches.
   - TRUE: Supported by multiple reputable sources.
   - FALSE: Contradicted by primary sources.
   - MISLEADING: Grain of truth but significant omission/bias.
   - UNVERIFIABLE: Claim entities not found in sources.
3. POLITICAL BIAS CHECK (for misleading/controversial claims only):
   - Analyze ONLY the post content (not the sources)
   - Detect if the framing shows political bias or partisan slant
   - Do NOT label as left/right/center - only detect if bias exists
   - Consider: selective facts, partisan framing, political agenda
</instructions>

<output_format>
LABEL: [TRUE/FALSE/MISLEADING/UNVERIFIABLE]
EXPLANATION: [Context + Source Name in < 20 words]
BIAS: [None / Potential / Likely]
CONFIDENCE: [0.0 - 1.0]
</output_format>
"#
        )
    }

    /// Line-oriented, tolerant parse of the four-line reply schema.
    ///
    /// Unrecognized lines are skipped and every field keeps its default until
    /// a line for it shows up. Later lines overwrite earlier ones.
    pub fn parse_reply(reply: &str) -> Verdict {
        let mut verdict = Verdict::undetermined();
        for line in reply.trim().lines() {
            if let Some(rest) = line.strip_prefix(LABEL_PREFIX) {
                verdict.label = VerdictLabel::classify(rest);
            } else if let Some(rest) = line.strip_prefix(EXPLANATION_PREFIX) {
                verdict.explanation = strip_emphasis(rest.trim());
            } else if let Some(rest) = line.strip_prefix(BIAS_PREFIX) {
                verdict.bias = Some(BiasAssessment::parse(rest.trim()));
            } else if let Some(rest) = line.strip_prefix(CONFIDENCE_PREFIX) {
                verdict.confidence = parse_confidence(rest);
            }
        }
        verdict
    }

    pub async fn synthesize(
        &self,
        claim: &ClaimText,
        raw_text: &str,
        evidence: &EvidenceSet,
    ) -> FactCheckResult {
        let prompt = Self::build_prompt(claim, evidence);
        let started = Instant::now();
        let reply = self
            .pool
            .run(self.timeout, self.generator.generate(&prompt))
            .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match reply {
            Ok(reply) => {
                let verdict = Self::parse_reply(&reply);
                info!(
                    label = %verdict.label,
                    confidence = verdict.confidence,
                    elapsed_ms,
                    "verdict synthesized"
                );
                debug!(raw_len = raw_text.len(), "synthesis input");
                FactCheckResult::from_verdict(
                    verdict,
                    evidence.capped(self.max_sources, SOURCE_SNIPPET_CHARS),
                )
            }
            Err(err) => {
                warn!(error = %err, elapsed_ms, "verdict synthesis failed");
                FactCheckResult::error()
            }
        }
    }
}

/// Literal removal of markdown emphasis markers.
fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
        .replace("__", "")
        .replace('*', "")
        .replace('_', "")
}

fn parse_confidence(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .map(|v| clamp_unit(v, Verdict::DEFAULT_CONFIDENCE))
        .unwrap_or(Verdict::DEFAULT_CONFIDENCE)
}
