use crate::models::FactCheckResult;
use crate::pipeline::claim_extractor::ClaimExtractor;
use crate::pipeline::retriever::EvidenceRetriever;
use crate::pipeline::synthesizer::VerdictSynthesizer;
use crate::pipeline::traits::{SearchProvider, TextGenerator};
use std::time::Instant;
use tracing::{info, info_span, Instrument};

pub const EMPTY_INPUT_EXPLANATION: &str = "No text content to fact-check.";
pub const NO_EVIDENCE_EXPLANATION: &str = "No reliable sources found to verify this claim.";

/// Extract → retrieve → synthesize, with the two early exits.
pub struct FactCheckPipeline<G, S>
where
    G: TextGenerator,
    S: SearchProvider,
{
    pub extractor: ClaimExtractor<G>,
    pub retriever: EvidenceRetriever<S>,
    pub synthesizer: VerdictSynthesizer<G>,
}

impl<G, S> FactCheckPipeline<G, S>
where
    G: TextGenerator,
    S: SearchProvider,
{
    pub fn new(
        extractor: ClaimExtractor<G>,
        retriever: EvidenceRetriever<S>,
        synthesizer: VerdictSynthesizer<G>,
    ) -> Self {
        Self {
            extractor,
            retriever,
            synthesizer,
        }
    }

    pub async fn run_fact_check(&self, raw_text: &str) -> FactCheckResult {
        let text = raw_text.trim();
        if text.is_empty() {
            return FactCheckResult::unverifiable(EMPTY_INPUT_EXPLANATION);
        }

        let span = info_span!("fact_check", input_chars = text.chars().count());
        async move {
            let started = Instant::now();
            let claim = self.extractor.extract(text).await;

            let evidence = self.retriever.retrieve(&claim).await;
            if evidence.is_empty() {
                info!(claim = %claim, "no evidence; short-circuit to unverifiable");
                return FactCheckResult::unverifiable(NO_EVIDENCE_EXPLANATION);
            }

            let result = self.synthesizer.synthesize(&claim, text, &evidence).await;
            info!(
                label = %result.label,
                sources = result.sources.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "fact check complete"
            );
            result
        }
        .instrument(span)
        .await
    }
}
