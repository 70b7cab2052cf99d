use crate::models::ClaimText;
use crate::pipeline::traits::TextGenerator;
use crate::pool::WorkerPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct ClaimExtractor<G: TextGenerator> {
    generator: Arc<G>,
    pool: WorkerPool,
    timeout: Duration,
}

impl<G: TextGenerator> ClaimExtractor<G> {
    pub fn new(generator: Arc<G>, pool: WorkerPool, timeout: Duration) -> Self {
        Self {
            generator,
            pool,
            timeout,
        }
    }

    fn build_prompt(raw_text: &str) -> String {
        format!(
            r#"
<context>
ROLE: Claim Extraction Specialist
TASK: Extract the core factual claim from the text below that can be fact-checked.
</context>

<text>
"{raw_text}"
</text>

<instructions>
1. Identify the main factual claim or statement (ignore opinions, questions, or commentary)
2. Extract it as a clear, searchable query (remove hashtags, mentions, links)
3. If multiple claims exist, extract the most significant one
4. If no factual claim exists, return the original text
5. Keep it concise (under 100 characters if possible)
</instructions>

<output_format>
Return ONLY the extracted claim text, nothing else.
</output_format>
"#
        )
    }

    /// Strip whitespace and any quotes the generator wrapped around the claim.
    pub fn clean_reply(reply: &str) -> String {
        reply
            .trim()
            .trim_matches('"')
            .trim_matches('\'')
            .trim()
            .to_string()
    }

    /// Distill a searchable claim. Any failure or empty reply yields `raw_text` itself.
    pub async fn extract(&self, raw_text: &str) -> ClaimText {
        let prompt = Self::build_prompt(raw_text);
        let started = Instant::now();
        let reply = self
            .pool
            .run(self.timeout, self.generator.generate(&prompt))
            .await;
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "claim extraction call finished");

        match reply {
            Ok(reply) => {
                let cleaned = Self::clean_reply(&reply);
                if cleaned.is_empty() {
                    warn!("claim extraction returned nothing; using raw text");
                    ClaimText::new(raw_text)
                } else {
                    info!(claim = %cleaned, "extracted claim");
                    ClaimText::new(cleaned)
                }
            }
            Err(err) => {
                warn!(error = %err, "claim extraction failed; using raw text");
                ClaimText::new(raw_text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::mock::ScriptedGenerator;

    fn extractor(generator: ScriptedGenerator) -> ClaimExtractor<ScriptedGenerator> {
        ClaimExtractor::new(Arc::new(generator), WorkerPool::new(1), Duration::from_secs(1))
    }

    #[test]
    fn clean_reply_strips_quotes_and_whitespace() {
        assert_eq!(
            ClaimExtractor::<ScriptedGenerator>::clean_reply("  \"The moon is cheese\"\n"),
            "The moon is cheese"
        );
        assert_eq!(
            ClaimExtractor::<ScriptedGenerator>::clean_reply("'quoted' "),
            "quoted"
        );
        assert_eq!(ClaimExtractor::<ScriptedGenerator>::clean_reply(" \"\" "), "");
    }

    #[tokio::test]
    async fn uses_cleaned_reply() {
        let ex = extractor(ScriptedGenerator::replying("\"Paris is the capital of France\""));
        let claim = ex.extract("lol did u know paris is the capital of france?? #geo").await;
        assert_eq!(claim.as_str(), "Paris is the capital of France");
    }

    #[tokio::test]
    async fn empty_reply_falls_back_to_raw_text() {
        let ex = extractor(ScriptedGenerator::replying("  ''  "));
        let claim = ex.extract("raw post").await;
        assert_eq!(claim.as_str(), "raw post");
    }

    #[tokio::test]
    async fn failure_falls_back_to_raw_text() {
        let generator = ScriptedGenerator::failing();
        let ex = extractor(generator);
        let claim = ex.extract("raw post").await;
        assert_eq!(claim.as_str(), "raw post");
    }

    #[tokio::test]
    async fn prompt_embeds_raw_text_and_calls_once() {
        let generator = Arc::new(ScriptedGenerator::replying("claim"));
        let ex = ClaimExtractor::new(generator.clone(), WorkerPool::new(1), Duration::from_secs(1));
        ex.extract("vaccines contain microchips").await;
        assert_eq!(generator.calls(), 1);
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains("\"vaccines contain microchips\""));
        assert!(prompt.contains("Return ONLY the extracted claim text"));
    }
}
