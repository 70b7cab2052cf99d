use crate::error::ProviderError;
use crate::models::SearchHit;
use async_trait::async_trait;

/// Single-shot text generation: one prompt in, one reply out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Raw hits in provider relevance order.
    async fn search(
        &self,
        query: &str,
        count: u32,
        freshness: &str,
    ) -> Result<Vec<SearchHit>, ProviderError>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, ProviderError>;
}
