use crate::config::GenerationSettings;
use crate::error::ProviderError;
use crate::pipeline::traits::TextGenerator;
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;

/// Chat-completions client for any OpenAI-compatible endpoint.
///
/// Defaults to Gemini through Google's OpenAI-compatible base URL.
pub struct ChatGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ChatGenerator {
    pub fn new(api_key: &str, api_base: &str, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self::new(&settings.api_key, &settings.api_base, &settings.model)
    }
}

#[async_trait]
impl TextGenerator for ChatGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .build()?;

        let response = self.client.chat().create(request).await?;
        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| ProviderError::Malformed("response missing content".into()))
    }
}
