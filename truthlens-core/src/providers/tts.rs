use crate::config::SpeechSettings;
use crate::error::ProviderError;
use crate::pipeline::traits::SpeechSynthesizer;
use crate::providers::http::build_client;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const SPEECH_MODEL: &str = "eleven_multilingual_v2";

/// ElevenLabs text-to-speech. Returns MP3 bytes.
pub struct ElevenLabsSpeech {
    client: Client,
    endpoint: String,
    voice_id: String,
    api_key: String,
}

impl ElevenLabsSpeech {
    pub fn from_settings(settings: &SpeechSettings) -> Result<Self, ProviderError> {
        let api_key = settings.api_key.clone().ok_or_else(|| ProviderError::Auth {
            status: 401,
            body: "ELEVENLABS_API_KEY not configured".to_string(),
        })?;
        Ok(Self {
            client: build_client()?,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            voice_id: settings.voice_id.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSpeech {
    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .post(format!("{}/{}", self.endpoint, self.voice_id))
            .header("xi-api-key", &self.api_key)
            .json(&json!({
                "text": text,
                "model_id": SPEECH_MODEL,
                "voice_settings": {
                    "stability": 0.5,
                    "similarity_boost": 0.75
                }
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), body));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
