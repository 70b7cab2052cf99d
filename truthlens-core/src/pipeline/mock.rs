//! Scripted providers for tests and offline runs.

use crate::error::ProviderError;
use crate::media::{MediaDetector, ResponseShape};
use crate::models::SearchHit;
use crate::pipeline::traits::{SearchProvider, SpeechSynthesizer, TextGenerator};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Replays queued replies in order; the last one repeats once the queue drains.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, u16>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn sequence(replies: Vec<Result<String, u16>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::sequence(vec![Ok(reply.to_string())])
    }

    /// Every call fails with HTTP 500.
    pub fn failing() -> Self {
        Self::sequence(vec![Err(500)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let next = {
            let mut replies = self
                .replies
                .lock()
                .map_err(|_| ProviderError::Transport("script lock poisoned".into()))?;
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        };
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(status)) => Err(ProviderError::from_status(status, "scripted failure")),
            None => Err(ProviderError::Malformed("no scripted reply".into())),
        }
    }
}

/// Returns the same hits (or the same failure) for every query.
pub struct StaticSearch {
    result: Result<Vec<SearchHit>, u16>,
    queries: Mutex<Vec<(String, u32, String)>>,
    calls: AtomicUsize,
}

impl StaticSearch {
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            result: Ok(hits),
            queries: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(503),
            queries: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<(String, u32, String)> {
        self.queries.lock().ok().and_then(|q| q.last().cloned())
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(
        &self,
        query: &str,
        count: u32,
        freshness: &str,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((query.to_string(), count, freshness.to_string()));
        }
        match &self.result {
            Ok(hits) => Ok(hits.clone()),
            Err(status) => Err(ProviderError::from_status(*status, "scripted failure")),
        }
    }
}

/// Detector that answers with a fixed JSON body or HTTP status.
pub struct CannedDetector {
    shape: ResponseShape,
    reply: Result<serde_json::Value, u16>,
    calls: AtomicUsize,
}

impl CannedDetector {
    pub fn new(shape: ResponseShape, reply: Result<serde_json::Value, u16>) -> Self {
        Self {
            shape,
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaDetector for CannedDetector {
    fn shape(&self) -> ResponseShape {
        self.shape
    }

    async fn detect(&self, _media_url: &str) -> Result<serde_json::Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(ProviderError::from_status(*status, "canned failure")),
        }
    }
}

/// Echoes the text back as bytes.
pub struct EchoSpeech;

#[async_trait]
impl SpeechSynthesizer for EchoSpeech {
    async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        Ok(text.as_bytes().to_vec())
    }
}
