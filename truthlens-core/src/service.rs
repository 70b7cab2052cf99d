use crate::config::Settings;
use crate::error::ProviderError;
use crate::media::{Detector, MediaChecker};
use crate::models::PROMPT_SNIPPET_CHARS;
use crate::pipeline::{
    ClaimExtractor, EvidenceRetriever, FactCheckPipeline, RetrievalParams, SourceRanker,
    VerdictSynthesizer,
};
use crate::pool::WorkerPool;
use crate::providers::{BraveSearch, ChatGenerator};
use std::sync::Arc;
use tracing::{info, warn};

/// Process-wide provider handles, built once at startup and shared by reference.
pub struct TruthLens {
    pub fact_check: FactCheckPipeline<ChatGenerator, BraveSearch>,
    pub media: MediaChecker<Detector>,
    pub pool: WorkerPool,
    pub model: String,
}

impl TruthLens {
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        let pool = WorkerPool::new(settings.max_workers);
        let generator = Arc::new(ChatGenerator::from_settings(&settings.generation));
        let search = Arc::new(BraveSearch::from_settings(&settings.search)?);

        let ranker = SourceRanker::new(
            settings.search.trusted_domains.clone(),
            settings.search.max_sources,
            PROMPT_SNIPPET_CHARS,
        );
        let params = RetrievalParams {
            result_count: settings.search.result_count,
            freshness: settings.search.freshness.clone(),
            timeout: settings.search.timeout,
        };

        let fact_check = FactCheckPipeline::new(
            ClaimExtractor::new(generator.clone(), pool.clone(), settings.generation.timeout),
            EvidenceRetriever::new(search, ranker, params, pool.clone()),
            VerdictSynthesizer::new(
                generator,
                pool.clone(),
                settings.generation.timeout,
                settings.search.max_sources,
            ),
        );

        let detector = Detector::from_settings(&settings.detector)?.map(Arc::new);
        let credential = Detector::credential_name(settings.detector.kind);
        if !settings.media_detection_enabled() {
            warn!("{credential} not set - AI media detection will be unavailable");
        }
        let media = MediaChecker::new(detector, credential, pool.clone(), settings.detector.timeout);

        info!(
            model = %settings.generation.model,
            workers = pool.size(),
            max_sources = settings.search.max_sources,
            media_detection = media.is_enabled(),
            "providers configured"
        );

        Ok(Self {
            fact_check,
            media,
            pool,
            model: settings.generation.model.clone(),
        })
    }
}
