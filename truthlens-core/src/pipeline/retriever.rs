use crate::models::{ClaimText, EvidenceSet};
use crate::pipeline::ranker::SourceRanker;
use crate::pipeline::traits::SearchProvider;
use crate::pool::WorkerPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct RetrievalParams {
    pub result_count: u32,
    pub freshness: String,
    pub timeout: Duration,
}

pub struct EvidenceRetriever<S: SearchProvider> {
    search: Arc<S>,
    ranker: SourceRanker,
    params: RetrievalParams,
    pool: WorkerPool,
}

impl<S: SearchProvider> EvidenceRetriever<S> {
    pub fn new(search: Arc<S>, ranker: SourceRanker, params: RetrievalParams, pool: WorkerPool) -> Self {
        Self {
            search,
            ranker,
            params,
            pool,
        }
    }

    /// Search once and rank. Any provider failure yields an empty set.
    pub async fn retrieve(&self, claim: &ClaimText) -> EvidenceSet {
        let started = Instant::now();
        let result = self
            .pool
            .run(
                self.params.timeout,
                self.search
                    .search(claim.as_str(), self.params.result_count, &self.params.freshness),
            )
            .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(hits) => {
                let evidence = self.ranker.rank(&hits);
                info!(
                    raw_hits = hits.len(),
                    kept = evidence.len(),
                    elapsed_ms,
                    "search finished"
                );
                evidence
            }
            Err(err) => {
                warn!(error = %err, elapsed_ms, "search failed; no evidence");
                EvidenceSet::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SearchHit, PROMPT_SNIPPET_CHARS};
    use crate::pipeline::mock::StaticSearch;

    fn params() -> RetrievalParams {
        RetrievalParams {
            result_count: 20,
            freshness: "pw".into(),
            timeout: Duration::from_secs(1),
        }
    }

    fn ranker() -> SourceRanker {
        SourceRanker::new(vec!["apnews.com".into()], 3, PROMPT_SNIPPET_CHARS)
    }

    #[tokio::test]
    async fn passes_query_parameters_and_ranks() {
        let search = Arc::new(StaticSearch::with_hits(vec![
            SearchHit {
                url: Some("https://x.example/1".into()),
                ..SearchHit::default()
            },
            SearchHit {
                url: Some("https://apnews.com/2".into()),
                description: Some("d".repeat(1500)),
                ..SearchHit::default()
            },
        ]));
        let retriever = EvidenceRetriever::new(search.clone(), ranker(), params(), WorkerPool::new(1));
        let set = retriever.retrieve(&ClaimText::new("claim")).await;

        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice()[0].url, "https://apnews.com/2");
        assert_eq!(set.as_slice()[0].snippet.len(), PROMPT_SNIPPET_CHARS);
        let (query, count, freshness) = search.last_query().unwrap();
        assert_eq!(query, "claim");
        assert_eq!(count, 20);
        assert_eq!(freshness, "pw");
    }

    #[tokio::test]
    async fn failure_gives_empty_set() {
        let search = Arc::new(StaticSearch::failing());
        let retriever = EvidenceRetriever::new(search.clone(), ranker(), params(), WorkerPool::new(1));
        assert!(retriever.retrieve(&ClaimText::new("claim")).await.is_empty());
        assert_eq!(search.calls(), 1);
    }
}
