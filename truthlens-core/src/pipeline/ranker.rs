//! Trusted-source ranking of raw search hits.
//!
//! Two passes over the provider's list: trusted hosts first, then everything
//! else, each pass keeping provider order. The result never exceeds
//! `max_sources`.

use crate::models::{EvidenceItem, EvidenceSet, SearchHit};
use url::Url;

#[derive(Clone, Debug)]
pub struct SourceRanker {
    trusted_domains: Vec<String>,
    max_sources: usize,
    snippet_chars: usize,
}

impl SourceRanker {
    pub fn new(trusted_domains: Vec<String>, max_sources: usize, snippet_chars: usize) -> Self {
        Self {
            trusted_domains: trusted_domains
                .into_iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            max_sources,
            snippet_chars,
        }
    }


    /// Host of `url`, lower-cased. Unparseable URLs are matched on the whole string.
    fn match_target(url: &str) -> String {
        match Url::parse(url.trim()) {
            Ok(parsed) => parsed
                .host_str()
                .map(|h| h.to_lowercase())
                .unwrap_or_else(|| url.to_lowercase()),
            Err(_) => url.to_lowercase(),
        }
    }

    pub fn is_trusted(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }
        let target = Self::match_target(url);
        self.trusted_domains
            .iter()
            .any(|domain| target.contains(domain.as_str()))
    }

    pub fn rank(&self, hits: &[SearchHit]) -> EvidenceSet {
        let trusted: Vec<bool> = hits
            .iter()
            .map(|hit| self.is_trusted(hit.url.as_deref().unwrap_or("")))
            .collect();

        let mut kept: Vec<EvidenceItem> = hits
            .iter()
            .zip(&trusted)
            .filter(|(_, is_trusted)| **is_trusted)
            .map(|(hit, _)| EvidenceItem::from_hit(hit, self.snippet_chars))
            .take(self.max_sources)
            .collect();

        if kept.len() < self.max_sources {
            let room = self.max_sources - kept.len();
            kept.extend(
                hits.iter()
                    .zip(&trusted)
                    .filter(|(_, is_trusted)| !**is_trusted)
                    .map(|(hit, _)| EvidenceItem::from_hit(hit, self.snippet_chars))
                    .take(room),
            );
        }

        EvidenceSet::from_items(kept, self.max_sources)
    }
}
