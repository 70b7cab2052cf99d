pub mod claim;
pub mod evidence;
pub mod media;
pub mod verdict;

pub use claim::ClaimText;
pub use evidence::{
    truncate_chars, EvidenceItem, EvidenceSet, SearchHit, PROMPT_SNIPPET_CHARS,
    SOURCE_SNIPPET_CHARS,
};
pub use media::{clamp_unit, AuthenticThreshold, MediaCheckResult};
pub use verdict::{BiasAssessment, FactCheckResult, Verdict, VerdictLabel};
