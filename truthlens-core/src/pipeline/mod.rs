pub mod claim_extractor;
pub mod mock;
pub mod orchestrator;
pub mod ranker;
pub mod retriever;
pub mod synthesizer;
pub mod traits;

pub use claim_extractor::ClaimExtractor;
pub use mock::{CannedDetector, EchoSpeech, ScriptedGenerator, StaticSearch};
pub use orchestrator::{FactCheckPipeline, EMPTY_INPUT_EXPLANATION, NO_EVIDENCE_EXPLANATION};
pub use ranker::SourceRanker;
pub use retriever::{EvidenceRetriever, RetrievalParams};
pub use synthesizer::VerdictSynthesizer;
pub use traits::{SearchProvider, SpeechSynthesizer, TextGenerator};
