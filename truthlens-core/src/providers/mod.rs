pub mod aiornot;
pub mod generation;
pub mod hive;
pub mod http;
pub mod search;
pub mod tts;

pub use aiornot::AiOrNotClient;
pub use generation::ChatGenerator;
pub use hive::HiveClient;
pub use search::BraveSearch;
pub use tts::ElevenLabsSpeech;
