pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod pipeline;
pub mod pool;
pub mod providers;
pub mod service;
pub mod speech;

pub use config::Settings;
pub use error::{ConfigError, MediaCheckError, ProviderError};
pub use service::TruthLens;
