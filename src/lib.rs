//! # Sentiment API
//!
//! Small HTTP service that scores free text with a lexicon-based analyzer
//! and keeps a history of results.
//!
//! Sentiment API provides:
//! - VADER-backed polarity scoring behind an injectable scorer trait
//! - SQLite-backed, append-only storage of analysis records
//! - An axum HTTP layer with `/`, `/analyze` and `/history`

pub mod record;
pub mod scorer;
pub mod storage;
pub mod service;
pub mod server;
pub mod config;


// Re-exports for convenient access
pub use record::{AnalysisRecord, Scores, SentimentLabel};
pub use scorer::{SentimentScorer, VaderScorer};
pub use service::{AnalysisService, AnalyzeOutcome};
pub use storage::SqliteStore;

/// Result type alias for Sentiment API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Sentiment API operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage initialization failed: {0}")]
    StorageInit(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Scorer error: {0}")]
    Scorer(String),

    #[error("Unknown sentiment label: {0}")]
    InvalidLabel(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
