//! Analysis service - ties the scorer to the store
//!
//! Both the HTTP handlers and the CLI go through [`AnalysisService`], so an
//! analysis is validated, scored, labelled and persisted the same way
//! regardless of where it came from.

use std::sync::Arc;

use crate::record::AnalysisRecord;
use crate::scorer::SentimentScorer;
use crate::storage::{SqliteStore, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
use crate::Result;

/// Result of an analyze call.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeOutcome {
    /// Text was scored and stored
    Scored(AnalysisRecord),
    /// Input was empty after trimming; nothing was stored
    EmptyText,
}

#[derive(Clone)]
pub struct AnalysisService {
    store: SqliteStore,
    scorer: Arc<dyn SentimentScorer>,
}

impl AnalysisService {
    pub fn new(store: SqliteStore, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { store, scorer }
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    /// Score `text`, persist the resulting record and return it.
    pub fn analyze(&self, text: &str) -> Result<AnalyzeOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(AnalyzeOutcome::EmptyText);
        }

        let scores = self.scorer.polarity_scores(text)?;
        let record = AnalysisRecord::new(text, scores);
        self.store.insert(&record)?;

        tracing::info!("Analyzed {} chars -> {} ({:.4})", text.len(), record.label, record.compound);
        Ok(AnalyzeOutcome::Scored(record))
    }

    /// Most recent records, newest first.
    pub fn history(&self, limit: usize) -> Result<Vec<AnalysisRecord>> {
        self.store.list_recent(limit)
    }
}

/// Resolve a caller-supplied history limit.
///
/// Missing means the default; anything else is clamped to
/// `1..=MAX_HISTORY_LIMIT`.
pub fn clamp_history_limit(limit: Option<i64>) -> usize {
    match limit {
        None => DEFAULT_HISTORY_LIMIT,
        Some(n) => n.clamp(1, MAX_HISTORY_LIMIT as i64) as usize,
    }
}
