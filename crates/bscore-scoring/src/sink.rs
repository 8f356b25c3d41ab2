//! Observers of scored candidates.

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use bscore_table::BehavioralScore;

/// Receives every `(candidate, score)` pair a [`WithSink`] scorer produces.
///
/// Sinks may be called from many evaluation threads at once.
///
/// [`WithSink`]: crate::scorer::WithSink
pub trait ScoreSink: fmt::Debug + Send + Sync {
    fn record(&self, candidate: &str, score: &BehavioralScore);
}

/// Emits each record as a `debug` tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ScoreSink for TracingSink {
    fn record(&self, candidate: &str, score: &BehavioralScore) {
        tracing::debug!(candidate, total = score.sum(), ?score, "scored candidate");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub candidate: String,
    pub score: BehavioralScore,
}

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ScoreRecord>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records so far.
    #[must_use]
    pub fn records(&self) -> Vec<ScoreRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ScoreSink for MemorySink {
    fn record(&self, candidate: &str, score: &BehavioralScore) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ScoreRecord {
                candidate: candidate.to_owned(),
                score: score.clone(),
            });
    }
}
