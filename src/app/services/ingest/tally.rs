//! Per-run persistence counters

use crate::app::services::event_store::UpsertOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Added/updated/skipped accounting for one ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestTally {
    /// Rows inserted under a new natural key
    pub added: usize,

    /// Existing rows overwritten with a different payload
    pub updated: usize,

    /// Duplicates of rows already stored
    pub skipped: usize,

    /// Events whose region could not be mapped to a datastore id
    pub unresolved: usize,
}

impl IngestTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one upsert outcome
    pub fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.added += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Duplicate => self.skipped += 1,
        }
    }

    /// Events that reached the datastore
    pub fn persisted(&self) -> usize {
        self.added + self.updated + self.skipped
    }

    pub fn total(&self) -> usize {
        self.persisted() + self.unresolved
    }

    /// Fold another run's counters into this one
    pub fn merge(&mut self, other: &IngestTally) {
        self.added += other.added;
        self.updated += other.updated;
        self.skipped += other.skipped;
        self.unresolved += other.unresolved;
    }
}

impl fmt::Display for IngestTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} updated, {} skipped, {} unresolved",
            self.added, self.updated, self.skipped, self.unresolved
        )
    }
}
