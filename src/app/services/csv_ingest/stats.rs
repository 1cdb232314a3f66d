//! Filter statistics and result structures for CSV ingestion

use crate::app::models::{SeismicEvent, TargetTable};
use crate::constants::MAX_RECORDED_ERRORS;
use serde::{Deserialize, Serialize};

/// Retained events with statistics
#[derive(Debug, Clone)]
pub struct CsvFilterResult {
    /// Retained events in file order
    pub events: Vec<SeismicEvent>,

    /// Row-level statistics
    pub stats: CsvFilterStats,

    /// Table the events are destined for
    pub table: TargetTable,
}

/// CSV filter statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvFilterStats {
    /// Data rows read after the header
    pub total_rows: usize,

    /// Rows normalized into events
    pub retained: usize,

    /// Rows whose region is absent or not allow-listed
    pub dropped_out_of_region: usize,

    /// Allow-listed rows lacking a required value
    pub skipped_incomplete: usize,

    /// Rows the CSV reader could not decode
    pub skipped_malformed: usize,

    /// Required semantic fields no header column mapped to
    pub missing_columns: Vec<String>,

    /// First few row-level problems, for debugging
    pub errors: Vec<String>,
}

impl CsvFilterStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped row, keeping at most a bounded number of messages
    pub fn add_error(&mut self, message: String) {
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(message);
        }
    }

    /// Rows that belonged to the region but were not retained
    pub fn rows_skipped(&self) -> usize {
        self.skipped_incomplete + self.skipped_malformed
    }

    /// Share of in-region rows that were retained, as a percentage
    pub fn retention_rate(&self) -> f64 {
        let candidates = self.retained + self.rows_skipped();
        if candidates == 0 {
            0.0
        } else {
            (self.retained as f64 / candidates as f64) * 100.0
        }
    }
}
