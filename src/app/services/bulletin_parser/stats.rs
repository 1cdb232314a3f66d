//! Parse statistics and result structures for bulletin processing

use super::block::MalformedBulletin;
use crate::app::models::SeismicEvent;
use crate::constants::MAX_RECORDED_ERRORS;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parsed events with statistics
#[derive(Debug, Clone)]
pub struct BulletinParseResult {
    /// Events in source order (newest first)
    pub events: Vec<SeismicEvent>,

    /// Line-level statistics
    pub stats: BulletinParseStats,

    /// Set when the data block could not be located; `events` is then empty
    pub malformed: Option<MalformedBulletin>,
}

impl BulletinParseResult {
    /// Result for a page without a locatable data block
    pub fn malformed(reason: MalformedBulletin) -> Self {
        Self {
            events: Vec::new(),
            stats: BulletinParseStats::new(),
            malformed: Some(reason),
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.malformed.is_some()
    }

    /// Turn a malformed-source result into a fatal error
    pub fn ensure_well_formed(&self, source_name: &str) -> Result<()> {
        match self.malformed {
            Some(reason) => Err(Error::malformed_source(source_name, reason.to_string())),
            None => Ok(()),
        }
    }
}

/// Bulletin parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulletinParseStats {
    /// Lines inside the data block
    pub total_lines: usize,

    /// Blank, banner, header and separator lines discarded
    pub noise_lines: usize,

    /// Events produced
    pub events_parsed: usize,

    /// Date-led lines skipped for having too few tokens
    pub insufficient_tokens: usize,

    /// Date-led lines skipped for unparseable date/time or coordinates
    pub unparseable_lines: usize,

    /// Events without any valid magnitude in the scan window
    pub missing_magnitude: usize,

    /// Events inside the bounding box
    pub inside_bounds: usize,

    /// Events tagged with an allow-listed province
    pub region_resolved: usize,

    /// Tagged events whose location named no province, placed by nearest capital
    pub region_by_nearest: usize,

    /// First few row-level problems, for debugging
    pub errors: Vec<String>,
}

impl BulletinParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped line, keeping at most a bounded number of messages
    pub fn add_error(&mut self, message: String) {
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(message);
        }
    }

    /// Lines that looked like data but were dropped
    pub fn lines_skipped(&self) -> usize {
        self.insufficient_tokens + self.unparseable_lines
    }

    /// Share of data-looking lines that produced an event, as a percentage
    pub fn success_rate(&self) -> f64 {
        let candidates = self.events_parsed + self.lines_skipped();
        if candidates == 0 {
            0.0
        } else {
            (self.events_parsed as f64 / candidates as f64) * 100.0
        }
    }
}
