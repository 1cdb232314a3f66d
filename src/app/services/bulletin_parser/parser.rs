//! Bulletin parser orchestration
//!
//! Locates the data block, walks it line by line and turns each data line
//! into a [`SeismicEvent`]. Every event inside the bounding box is tagged
//! with a province: the one named in its location text, or else the one
//! whose capital lies closest to the epicentre.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::block::extract_data_block;
use super::line_parser::{LineLayout, LineOutcome, ParsedLine, parse_line};
use super::magnitude::ScanWindow;
use super::stats::{BulletinParseResult, BulletinParseStats};
use crate::app::models::{EventSource, SeismicEvent};
use crate::app::services::region_registry::{BoundingBox, RegionAllowList};
use crate::constants::{
    BULLETIN_END_MARKER, BULLETIN_NOISE_TOKENS, BULLETIN_START_MARKER, bulletin_layout,
};
use crate::{Error, Result};

/// Layout of the bulletin page and of its data lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletinLayout {
    pub start_marker: String,
    pub end_marker: String,
    pub magnitude_scan: ScanWindow,
    pub location_offset: usize,
    pub default_location_start: usize,
    pub min_tokens: usize,
    pub bounds: BoundingBox,
}

impl Default for BulletinLayout {
    fn default() -> Self {
        Self {
            start_marker: BULLETIN_START_MARKER.to_string(),
            end_marker: BULLETIN_END_MARKER.to_string(),
            magnitude_scan: ScanWindow::default(),
            location_offset: bulletin_layout::LOCATION_OFFSET,
            default_location_start: bulletin_layout::DEFAULT_LOCATION_START,
            min_tokens: bulletin_layout::MIN_TOKENS,
            bounds: BoundingBox::marmara(),
        }
    }
}

impl BulletinLayout {
    /// Check markers, scan window and bounding box
    pub fn validate(&self) -> Result<()> {
        if self.start_marker.is_empty() || self.end_marker.is_empty() {
            return Err(Error::configuration("Bulletin block markers cannot be empty"));
        }

        if self.min_tokens <= bulletin_layout::DEPTH_INDEX {
            return Err(Error::configuration(format!(
                "Bulletin min_tokens must exceed the depth column index ({})",
                bulletin_layout::DEPTH_INDEX
            )));
        }

        self.magnitude_scan.validate()?;
        self.bounds.validate()
    }

    fn line_layout(&self) -> LineLayout {
        LineLayout {
            magnitude_scan: self.magnitude_scan,
            location_offset: self.location_offset,
            default_location_start: self.default_location_start,
            min_tokens: self.min_tokens,
        }
    }
}

/// Parser for the Kandilli plaintext bulletin
///
/// Parsing never fails: a page without the data block markers yields an
/// empty, malformed [`BulletinParseResult`], and bad lines are counted and
/// skipped.
#[derive(Debug, Clone)]
pub struct BulletinParser {
    layout: BulletinLayout,
    allow_list: RegionAllowList,
    source_label: String,
}

impl Default for BulletinParser {
    fn default() -> Self {
        Self {
            layout: BulletinLayout::default(),
            allow_list: RegionAllowList::marmara(),
            source_label: EventSource::Bulletin.label().to_string(),
        }
    }
}

impl BulletinParser {
    /// Create a parser, rejecting an inconsistent layout
    pub fn new(
        layout: BulletinLayout,
        allow_list: RegionAllowList,
        source_label: impl Into<String>,
    ) -> Result<Self> {
        layout.validate()?;

        Ok(Self {
            layout,
            allow_list,
            source_label: source_label.into(),
        })
    }

    pub fn layout(&self) -> &BulletinLayout {
        &self.layout
    }

    /// Parse the full text of a fetched bulletin page
    pub fn parse(&self, page: &str) -> BulletinParseResult {
        let block = match extract_data_block(page, &self.layout.start_marker, &self.layout.end_marker)
        {
            Ok(block) => block,
            Err(reason) => {
                warn!("Bulletin page is malformed: {}", reason);
                return BulletinParseResult::malformed(reason);
            }
        };

        let line_layout = self.layout.line_layout();
        let mut stats = BulletinParseStats::new();
        let mut events = Vec::new();

        for (line_number, line) in block.lines().enumerate() {
            stats.total_lines += 1;

            match parse_line(line, &line_layout, BULLETIN_NOISE_TOKENS) {
                LineOutcome::Noise => stats.noise_lines += 1,
                LineOutcome::InsufficientTokens { found } => {
                    stats.insufficient_tokens += 1;
                    debug!(
                        "Skipped bulletin line {}: only {} tokens after date/time",
                        line_number + 1,
                        found
                    );
                }
                LineOutcome::Unparseable { reason } => {
                    stats.unparseable_lines += 1;
                    stats.add_error(format!("Line {}: {}", line_number + 1, reason));
                    debug!("Skipped bulletin line {}: {}", line_number + 1, reason);
                }
                LineOutcome::Event(parsed) => match self.build_event(parsed, &mut stats) {
                    Ok(event) => {
                        stats.events_parsed += 1;
                        events.push(event);
                    }
                    Err(e) => {
                        stats.unparseable_lines += 1;
                        stats.add_error(format!("Line {}: {}", line_number + 1, e));
                        debug!("Rejected bulletin line {}: {}", line_number + 1, e);
                    }
                },
            }
        }

        info!(
            "Parsed {} bulletin events from {} lines ({} skipped, {} without magnitude)",
            stats.events_parsed,
            stats.total_lines,
            stats.lines_skipped(),
            stats.missing_magnitude
        );

        BulletinParseResult {
            events,
            stats,
            malformed: None,
        }
    }

    /// Tag a parsed line with its region and validate it as an event
    fn build_event(&self, parsed: ParsedLine, stats: &mut BulletinParseStats) -> Result<SeismicEvent> {
        let inside = self.layout.bounds.contains(parsed.latitude, parsed.longitude);
        let mut by_nearest = false;
        let region_name = if inside {
            self.allow_list
                .resolve_location(&parsed.location_text)
                .or_else(|| {
                    by_nearest = true;
                    self.allow_list.nearest(parsed.latitude, parsed.longitude)
                })
                .map(str::to_string)
        } else {
            None
        };

        let event = SeismicEvent::new(
            parsed.occurred_at,
            parsed.latitude,
            parsed.longitude,
            parsed.depth_km,
            parsed.magnitude,
            parsed.location_text,
            region_name,
            None,
            self.source_label.clone(),
        )?;

        if inside {
            stats.inside_bounds += 1;
        }
        if event.region_name.is_some() {
            stats.region_resolved += 1;
            if by_nearest {
                stats.region_by_nearest += 1;
            }
        }
        if event.magnitude.is_none() {
            stats.missing_magnitude += 1;
        }

        Ok(event)
    }
}
