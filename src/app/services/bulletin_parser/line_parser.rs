//! Line-level parsing for bulletin data lines
//!
//! Extraction is two-phase: latitude, longitude and depth are read at fixed
//! offsets, then magnitude is found by a bounded scan (see [`super::magnitude`]).
//! Location text is everything from a fixed offset past the chosen magnitude
//! token.

use super::magnitude::{ScanWindow, parse_number, scan_magnitude};
use crate::constants::bulletin_layout::{DEPTH_INDEX, LATITUDE_INDEX, LONGITUDE_INDEX};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Leading `YYYY.MM.DD` date token
fn date_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}\.\d{2}\.\d{2}$").expect("date pattern is valid"))
}

/// `YYYY.MM.DD HH:MM:SS` prefix followed by the rest of the line
fn date_time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})\.(\d{2})\.(\d{2})\s+(\d{2}):(\d{2}):(\d{2})(?:\s+(.*))?$")
            .expect("date/time pattern is valid")
    })
}

/// Token positions used when reading a data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLayout {
    pub magnitude_scan: ScanWindow,
    pub location_offset: usize,
    pub default_location_start: usize,
    pub min_tokens: usize,
}

/// Fields read from one data line, before region tagging
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub occurred_at: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_km: Option<f64>,
    pub magnitude: Option<f64>,
    /// Token index the magnitude was taken from
    pub magnitude_index: Option<usize>,
    pub location_text: String,
}

/// Result of reading one line of the data block
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// A complete event line
    Event(ParsedLine),
    /// Blank, banner, column header or separator line
    Noise,
    /// Date-led line with too few tokens after the date/time pair
    InsufficientTokens { found: usize },
    /// Date-led line whose date, time or coordinates do not parse
    Unparseable { reason: String },
}

/// Whether a line is table decoration rather than data
pub fn is_noise_line(line: &str, noise_tokens: &[&str]) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return true;
    }

    let leading = trimmed.split_whitespace().next().unwrap_or_default();
    if !date_token_pattern().is_match(leading) {
        return true;
    }

    noise_tokens.iter().any(|token| trimmed.contains(token))
}

/// Read one line of the data block
pub fn parse_line(line: &str, layout: &LineLayout, noise_tokens: &[&str]) -> LineOutcome {
    if is_noise_line(line, noise_tokens) {
        return LineOutcome::Noise;
    }

    let Some(captures) = date_time_pattern().captures(line.trim()) else {
        return LineOutcome::Unparseable {
            reason: "missing or malformed HH:MM:SS time".to_string(),
        };
    };

    let group = |index: usize| -> u32 {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or_default()
    };

    let occurred_at = match NaiveDate::from_ymd_opt(group(1) as i32, group(2), group(3))
        .and_then(|date| date.and_hms_opt(group(4), group(5), group(6)))
    {
        Some(timestamp) => timestamp,
        None => {
            return LineOutcome::Unparseable {
                reason: format!("invalid calendar date/time '{}'", &captures[0]),
            };
        }
    };

    let rest = captures.get(7).map(|m| m.as_str()).unwrap_or_default();
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < layout.min_tokens.max(DEPTH_INDEX + 1) {
        return LineOutcome::InsufficientTokens {
            found: tokens.len(),
        };
    }

    // Phase one: fixed offsets
    let Some(latitude) = parse_number(tokens[LATITUDE_INDEX]) else {
        return LineOutcome::Unparseable {
            reason: format!("invalid latitude '{}'", tokens[LATITUDE_INDEX]),
        };
    };
    let Some(longitude) = parse_number(tokens[LONGITUDE_INDEX]) else {
        return LineOutcome::Unparseable {
            reason: format!("invalid longitude '{}'", tokens[LONGITUDE_INDEX]),
        };
    };
    let depth_km = parse_number(tokens[DEPTH_INDEX]);

    // Phase two: bounded magnitude scan
    let found = scan_magnitude(&tokens, layout.magnitude_scan);
    let location_start = match found {
        Some((index, _)) => index + layout.location_offset,
        None => layout.default_location_start,
    };

    let location_text = tokens
        .get(location_start..)
        .map(|rest| rest.join(" "))
        .unwrap_or_default();

    LineOutcome::Event(ParsedLine {
        occurred_at,
        latitude,
        longitude,
        depth_km,
        magnitude: found.map(|(_, value)| value),
        magnitude_index: found.map(|(index, _)| index),
        location_text,
    })
}
