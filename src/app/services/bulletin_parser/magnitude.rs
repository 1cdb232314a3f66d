//! Magnitude selection over the bulletin's alternative magnitude columns
//!
//! The bulletin reports MD, ML and Mw side by side and any of them may be the
//! `-.-` placeholder. Magnitude is therefore not read at a fixed offset: a
//! bounded window of tokens is scanned and the first number strictly inside
//! (0, 10) is taken as the representative magnitude.

use crate::app::models::is_valid_magnitude;
use crate::constants::bulletin_layout::{MAGNITUDE_SCAN_END, MAGNITUDE_SCAN_START};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Inclusive token index range inspected by the magnitude scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWindow {
    pub start: usize,
    pub end: usize,
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self {
            start: MAGNITUDE_SCAN_START,
            end: MAGNITUDE_SCAN_END,
        }
    }
}

impl ScanWindow {
    pub fn new(start: usize, end: usize) -> Result<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(Error::configuration(format!(
                "Magnitude scan window is inverted: start {} > end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Find the first token inside the window that is a valid magnitude
///
/// Returns the token index together with the value. Tokens past the end of
/// the slice are ignored, so a short line simply yields `None`.
pub fn scan_magnitude(tokens: &[&str], window: ScanWindow) -> Option<(usize, f64)> {
    if window.start >= tokens.len() {
        return None;
    }
    let last = window.end.min(tokens.len() - 1);

    (window.start..=last).find_map(|index| {
        parse_number(tokens[index])
            .filter(|value| is_valid_magnitude(*value))
            .map(|value| (index, value))
    })
}

/// Parse a bulletin numeric token, accepting a decimal comma
///
/// Placeholders such as `-.-` and non-finite values yield `None`.
pub fn parse_number(token: &str) -> Option<f64> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
