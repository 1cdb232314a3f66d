//! Data models for seismic event ingestion
//!
//! This module contains the normalized event record produced by both the
//! bulletin parser and the CSV ingestion filter, along with the enumerated
//! persistence targets.

use crate::constants::{
    self, EARTHQUAKES_TABLE, HISTORICAL_EARTHQUAKES_TABLE, bulletin_layout,
};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Seismic Event
// =============================================================================

/// Normalized seismic event shared by every ingestion path
///
/// The occurrence time is kept exactly as the source reported it; no
/// timezone conversion is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeismicEvent {
    /// Occurrence time in the source's local time
    pub occurred_at: NaiveDateTime,

    /// Epicentre latitude in decimal degrees
    pub latitude: f64,

    /// Epicentre longitude in decimal degrees
    pub longitude: f64,

    /// Hypocentre depth in kilometres
    pub depth_km: Option<f64>,

    /// Representative magnitude, always within (0, 10) when present
    pub magnitude: Option<f64>,

    /// Free-text location as reported by the source
    pub location_text: String,

    /// Canonical allow-list province name
    pub region_name: Option<String>,

    /// District name as reported by the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_region_name: Option<String>,

    /// Source label (bulletin or CSV import)
    pub source: String,
}

impl SeismicEvent {
    /// Create a new event with validation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        occurred_at: NaiveDateTime,
        latitude: f64,
        longitude: f64,
        depth_km: Option<f64>,
        magnitude: Option<f64>,
        location_text: String,
        region_name: Option<String>,
        sub_region_name: Option<String>,
        source: String,
    ) -> Result<Self> {
        let event = Self {
            occurred_at,
            latitude,
            longitude,
            depth_km,
            magnitude,
            location_text,
            region_name,
            sub_region_name,
            source,
        };

        event.validate()?;
        Ok(event)
    }

    /// Validate coordinate and magnitude ranges
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::data_validation(format!(
                "Invalid latitude {}: must be between -90 and 90 degrees",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::data_validation(format!(
                "Invalid longitude {}: must be between -180 and 180 degrees",
                self.longitude
            )));
        }

        if let Some(magnitude) = self.magnitude {
            if !is_valid_magnitude(magnitude) {
                return Err(Error::data_validation(format!(
                    "Invalid magnitude {}: must be strictly between {} and {}",
                    magnitude,
                    bulletin_layout::MAGNITUDE_MIN_EXCLUSIVE,
                    bulletin_layout::MAGNITUDE_MAX_EXCLUSIVE
                )));
            }
        }

        if let Some(depth) = self.depth_km {
            if !depth.is_finite() || depth < 0.0 {
                return Err(Error::data_validation(format!(
                    "Invalid depth {}: must be a non-negative number of kilometres",
                    depth
                )));
            }
        }

        if self.source.trim().is_empty() {
            return Err(Error::data_validation("Event source cannot be empty"));
        }

        Ok(())
    }

    /// Occurrence time in the storage layout
    pub fn occurred_at_string(&self) -> String {
        self.occurred_at
            .format(constants::STORED_DATETIME_FORMAT)
            .to_string()
    }
}

/// Check a magnitude against the open interval (0, 10)
pub fn is_valid_magnitude(value: f64) -> bool {
    value > bulletin_layout::MAGNITUDE_MIN_EXCLUSIVE
        && value < bulletin_layout::MAGNITUDE_MAX_EXCLUSIVE
}

// =============================================================================
// Event Source
// =============================================================================

/// Where an event record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    /// Kandilli plaintext bulletin
    Bulletin,
    /// Regional CSV export
    CsvImport,
}

impl EventSource {
    /// Default label written on events
    pub fn label(&self) -> &'static str {
        match self {
            EventSource::Bulletin => constants::BULLETIN_SOURCE_LABEL,
            EventSource::CsvImport => constants::CSV_SOURCE_LABEL,
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Target Table
// =============================================================================

/// Persistence tables an ingestion run may write to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetTable {
    /// Recent events; keyed by time and epicentre
    #[default]
    Earthquakes,
    /// Historical catalogue; keyed by time and magnitude
    HistoricalEarthquakes,
}

impl TargetTable {
    /// All supported tables
    pub const ALL: [TargetTable; 2] = [TargetTable::Earthquakes, TargetTable::HistoricalEarthquakes];

    /// SQL table name
    pub fn table_name(&self) -> &'static str {
        match self {
            TargetTable::Earthquakes => EARTHQUAKES_TABLE,
            TargetTable::HistoricalEarthquakes => HISTORICAL_EARTHQUAKES_TABLE,
        }
    }
}

impl fmt::Display for TargetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for TargetTable {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "earthquakes" => Ok(TargetTable::Earthquakes),
            "historical_earthquakes" => Ok(TargetTable::HistoricalEarthquakes),
            other => Err(format!(
                "Unknown table '{}': expected one of {}, {}",
                other, EARTHQUAKES_TABLE, HISTORICAL_EARTHQUAKES_TABLE
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_event_rejects_out_of_range_magnitude() {
        let result = SeismicEvent::new(
            sample_time(),
            40.98,
            29.02,
            Some(7.5),
            Some(10.0),
            "SOME-PLACE".to_string(),
            None,
            None,
            "kandilli".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_event_accepts_missing_magnitude() {
        let event = SeismicEvent::new(
            sample_time(),
            40.98,
            29.02,
            None,
            None,
            "SOME-PLACE".to_string(),
            None,
            None,
            "kandilli".to_string(),
        )
        .unwrap();
        assert_eq!(event.occurred_at_string(), "2024-01-15 14:30:00");
    }

    #[test]
    fn test_event_rejects_invalid_latitude() {
        let result = SeismicEvent::new(
            sample_time(),
            91.0,
            29.02,
            None,
            Some(3.0),
            String::new(),
            None,
            None,
            "csv-import".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_target_table_parsing() {
        assert_eq!(
            "historical-earthquakes".parse::<TargetTable>().unwrap(),
            TargetTable::HistoricalEarthquakes
        );
        assert_eq!(
            "EARTHQUAKES".parse::<TargetTable>().unwrap(),
            TargetTable::Earthquakes
        );
        assert!("shelters".parse::<TargetTable>().is_err());
        assert_eq!(TargetTable::HistoricalEarthquakes.to_string(), "historical_earthquakes");
    }

    #[test]
    fn test_magnitude_bounds_are_exclusive() {
        assert!(!is_valid_magnitude(0.0));
        assert!(is_valid_magnitude(0.1));
        assert!(is_valid_magnitude(9.9));
        assert!(!is_valid_magnitude(10.0));
        assert!(!is_valid_magnitude(f64::NAN));
    }
}
