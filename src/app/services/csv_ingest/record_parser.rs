//! Individual row parsing for regional CSV exports
//!
//! The region filter runs first: a row outside the allow-list is dropped
//! before any other cell is looked at, however complete it is.

use csv::StringRecord;
use tracing::trace;

use super::column_mapping::{ColumnMapping, SemanticField};
use super::field_parsers::{
    get_optional_field, parse_occurred_at, parse_optional_decimal, parse_optional_string,
};
use crate::app::models::{SeismicEvent, is_valid_magnitude};
use crate::app::services::region_registry::RegionAllowList;

/// What happened to one data row
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Row normalized into an event
    Retained(SeismicEvent),
    /// Region cell absent or not allow-listed; dropped silently
    OutOfRegion,
    /// Allow-listed row missing a required value
    Incomplete { reason: String },
}

/// Parse a single data row into an event
pub fn parse_event_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
    allow_list: &RegionAllowList,
    source_label: &str,
) -> RecordOutcome {
    let Some(raw_region) = get_optional_field(record, mapping, SemanticField::Region) else {
        return RecordOutcome::OutOfRegion;
    };
    let Some(region) = allow_list.resolve(raw_region) else {
        trace!("Dropping row outside allow-list: '{}'", raw_region);
        return RecordOutcome::OutOfRegion;
    };

    let magnitude = parse_optional_decimal(record, mapping, SemanticField::Magnitude)
        .filter(|value| is_valid_magnitude(*value));
    let depth_km = parse_optional_decimal(record, mapping, SemanticField::Depth)
        .filter(|value| *value >= 0.0);
    let occurred_at = parse_occurred_at(record, mapping);
    let latitude = parse_optional_decimal(record, mapping, SemanticField::Latitude);
    let longitude = parse_optional_decimal(record, mapping, SemanticField::Longitude);
    let sub_region = parse_optional_string(record, mapping, SemanticField::SubRegion);

    let mut missing = Vec::new();
    if magnitude.is_none() {
        missing.push(SemanticField::Magnitude);
    }
    if occurred_at.is_none() {
        missing.push(SemanticField::DateTime);
    }
    if latitude.is_none() {
        missing.push(SemanticField::Latitude);
    }
    if longitude.is_none() {
        missing.push(SemanticField::Longitude);
    }

    let (Some(magnitude), Some(occurred_at), Some(latitude), Some(longitude)) =
        (magnitude, occurred_at, latitude, longitude)
    else {
        let fields: Vec<&str> = missing.iter().map(SemanticField::name).collect();
        return RecordOutcome::Incomplete {
            reason: format!("missing or invalid {}", fields.join(", ")),
        };
    };

    let location_text = parse_optional_string(record, mapping, SemanticField::Location)
        .unwrap_or_else(|| match &sub_region {
            Some(district) => format!("{} ({})", district, region),
            None => region.to_string(),
        });

    match SeismicEvent::new(
        occurred_at,
        latitude,
        longitude,
        depth_km,
        Some(magnitude),
        location_text,
        Some(region.to_string()),
        sub_region,
        source_label.to_string(),
    ) {
        Ok(event) => RecordOutcome::Retained(event),
        Err(e) => RecordOutcome::Incomplete {
            reason: e.to_string(),
        },
    }
}
