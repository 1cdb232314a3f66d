//! Field parsing utilities for regional CSV rows
//!
//! Every helper treats a missing column, a short row and an empty cell the
//! same way: the value is absent.

use super::column_mapping::{ColumnMapping, SemanticField};
use crate::constants::{CSV_DATE_FORMATS, CSV_DATETIME_FORMATS, CSV_TIME_FORMATS};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::StringRecord;

/// Get a trimmed, non-empty cell for a semantic field
pub fn get_optional_field<'r>(
    record: &'r StringRecord,
    mapping: &ColumnMapping,
    field: SemanticField,
) -> Option<&'r str> {
    mapping
        .index(field)
        .and_then(|index| record.get(index))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parse an optional decimal field, accepting a decimal comma
pub fn parse_optional_decimal(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field: SemanticField,
) -> Option<f64> {
    get_optional_field(record, mapping, field).and_then(parse_decimal)
}

/// Parse an optional text field
pub fn parse_optional_string(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field: SemanticField,
) -> Option<String> {
    get_optional_field(record, mapping, field).map(str::to_string)
}

/// Parse the occurrence time of a row
///
/// A datetime column holding only a date is combined with the time-of-day
/// column when one is present, otherwise it gets midnight. Without a
/// datetime column the time column is tried as a full timestamp.
pub fn parse_occurred_at(record: &StringRecord, mapping: &ColumnMapping) -> Option<NaiveDateTime> {
    let time_value = get_optional_field(record, mapping, SemanticField::TimeOfDay);

    match get_optional_field(record, mapping, SemanticField::DateTime) {
        Some(date_value) => combine_date_and_time(date_value, time_value),
        None => time_value.and_then(parse_datetime_value),
    }
}

/// Parse a decimal number; `4,2` and `4.2` are equivalent
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Parse a full timestamp, falling back to a date at midnight
pub fn parse_datetime_value(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    CSV_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| parse_date_value(value).map(|date| date.and_time(NaiveTime::MIN)))
}

/// Parse a date-only value
pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    CSV_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value.trim(), format).ok())
}

/// Parse a time-of-day value
pub fn parse_time_value(value: &str) -> Option<NaiveTime> {
    CSV_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value.trim(), format).ok())
}

fn combine_date_and_time(date_value: &str, time_value: Option<&str>) -> Option<NaiveDateTime> {
    if let Some(date) = parse_date_value(date_value) {
        let time = time_value
            .and_then(parse_time_value)
            .unwrap_or(NaiveTime::MIN);
        return Some(date.and_time(time));
    }

    parse_datetime_value(date_value)
}
