//! Column mapping for CSV exports with unknown header naming
//!
//! Each semantic field has an ordered list of accepted header spellings. The
//! mapping is resolved once per file: for every field, the first synonym that
//! exists in the header wins, regardless of where it appears in the header.

use crate::constants::synonyms;
use csv::StringRecord;
use std::collections::HashMap;
use std::fmt;

/// Semantic columns the filter knows how to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticField {
    Region,
    SubRegion,
    Magnitude,
    Depth,
    DateTime,
    TimeOfDay,
    Latitude,
    Longitude,
    Location,
}

impl SemanticField {
    /// Fields a row cannot be retained without
    pub const REQUIRED: [SemanticField; 5] = [
        SemanticField::Region,
        SemanticField::Magnitude,
        SemanticField::DateTime,
        SemanticField::Latitude,
        SemanticField::Longitude,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SemanticField::Region => "region",
            SemanticField::SubRegion => "sub-region",
            SemanticField::Magnitude => "magnitude",
            SemanticField::Depth => "depth",
            SemanticField::DateTime => "datetime",
            SemanticField::TimeOfDay => "time",
            SemanticField::Latitude => "latitude",
            SemanticField::Longitude => "longitude",
            SemanticField::Location => "location",
        }
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic field to ordered synonym list
pub const SYNONYM_TABLE: &[(SemanticField, &[&str])] = &[
    (SemanticField::Region, synonyms::REGION),
    (SemanticField::SubRegion, synonyms::SUB_REGION),
    (SemanticField::Magnitude, synonyms::MAGNITUDE),
    (SemanticField::Depth, synonyms::DEPTH),
    (SemanticField::DateTime, synonyms::DATETIME),
    (SemanticField::TimeOfDay, synonyms::TIME_OF_DAY),
    (SemanticField::Latitude, synonyms::LATITUDE),
    (SemanticField::Longitude, synonyms::LONGITUDE),
    (SemanticField::Location, synonyms::LOCATION),
];

/// Column mapping built once per file
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    /// Normalized header cell to index; the first occurrence wins
    pub name_to_index: HashMap<String, usize>,

    /// Resolved index per semantic field
    pub fields: HashMap<SemanticField, usize>,
}

impl ColumnMapping {
    /// Normalize the header and resolve every semantic field
    pub fn analyze(headers: &StringRecord) -> Self {
        let mut name_to_index = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            name_to_index
                .entry(normalize_header(header))
                .or_insert(index);
        }

        let mut fields = HashMap::new();
        for (field, candidates) in SYNONYM_TABLE {
            if let Some(index) = candidates
                .iter()
                .find_map(|candidate| name_to_index.get(*candidate).copied())
            {
                fields.insert(*field, index);
            }
        }

        ColumnMapping {
            name_to_index,
            fields,
        }
    }

    /// Get the column index for a semantic field
    pub fn index(&self, field: SemanticField) -> Option<usize> {
        self.fields.get(&field).copied()
    }

    pub fn has_field(&self, field: SemanticField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Required fields that no header column resolved to
    ///
    /// A time column stands in for a missing datetime column.
    pub fn missing_required(&self) -> Vec<SemanticField> {
        SemanticField::REQUIRED
            .into_iter()
            .filter(|field| match field {
                SemanticField::DateTime => {
                    !self.has_field(SemanticField::DateTime)
                        && !self.has_field(SemanticField::TimeOfDay)
                }
                other => !self.has_field(*other),
            })
            .collect()
    }
}

/// Normalize a header cell for synonym comparison
///
/// Trims, drops a UTF-8 byte order mark and lower-cases with the Turkish
/// capital dotted `İ` mapped to plain `i`.
pub fn normalize_header(header: &str) -> String {
    let trimmed = header.trim_start_matches('\u{feff}').trim();
    let mut normalized = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            'İ' => normalized.push('i'),
            other => normalized.extend(other.to_lowercase()),
        }
    }
    normalized
}
