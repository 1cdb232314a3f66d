//! Regional CSV ingestion filter
//!
//! Reads earthquake exports whose header naming is not fixed, infers the
//! semantic columns from synonym lists, keeps only rows in allow-listed
//! provinces and normalizes them into [`SeismicEvent`] records.
//!
//! ## Architecture
//!
//! - [`column_mapping`] - Header normalization and first-match synonym resolution
//! - [`field_parsers`] - Cell lookup, decimal and datetime parsing
//! - [`record_parser`] - Per-row region filter, field extraction and validation
//! - [`filter`] - File/bytes orchestration
//! - [`stats`] - Filter statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use seismic_ingest::app::services::csv_ingest::RegionalCsvFilter;
//! use seismic_ingest::TargetTable;
//!
//! let csv = "Il,Magnitude,Date,Lat,Lon\nİstanbul,4.2,2024-01-15,41.00,29.00\nKayseri,3.1,2024-01-15,38.7,35.5\n";
//! let result = RegionalCsvFilter::default()
//!     .filter_bytes(csv.as_bytes(), "inline.csv", TargetTable::Earthquakes)
//!     .unwrap();
//!
//! assert_eq!(result.events.len(), 1);
//! assert_eq!(result.events[0].region_name.as_deref(), Some("İstanbul"));
//! ```
//!
//! [`SeismicEvent`]: crate::app::models::SeismicEvent

pub mod column_mapping;
pub mod field_parsers;
pub mod filter;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{ColumnMapping, SemanticField};
pub use filter::RegionalCsvFilter;
pub use record_parser::RecordOutcome;
pub use stats::{CsvFilterResult, CsvFilterStats};
