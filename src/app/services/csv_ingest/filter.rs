//! Regional CSV filter orchestration
//!
//! Reads the header once, resolves the column mapping and then walks the
//! rows one at a time. Only a missing or unreadable file is fatal; every
//! row-level problem is counted in [`CsvFilterStats`].

use std::path::Path;
use tracing::{debug, info, warn};

use super::column_mapping::ColumnMapping;
use super::record_parser::{RecordOutcome, parse_event_record};
use super::stats::{CsvFilterResult, CsvFilterStats};
use crate::app::models::{EventSource, TargetTable};
use crate::app::services::region_registry::RegionAllowList;
use crate::{Error, Result};

/// Filter for Marmara-region earthquake CSV exports
#[derive(Debug, Clone)]
pub struct RegionalCsvFilter {
    allow_list: RegionAllowList,
    source_label: String,
}

impl Default for RegionalCsvFilter {
    fn default() -> Self {
        Self::new(RegionAllowList::marmara(), EventSource::CsvImport.label())
    }
}

impl RegionalCsvFilter {
    pub fn new(allow_list: RegionAllowList, source_label: impl Into<String>) -> Self {
        Self {
            allow_list,
            source_label: source_label.into(),
        }
    }

    pub fn allow_list(&self) -> &RegionAllowList {
        &self.allow_list
    }

    /// Read and filter a CSV file
    pub fn filter_file(&self, path: &Path, table: TargetTable) -> Result<CsvFilterResult> {
        info!("Filtering CSV file: {}", path.display());

        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;

        self.filter_bytes(&bytes, &path.display().to_string(), table)
    }

    /// Filter CSV content already held in memory
    pub fn filter_bytes(
        &self,
        bytes: &[u8],
        source_name: &str,
        table: TargetTable,
    ) -> Result<CsvFilterResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .double_quote(false)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| Error::csv_parsing(source_name, "Failed to read header row", Some(e)))?
            .clone();

        let mapping = ColumnMapping::analyze(&headers);
        debug!("Resolved column mapping: {:?}", mapping.fields);

        let mut stats = CsvFilterStats::new();
        let missing = mapping.missing_required();
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(|field| field.to_string()).collect();
            warn!(
                "{}: no column found for {}; affected rows will be skipped",
                source_name,
                names.join(", ")
            );
            stats.missing_columns = names;
        }

        let mut events = Vec::new();
        for (index, record) in reader.records().enumerate() {
            // Header is line 1
            let line_number = index + 2;
            stats.total_rows += 1;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    stats.skipped_malformed += 1;
                    stats.add_error(format!("Row {}: {}", line_number, e));
                    continue;
                }
            };

            match parse_event_record(&record, &mapping, &self.allow_list, &self.source_label) {
                RecordOutcome::Retained(event) => {
                    stats.retained += 1;
                    events.push(event);
                }
                RecordOutcome::OutOfRegion => stats.dropped_out_of_region += 1,
                RecordOutcome::Incomplete { reason } => {
                    stats.skipped_incomplete += 1;
                    stats.add_error(format!("Row {}: {}", line_number, reason));
                }
            }
        }

        info!(
            "Retained {} of {} rows from {} ({} out of region, {} skipped)",
            stats.retained,
            stats.total_rows,
            source_name,
            stats.dropped_out_of_region,
            stats.rows_skipped()
        );

        Ok(CsvFilterResult {
            events,
            stats,
            table,
        })
    }
}
