//! Test utilities for the ingestion loop

use crate::app::models::{SeismicEvent, TargetTable};
use crate::app::services::event_store::{EventRow, EventStore, UpsertOutcome};
use crate::{Error, Result};
use chrono::NaiveDate;
use std::collections::HashMap;


/// Build a CSV-style event for a region and optional district
pub fn create_event(region: Option<&str>, sub_region: Option<&str>, magnitude: f64) -> SeismicEvent {
    SeismicEvent::new(
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap(),
        40.98,
        29.02,
        None,
        Some(magnitude),
        "TEST".to_string(),
        region.map(str::to_string),
        sub_region.map(str::to_string),
        "csv-import".to_string(),
    )
    .unwrap()
}

/// Store whose upserts always fail with a non-duplicate error
pub struct FailingStore;

impl EventStore for FailingStore {
    fn region_ids(&self) -> Result<HashMap<String, i64>> {
        Ok(HashMap::from([("Bursa".to_string(), 1)]))
    }

    fn sub_region_ids(&self) -> Result<HashMap<(i64, String), i64>> {
        Ok(HashMap::new())
    }

    fn upsert_event(&mut self, _table: TargetTable, _row: &EventRow<'_>) -> Result<UpsertOutcome> {
        Err(Error::persistence("disk full"))
    }
}
