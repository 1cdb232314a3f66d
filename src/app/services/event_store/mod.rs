//! Persistence adapter for normalized seismic events
//!
//! The ingestion core only needs three things from a datastore: bulk
//! name-to-id lookups for regions and sub-regions, and an idempotent
//! insert-or-update that says what it did. [`EventStore`] captures that
//! contract; [`SqliteEventStore`] backs the CLI and [`InMemoryEventStore`]
//! backs dry runs and tests.
//!
//! Each target table has its own natural key:
//! - `earthquakes`: region, sub-region, occurrence time, latitude, longitude
//! - `historical_earthquakes`: region, sub-region, occurrence time, magnitude,
//!   latitude, longitude
//!
//! A row whose key already exists with an identical payload is reported as a
//! duplicate; a differing payload is updated in place.

use crate::Result;
use crate::app::models::{SeismicEvent, TargetTable};
use std::collections::HashMap;
use std::fmt;

pub mod memory;
pub mod schema;
pub mod sqlite;

#[cfg(test)]
pub mod tests;

pub use memory::InMemoryEventStore;
pub use sqlite::SqliteEventStore;

/// Datastore contract consumed by the ingestion loop
pub trait EventStore {
    /// Region name to id for every top-level region
    fn region_ids(&self) -> Result<HashMap<String, i64>>;

    /// (parent region id, sub-region name) to id for every sub-region
    fn sub_region_ids(&self) -> Result<HashMap<(i64, String), i64>>;

    /// Insert or update one event; duplicate keys are not errors
    fn upsert_event(&mut self, table: TargetTable, row: &EventRow<'_>) -> Result<UpsertOutcome>;
}

/// An event with its region references resolved
#[derive(Debug, Clone, Copy)]
pub struct EventRow<'a> {
    pub region_id: i64,
    pub sub_region_id: Option<i64>,
    pub event: &'a SeismicEvent,
}

impl<'a> EventRow<'a> {
    pub fn new(region_id: i64, sub_region_id: Option<i64>, event: &'a SeismicEvent) -> Self {
        Self {
            region_id,
            sub_region_id,
            event,
        }
    }

    /// Natural key of this row in the given table
    pub fn natural_key(&self, table: TargetTable) -> NaturalKey {
        let mut discriminators = vec![
            Some(self.event.latitude.to_bits()),
            Some(self.event.longitude.to_bits()),
        ];
        if table == TargetTable::HistoricalEarthquakes {
            discriminators.push(self.event.magnitude.map(f64::to_bits));
        }

        NaturalKey {
            table,
            region_id: self.region_id,
            sub_region_id: self.sub_region_id,
            occurred_at: self.event.occurred_at_string(),
            discriminators,
        }
    }

    /// Columns outside the natural key, used to tell duplicates from updates
    pub fn payload(&self, table: TargetTable) -> RowPayload {
        let event = self.event;
        let magnitude = match table {
            TargetTable::Earthquakes => event.magnitude,
            TargetTable::HistoricalEarthquakes => None,
        };

        RowPayload {
            depth_km: event.depth_km,
            magnitude,
            location_text: event.location_text.clone(),
            source: event.source.clone(),
        }
    }
}

/// Identity of a stored row within one table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NaturalKey {
    pub table: TargetTable,
    pub region_id: i64,
    pub sub_region_id: Option<i64>,
    pub occurred_at: String,
    /// Table-specific numeric key columns as raw f64 bits
    pub discriminators: Vec<Option<u64>>,
}

/// Non-key columns of a stored row
///
/// Columns that belong to the table's natural key are left as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPayload {
    pub depth_km: Option<f64>,
    pub magnitude: Option<f64>,
    pub location_text: String,
    pub source: String,
}

/// What an upsert did with a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpsertOutcome {
    /// New natural key, row written
    Inserted,
    /// Existing key with a different payload, row overwritten
    Updated,
    /// Existing key with an identical payload, or a unique-key conflict
    Duplicate,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UpsertOutcome::Inserted => "inserted",
            UpsertOutcome::Updated => "updated",
            UpsertOutcome::Duplicate => "duplicate",
        };
        f.write_str(label)
    }
}
