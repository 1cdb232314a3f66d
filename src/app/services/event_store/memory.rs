//! In-memory event store used for dry runs and tests

use super::{EventRow, EventStore, NaturalKey, RowPayload, UpsertOutcome};
use crate::Result;
use crate::app::models::TargetTable;
use crate::app::services::region_registry::RegionAllowList;
use std::collections::HashMap;

/// Event store holding everything in hash maps
///
/// Mirrors the SQLite adapter's duplicate/update semantics so that a dry run
/// reports the same tallies a real run against an empty database would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    regions: HashMap<String, i64>,
    sub_regions: HashMap<(i64, String), i64>,
    rows: HashMap<NaturalKey, RowPayload>,
    next_id: i64,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with one region per allow-list entry
    pub fn with_regions(allow_list: &RegionAllowList) -> Self {
        let mut store = Self::new();
        for name in allow_list.names() {
            store.add_region(name);
        }
        store
    }

    /// Register a region, returning its id
    pub fn add_region(&mut self, name: &str) -> i64 {
        if let Some(&id) = self.regions.get(name) {
            return id;
        }
        self.next_id += 1;
        self.regions.insert(name.to_string(), self.next_id);
        self.next_id
    }

    /// Register a sub-region under an existing region id, returning its id
    pub fn add_sub_region(&mut self, region_id: i64, name: &str) -> i64 {
        let key = (region_id, name.to_string());
        if let Some(&id) = self.sub_regions.get(&key) {
            return id;
        }
        self.next_id += 1;
        self.sub_regions.insert(key, self.next_id);
        self.next_id
    }

    /// Number of stored rows in one table
    pub fn row_count(&self, table: TargetTable) -> usize {
        self.rows.keys().filter(|key| key.table == table).count()
    }
}

impl EventStore for InMemoryEventStore {
    fn region_ids(&self) -> Result<HashMap<String, i64>> {
        Ok(self.regions.clone())
    }

    fn sub_region_ids(&self) -> Result<HashMap<(i64, String), i64>> {
        Ok(self.sub_regions.clone())
    }

    fn upsert_event(&mut self, table: TargetTable, row: &EventRow<'_>) -> Result<UpsertOutcome> {
        let key = row.natural_key(table);
        let payload = row.payload(table);

        let outcome = match self.rows.get(&key) {
            Some(existing) if *existing == payload => UpsertOutcome::Duplicate,
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Inserted,
        };

        if outcome != UpsertOutcome::Duplicate {
            self.rows.insert(key, payload);
        }

        Ok(outcome)
    }
}
