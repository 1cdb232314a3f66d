//! Region registry providing O(1) province and district lookups
//!
//! This module holds the two text/geometry filters that decide which region
//! an event belongs to, and the directory that maps region names to
//! datastore identifiers during the per-row persistence loop.

use crate::app::services::event_store::EventStore;
use crate::Result;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

pub mod allow_list;
pub mod bounding_box;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use allow_list::{RegionAllowList, fold_region_name};
pub use bounding_box::BoundingBox;

/// Name-to-identifier directory for regions and sub-regions
///
/// Built once per ingestion run from the datastore's bulk lookups. Names are
/// indexed in folded form so that `ISTANBUL` and `İstanbul` hit the same id.
/// Sub-regions are scoped by their parent region, since district names repeat
/// across provinces.
#[derive(Debug, Clone)]
pub struct RegionDirectory {
    /// Region ids indexed by folded name
    pub(crate) regions: HashMap<String, i64>,

    /// Sub-region ids indexed by (parent region id, folded name)
    pub(crate) sub_regions: HashMap<(i64, String), i64>,

    /// Timestamp when the directory was loaded
    pub(crate) load_time: Instant,
}

impl RegionDirectory {
    /// Build a directory from raw name/id mappings
    pub fn new(
        regions: HashMap<String, i64>,
        sub_regions: HashMap<(i64, String), i64>,
    ) -> Self {
        let regions = regions
            .into_iter()
            .map(|(name, id)| (fold_region_name(&name), id))
            .collect();
        let sub_regions = sub_regions
            .into_iter()
            .map(|((region_id, name), id)| ((region_id, fold_region_name(&name)), id))
            .collect();

        Self {
            regions,
            sub_regions,
            load_time: Instant::now(),
        }
    }

    /// Load both lookups from a datastore
    pub fn load<S: EventStore + ?Sized>(store: &S) -> Result<Self> {
        let directory = Self::new(store.region_ids()?, store.sub_region_ids()?);
        debug!(
            "Loaded region directory: {} regions, {} sub-regions",
            directory.region_count(),
            directory.sub_region_count()
        );
        Ok(directory)
    }

    /// Get a region id by name (O(1) lookup)
    pub fn region_id(&self, name: &str) -> Option<i64> {
        self.regions.get(&fold_region_name(name)).copied()
    }

    /// Get a sub-region id by parent region and name (O(1) lookup)
    pub fn sub_region_id(&self, region_id: i64, name: &str) -> Option<i64> {
        self.sub_regions
            .get(&(region_id, fold_region_name(name)))
            .copied()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn sub_region_count(&self) -> usize {
        self.sub_regions.len()
    }

    /// Time elapsed since the directory was loaded
    pub fn age(&self) -> std::time::Duration {
        self.load_time.elapsed()
    }
}
