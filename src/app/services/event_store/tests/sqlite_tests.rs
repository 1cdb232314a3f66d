//! Tests for the SQLite event store

use super::*;
use crate::app::models::TargetTable;
use crate::app::services::event_store::{EventRow, EventStore, SqliteEventStore, UpsertOutcome};
use crate::app::services::region_registry::RegionAllowList;
use tempfile::TempDir;

fn seeded_store() -> (SqliteEventStore, i64) {
    let mut store = SqliteEventStore::open_in_memory().unwrap();
    store.seed_regions(&RegionAllowList::marmara()).unwrap();
    let istanbul = *store.region_ids().unwrap().get("İstanbul").unwrap();
    (store, istanbul)
}

#[test]
fn test_seed_regions_is_idempotent() {
    let mut store = SqliteEventStore::open_in_memory().unwrap();
    let allow_list = RegionAllowList::marmara();

    assert_eq!(store.seed_regions(&allow_list).unwrap(), 11);
    assert_eq!(store.seed_regions(&allow_list).unwrap(), 0);
    assert_eq!(store.region_ids().unwrap().len(), 11);
}

#[test]
fn test_upsert_outcomes() {
    let (mut store, istanbul) = seeded_store();
    let event = create_event(30, 4.2);
    let row = EventRow::new(istanbul, None, &event);

    assert_eq!(
        store.upsert_event(TargetTable::Earthquakes, &row).unwrap(),
        UpsertOutcome::Inserted
    );
    assert_eq!(
        store.upsert_event(TargetTable::Earthquakes, &row).unwrap(),
        UpsertOutcome::Duplicate
    );

    let mut revised = event.clone();
    revised.depth_km = Some(9.1);
    assert_eq!(
        store
            .upsert_event(TargetTable::Earthquakes, &EventRow::new(istanbul, None, &revised))
            .unwrap(),
        UpsertOutcome::Updated
    );
    assert_eq!(store.row_count(TargetTable::Earthquakes).unwrap(), 1);
}

#[test]
fn test_null_sub_region_still_deduplicates() {
    let (mut store, istanbul) = seeded_store();
    let event = create_event(45, 2.8);

    for _ in 0..3 {
        store
            .upsert_event(
                TargetTable::HistoricalEarthquakes,
                &EventRow::new(istanbul, None, &event),
            )
            .unwrap();
    }
    assert_eq!(
        store.row_count(TargetTable::HistoricalEarthquakes).unwrap(),
        1
    );
}

#[test]
fn test_historical_key_includes_epicentre() {
    let (mut store, istanbul) = seeded_store();
    let first = create_event(0, 3.1);
    let mut second = first.clone();
    second.latitude = 40.90;
    second.longitude = 28.80;

    for _ in 0..2 {
        for event in [&first, &second] {
            store
                .upsert_event(
                    TargetTable::HistoricalEarthquakes,
                    &EventRow::new(istanbul, None, event),
                )
                .unwrap();
        }
    }

    for event in [&first, &second] {
        assert_eq!(
            store
                .upsert_event(
                    TargetTable::HistoricalEarthquakes,
                    &EventRow::new(istanbul, None, event),
                )
                .unwrap(),
            UpsertOutcome::Duplicate
        );
    }
    assert_eq!(
        store.row_count(TargetTable::HistoricalEarthquakes).unwrap(),
        2
    );
}

#[test]
fn test_sub_regions_are_scoped_by_region() {
    let (mut store, istanbul) = seeded_store();
    let kadikoy = store.add_sub_region("İstanbul", "Kadıköy").unwrap();
    assert_eq!(store.add_sub_region("İstanbul", "Kadıköy").unwrap(), kadikoy);
    store.add_sub_region("Kocaeli", "Merkez").unwrap();
    store.add_sub_region("Bursa", "Merkez").unwrap();

    let sub_regions = store.sub_region_ids().unwrap();
    assert_eq!(sub_regions.len(), 3);
    assert_eq!(
        sub_regions.get(&(istanbul, "Kadıköy".to_string())),
        Some(&kadikoy)
    );
    assert!(store.add_sub_region("Kayseri", "Merkez").is_err());
}

#[test]
fn test_database_file_persists_between_opens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("seismic.db");
    let event = create_event(10, 3.3);

    {
        let mut store = SqliteEventStore::open(&path).unwrap();
        store.seed_regions(&RegionAllowList::marmara()).unwrap();
        let id = *store.region_ids().unwrap().get("İstanbul").unwrap();
        store
            .upsert_event(TargetTable::Earthquakes, &EventRow::new(id, None, &event))
            .unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
    }

    let mut reopened = SqliteEventStore::open(&path).unwrap();
    let id = *reopened.region_ids().unwrap().get("İstanbul").unwrap();
    assert_eq!(
        reopened
            .upsert_event(TargetTable::Earthquakes, &EventRow::new(id, None, &event))
            .unwrap(),
        UpsertOutcome::Duplicate
    );
}
