//! Test utilities for event store adapters

use crate::app::models::SeismicEvent;
use chrono::NaiveDate;

mod sqlite_tests;

/// Build a valid event at 2024-01-15 with the given minute and magnitude
pub fn create_event(minute: u32, magnitude: f64) -> SeismicEvent {
    SeismicEvent::new(
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, minute, 0)
            .unwrap(),
        40.98,
        29.02,
        Some(7.5),
        Some(magnitude),
        "SOME-PLACE (ISTANBUL)".to_string(),
        Some("İstanbul".to_string()),
        None,
        "kandilli".to_string(),
    )
    .unwrap()
}
