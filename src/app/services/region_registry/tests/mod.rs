//! Test utilities for the region registry

use std::collections::HashMap;

mod allow_list_tests;

/// Region lookup shaped like the datastore output
pub fn create_region_lookup() -> HashMap<String, i64> {
    HashMap::from([
        ("İstanbul".to_string(), 34),
        ("Kocaeli".to_string(), 41),
        ("Tekirdağ".to_string(), 59),
    ])
}

/// Sub-region lookup with a district name shared by two provinces
pub fn create_sub_region_lookup() -> HashMap<(i64, String), i64> {
    HashMap::from([
        ((34, "Kadıköy".to_string()), 3401),
        ((34, "Merkez".to_string()), 3499),
        ((41, "Gölcük".to_string()), 4101),
        ((41, "Merkez".to_string()), 4199),
    ])
}
