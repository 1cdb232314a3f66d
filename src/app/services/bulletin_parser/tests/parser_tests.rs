//! Tests for the bulletin parser orchestration

use super::*;
use crate::app::services::bulletin_parser::{
    BulletinLayout, BulletinParser, MalformedBulletin, extract_data_block,
};
use crate::app::services::region_registry::{BoundingBox, RegionAllowList};

#[test]
fn test_parse_test_page() {
    let result = BulletinParser::default().parse(&create_test_page());

    assert!(!result.is_malformed());
    assert_eq!(result.events.len(), 4);
    assert_eq!(result.stats.total_lines, 15);
    assert_eq!(result.stats.noise_lines, 9);
    assert_eq!(result.stats.events_parsed, 4);
    assert_eq!(result.stats.insufficient_tokens, 1);
    assert_eq!(result.stats.unparseable_lines, 1);
    assert_eq!(result.stats.missing_magnitude, 1);
    assert_eq!(result.stats.inside_bounds, 3);
    assert_eq!(result.stats.region_resolved, 3);
    assert_eq!(result.stats.region_by_nearest, 0);
    assert_eq!(result.stats.errors.len(), 1);
}

#[test]
fn test_events_keep_source_order() {
    let result = BulletinParser::default().parse(&create_test_page());
    let times: Vec<String> = result
        .events
        .iter()
        .map(|event| event.occurred_at_string())
        .collect();

    assert_eq!(
        times,
        vec![
            "2024-01-15 14:30:00",
            "2024-01-15 14:12:41",
            "2024-01-15 13:58:02",
            "2024-01-15 13:40:10",
        ]
    );
}

#[test]
fn test_region_tagging() {
    let result = BulletinParser::default().parse(&create_test_page());
    let regions: Vec<Option<&str>> = result
        .events
        .iter()
        .map(|event| event.region_name.as_deref())
        .collect();

    assert_eq!(
        regions,
        vec![Some("İstanbul"), Some("Balıkesir"), None, Some("Kocaeli")]
    );
    assert!(result.events.iter().all(|event| event.source == "kandilli"));
    assert!(result.events.iter().all(|event| event.sub_region_name.is_none()));
}

#[test]
fn test_outside_bounds_is_not_tagged_even_if_named() {
    let page = "<pre>\n2024.01.15 14:30:00 38.0000 35.0000 7.5 -.- 4.2 -.- SOMEWHERE (BURSA)\n</pre>";
    let result = BulletinParser::default().parse(page);

    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].region_name, None);
    assert_eq!(result.stats.inside_bounds, 0);
}

#[test]
fn test_missing_markers_give_empty_malformed_result() {
    let parser = BulletinParser::default();

    let no_start = parser.parse("2024.01.15 14:30:00 40.98 29.02 7.5 -.- 4.2 -.- PLACE</pre>");
    assert!(no_start.events.is_empty());
    assert_eq!(no_start.malformed, Some(MalformedBulletin::MissingStartMarker));
    assert!(no_start.ensure_well_formed("test").is_err());

    let no_end = parser.parse("<pre>2024.01.15 14:30:00 40.98 29.02 7.5 -.- 4.2 -.- PLACE");
    assert!(no_end.events.is_empty());
    assert_eq!(no_end.malformed, Some(MalformedBulletin::MissingEndMarker));
}

#[test]
fn test_end_marker_must_follow_start_marker() {
    assert_eq!(
        extract_data_block("</pre> text <pre>", "<pre>", "</pre>"),
        Err(MalformedBulletin::MissingEndMarker)
    );
    assert_eq!(
        extract_data_block("a<pre>body</pre>b</pre>", "<pre>", "</pre>"),
        Ok("body")
    );
}

#[test]
fn test_empty_block_is_well_formed() {
    let result = BulletinParser::default().parse("<pre></pre>");
    assert!(result.events.is_empty());
    assert!(result.ensure_well_formed("test").is_ok());
    assert_eq!(result.stats.success_rate(), 0.0);
}

#[test]
fn test_custom_layout_and_allow_list() {
    let layout = BulletinLayout {
        start_marker: "BEGIN".to_string(),
        end_marker: "END".to_string(),
        bounds: BoundingBox {
            min_latitude: 36.0,
            max_latitude: 42.0,
            min_longitude: 26.0,
            max_longitude: 45.0,
        },
        ..BulletinLayout::default()
    };
    let parser = BulletinParser::new(layout, RegionAllowList::new(["Malatya"]), "koeri").unwrap();

    let page = "BEGIN\n2024.01.15 13:58:02 38.3512 38.1010 5.0 -.- 1.8 -.- YESILYURT (MALATYA)\nEND";
    let result = parser.parse(page);

    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].region_name.as_deref(), Some("Malatya"));
    assert_eq!(result.events[0].source, "koeri");
    assert_eq!(parser.layout().start_marker, "BEGIN");
}

#[test]
fn test_in_box_location_without_province_takes_nearest_capital() {
    let page = [
        "<pre>",
        "2024.01.15 14:30:00 40.7500 28.2000 11.2 -.- 2.4 -.- MARMARA DENIZI",
        "2024.01.15 14:10:00 40.4100 28.9500 8.0 -.- 1.9 -.- GEMLIK KORFEZI",
        "</pre>",
    ]
    .join("\n");
    let result = BulletinParser::default().parse(&page);

    let regions: Vec<Option<&str>> = result
        .events
        .iter()
        .map(|event| event.region_name.as_deref())
        .collect();
    assert_eq!(regions, vec![Some("Tekirdağ"), Some("Bursa")]);
    assert_eq!(result.stats.inside_bounds, 2);
    assert_eq!(result.stats.region_resolved, 2);
    assert_eq!(result.stats.region_by_nearest, 2);
}

#[test]
fn test_named_province_beats_nearest_capital() {
    // Epicentre sits next to Yalova but the text names Bursa
    let page = "<pre>\n2024.01.15 14:30:00 40.6500 29.2700 5.0 -.- 3.0 -.- ARMUTLU (BURSA)\n</pre>";
    let result = BulletinParser::default().parse(page);

    assert_eq!(result.events[0].region_name.as_deref(), Some("Bursa"));
    assert_eq!(result.stats.region_by_nearest, 0);
}

#[test]
fn test_allow_list_without_coordinates_leaves_region_empty() {
    let parser = BulletinParser::new(
        BulletinLayout::default(),
        RegionAllowList::new(["Gelibolu Yarımadası"]),
        "kandilli",
    )
    .unwrap();
    let page = "<pre>\n2024.01.15 14:30:00 40.7500 28.2000 11.2 -.- 2.4 -.- MARMARA DENIZI\n</pre>";
    let result = parser.parse(page);

    assert_eq!(result.events[0].region_name, None);
    assert_eq!(result.stats.inside_bounds, 1);
    assert_eq!(result.stats.region_resolved, 0);
}

#[test]
fn test_new_rejects_layout_without_depth_column() {
    let layout = BulletinLayout {
        min_tokens: 2,
        ..BulletinLayout::default()
    };
    let result = BulletinParser::new(layout, RegionAllowList::marmara(), "kandilli");
    assert!(matches!(result, Err(crate::Error::Configuration { .. })));

    let layout = BulletinLayout {
        end_marker: String::new(),
        ..BulletinLayout::default()
    };
    assert!(BulletinParser::new(layout, RegionAllowList::marmara(), "kandilli").is_err());
}
