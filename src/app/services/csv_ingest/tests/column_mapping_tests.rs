use super::super::column_mapping::{ColumnMapping, SemanticField, normalize_header};
use super::create_mapping;

#[test]
fn test_normalize_header() {
    assert_eq!(normalize_header("  Magnitude "), "magnitude");
    assert_eq!(normalize_header("İl"), "il");
    assert_eq!(normalize_header("\u{feff}ILCE"), "ilce");
    assert_eq!(normalize_header("Büyüklük"), "büyüklük");
}

#[test]
fn test_spec_style_header_mapping() {
    let mapping = create_mapping(&["Il", "Magnitude", "Date", "Lat", "Lon"]);

    assert_eq!(mapping.index(SemanticField::Region), Some(0));
    assert_eq!(mapping.index(SemanticField::Magnitude), Some(1));
    assert_eq!(mapping.index(SemanticField::DateTime), Some(2));
    assert_eq!(mapping.index(SemanticField::Latitude), Some(3));
    assert_eq!(mapping.index(SemanticField::Longitude), Some(4));
    assert_eq!(mapping.index(SemanticField::Depth), None);
    assert_eq!(mapping.index(SemanticField::SubRegion), None);
    assert!(mapping.missing_required().is_empty());
}

#[test]
fn test_first_synonym_wins_regardless_of_column_order() {
    // "il" precedes "city" in the synonym list even though it comes later in the header
    let mapping = create_mapping(&["City", "mag", "ML", "datetime", "lat", "lon", "il"]);

    assert_eq!(mapping.index(SemanticField::Region), Some(6));
    // "mag" precedes "ml"
    assert_eq!(mapping.index(SemanticField::Magnitude), Some(1));
}

#[test]
fn test_duplicate_header_keeps_first_column() {
    let mapping = create_mapping(&["il", "IL", "magnitude"]);
    assert_eq!(mapping.index(SemanticField::Region), Some(0));
}

#[test]
fn test_missing_required_columns_reported() {
    let mapping = create_mapping(&["province", "depth", "lat"]);
    let missing = mapping.missing_required();

    assert_eq!(
        missing,
        vec![
            SemanticField::Magnitude,
            SemanticField::DateTime,
            SemanticField::Longitude
        ]
    );
}

#[test]
fn test_time_column_satisfies_datetime() {
    let mapping = create_mapping(&["il", "mag", "zaman", "enlem", "boylam"]);
    assert!(mapping.missing_required().is_empty());
    assert!(!mapping.has_field(SemanticField::DateTime));
}

#[test]
fn test_empty_header() {
    let mapping = ColumnMapping::default();
    assert_eq!(mapping.missing_required().len(), SemanticField::REQUIRED.len());
}
