//! Tests for allow-list matching and name folding

use crate::app::services::region_registry::{RegionAllowList, fold_region_name};

#[test]
fn test_marmara_list_has_eleven_provinces() {
    let allow_list = RegionAllowList::marmara();
    assert_eq!(allow_list.len(), 11);
    assert_eq!(allow_list.names().next(), Some("İstanbul"));
}

#[test]
fn test_fold_region_name_collapses_turkish_letters() {
    assert_eq!(fold_region_name("İstanbul"), "ISTANBUL");
    assert_eq!(fold_region_name("istanbul"), "ISTANBUL");
    assert_eq!(fold_region_name(" Tekirdağ "), "TEKIRDAG");
    assert_eq!(fold_region_name("Çanakkale"), "CANAKKALE");
    assert_eq!(fold_region_name("Kırklareli"), "KIRKLARELI");
    // Rust lower-cases İ to i + U+0307; the combining dot must vanish
    assert_eq!(fold_region_name(&"İstanbul".to_lowercase()), "ISTANBUL");
}

#[test]
fn test_resolve_exact_and_case_insensitive() {
    let allow_list = RegionAllowList::marmara();
    assert_eq!(allow_list.resolve("İstanbul"), Some("İstanbul"));
    assert_eq!(allow_list.resolve("ISTANBUL"), Some("İstanbul"));
    assert_eq!(allow_list.resolve("balikesir"), Some("Balıkesir"));
    assert_eq!(allow_list.resolve("Kayseri"), None);
}

#[test]
fn test_resolve_is_bidirectional() {
    let allow_list = RegionAllowList::marmara();
    // Input contains the canonical name
    assert_eq!(allow_list.resolve("Kocaeli İli"), Some("Kocaeli"));
    // Canonical name contains the input (partial spelling)
    assert_eq!(allow_list.resolve("Tekirda"), Some("Tekirdağ"));
}

#[test]
fn test_resolve_rejects_blank_input() {
    let allow_list = RegionAllowList::marmara();
    assert_eq!(allow_list.resolve(""), None);
    assert_eq!(allow_list.resolve("   "), None);
}

#[test]
fn test_resolve_prefers_exact_spelling() {
    // Folded, "KOCAELI" contains "KOCA" and the first entry would win
    let allow_list = RegionAllowList::new(["KOCA", "Kocaeli"]);
    assert_eq!(allow_list.resolve("Kocaeli"), Some("Kocaeli"));
    assert_eq!(allow_list.resolve("KOCAELI"), Some("KOCA"));
}

#[test]
fn test_nearest_capital() {
    let allow_list = RegionAllowList::marmara();
    assert_eq!(allow_list.nearest(40.75, 28.20), Some("Tekirdağ"));
    assert_eq!(allow_list.nearest(40.41, 28.95), Some("Bursa"));
    assert_eq!(allow_list.nearest(41.70, 26.60), Some("Edirne"));

    let unknown = RegionAllowList::new(["Malatya"]);
    assert_eq!(unknown.nearest(40.75, 28.20), None);
}

#[test]
fn test_resolve_location_prefers_bracket_suffix() {
    let allow_list = RegionAllowList::marmara();
    // Whole-string scan would hit Bursa first; the bracket names Balıkesir
    assert_eq!(
        allow_list.resolve_location("BURSA YOLU-SINDIRGI (BALIKESIR)"),
        Some("Balıkesir")
    );
    assert_eq!(
        allow_list.resolve_location("SOME-PLACE (ISTANBUL)"),
        Some("İstanbul")
    );
}

#[test]
fn test_resolve_location_falls_back_to_whole_string() {
    let allow_list = RegionAllowList::marmara();
    assert_eq!(
        allow_list.resolve_location("IZMIT KORFEZI-KOCAELI (MARMARA DENIZI)"),
        Some("Kocaeli")
    );
    assert_eq!(allow_list.resolve_location("AKDENIZ"), None);
    assert_eq!(allow_list.resolve_location("YESILYURT (MALATYA)"), None);
}

#[test]
fn test_custom_allow_list_skips_blank_names() {
    let allow_list = RegionAllowList::new(["Bursa", " ", "Yalova"]);
    assert_eq!(allow_list.len(), 2);
    assert!(!allow_list.is_empty());
    assert_eq!(allow_list.names().collect::<Vec<_>>(), vec!["Bursa", "Yalova"]);
}

#[test]
fn test_resolve_location_skips_revision_stamp() {
    let allow_list = RegionAllowList::marmara();
    assert_eq!(
        allow_list.resolve_location("MARMARA EREGLISI (TEKIRDAG) REVIZE01 (2024.01.15 14:35:12)"),
        Some("Tekirdağ")
    );
}
