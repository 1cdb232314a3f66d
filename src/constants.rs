//! Application constants for the seismic ingestion pipeline
//!
//! This module contains the fixed layout of the Kandilli bulletin, the
//! Marmara region allow-list and bounding box, the CSV header synonym
//! tables and the default values used by the configuration layer.

// =============================================================================
// Bulletin Source
// =============================================================================

/// Kandilli Observatory (KOERI) plaintext bulletin of recent events
pub const BULLETIN_URL: &str = "http://www.koeri.boun.edu.tr/scripts/lst0.asp";

/// Marker opening the plaintext data block inside the bulletin page
pub const BULLETIN_START_MARKER: &str = "<pre>";

/// Marker closing the plaintext data block
pub const BULLETIN_END_MARKER: &str = "</pre>";

/// Default HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Source label written on events parsed from the bulletin
pub const BULLETIN_SOURCE_LABEL: &str = "kandilli";

/// Source label written on events read from CSV exports
pub const CSV_SOURCE_LABEL: &str = "csv-import";

/// Tokens that identify banner, column header and separator lines
pub const BULLETIN_NOISE_TOKENS: &[&str] = &[
    "----",
    "Date",
    "Tarih",
    "RECENT EARTHQUAKES",
    "KOERI",
    "BOGAZICI",
];

// =============================================================================
// Bulletin Line Layout
// =============================================================================

/// Line layout after the leading `date time` pair has been split off
///
/// Token positions: 0 latitude, 1 longitude, 2 depth, 3 MD, 4 ML, 5 Mw,
/// then free-text location. MD is almost always the `-.-` placeholder.
pub mod bulletin_layout {
    /// Fixed offset of the latitude token
    pub const LATITUDE_INDEX: usize = 0;

    /// Fixed offset of the longitude token
    pub const LONGITUDE_INDEX: usize = 1;

    /// Fixed offset of the depth token
    pub const DEPTH_INDEX: usize = 2;

    /// First token index inspected by the magnitude scan
    pub const MAGNITUDE_SCAN_START: usize = 4;

    /// Last token index (inclusive) inspected by the magnitude scan
    pub const MAGNITUDE_SCAN_END: usize = 6;

    /// Location text starts this many tokens after the chosen magnitude token
    pub const LOCATION_OFFSET: usize = 2;

    /// Location start used when no magnitude token was found
    pub const DEFAULT_LOCATION_START: usize = 6;

    /// Lines with fewer tokens than this after the date/time pair are skipped
    pub const MIN_TOKENS: usize = 6;

    /// Exclusive lower bound of an acceptable magnitude
    pub const MAGNITUDE_MIN_EXCLUSIVE: f64 = 0.0;

    /// Exclusive upper bound of an acceptable magnitude
    pub const MAGNITUDE_MAX_EXCLUSIVE: f64 = 10.0;
}

// =============================================================================
// Target Region
// =============================================================================

/// Marmara region provinces, canonical spelling
pub const REGION_ALLOW_LIST: &[&str] = &[
    "İstanbul",
    "Kocaeli",
    "Sakarya",
    "Bursa",
    "Balıkesir",
    "Çanakkale",
    "Tekirdağ",
    "Edirne",
    "Kırklareli",
    "Yalova",
    "Bilecik",
];

/// Provincial capital coordinates (latitude, longitude) for the allow-list
///
/// Bulletin events inside the bounding box whose location text names no
/// province (sea areas, gulfs, villages) are assigned to the nearest capital.
pub const REGION_CENTROIDS: &[(&str, f64, f64)] = &[
    ("İstanbul", 41.01, 28.98),
    ("Kocaeli", 40.77, 29.92),
    ("Sakarya", 40.78, 30.40),
    ("Bursa", 40.19, 29.06),
    ("Balıkesir", 39.65, 27.88),
    ("Çanakkale", 40.15, 26.41),
    ("Tekirdağ", 40.98, 27.51),
    ("Edirne", 41.68, 26.56),
    ("Kırklareli", 41.74, 27.23),
    ("Yalova", 40.65, 29.27),
    ("Bilecik", 40.14, 29.98),
];

/// Coarse latitude/longitude rectangle around the Marmara region
pub mod marmara_bounds {
    pub const MIN_LATITUDE: f64 = 39.0;
    pub const MAX_LATITUDE: f64 = 42.1;
    pub const MIN_LONGITUDE: f64 = 25.5;
    pub const MAX_LONGITUDE: f64 = 31.0;
}

// =============================================================================
// CSV Header Synonyms
// =============================================================================

/// Accepted header spellings per semantic field, in priority order
///
/// Header cells are compared after normalisation (trimmed, BOM stripped,
/// Turkish-aware lower case), so entries here are lower case.
pub mod synonyms {
    pub const REGION: &[&str] = &["il", "il_adi", "province", "city", "şehir", "il adı"];
    pub const SUB_REGION: &[&str] = &["ilce", "ilçe", "ilce_adi", "ilçe adı", "district", "county"];
    pub const MAGNITUDE: &[&str] = &["magnitude", "mag", "buyukluk", "büyüklük", "ml", "mw"];
    pub const DEPTH: &[&str] = &["depth", "depth_km", "derinlik", "derinlik_km", "derinlik(km)"];
    pub const DATETIME: &[&str] = &[
        "datetime",
        "date_time",
        "tarih_saat",
        "occurred_at",
        "date",
        "tarih",
    ];
    pub const TIME_OF_DAY: &[&str] = &["time", "saat", "zaman"];
    pub const LATITUDE: &[&str] = &["latitude", "lat", "enlem"];
    pub const LONGITUDE: &[&str] = &["longitude", "lon", "lng", "long", "boylam"];
    pub const LOCATION: &[&str] = &["location", "yer", "place", "bolge", "bölge", "region"];
}

/// Datetime layouts accepted in CSV exports, tried in order
pub const CSV_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Date-only layouts accepted in CSV exports (midnight is assumed)
pub const CSV_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y.%m.%d"];

/// Time-of-day layouts for a separate time column
pub const CSV_TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

// =============================================================================
// Persistence
// =============================================================================

/// Table receiving bulletin events and the default CSV target
pub const EARTHQUAKES_TABLE: &str = "earthquakes";

/// Table receiving historical catalogue imports
pub const HISTORICAL_EARTHQUAKES_TABLE: &str = "historical_earthquakes";

/// Storage layout for occurrence timestamps
pub const STORED_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Defaults
// =============================================================================

/// Default CSV input path
pub const DEFAULT_CSV_PATH: &str = "data/marmara_earthquakes.csv";

/// Application directory name under the platform data/config directories
pub const APP_DIR_NAME: &str = "seismic-ingest";

/// Database filename
pub const DATABASE_FILENAME: &str = "seismic.db";

/// Configuration filename
pub const CONFIG_FILENAME: &str = "config.toml";

/// Maximum number of row-level error messages retained in stats
pub const MAX_RECORDED_ERRORS: usize = 100;

/// Environment overrides
pub mod env_vars {
    pub const DATABASE: &str = "SEISMIC_INGEST_DATABASE";
    pub const BULLETIN_URL: &str = "SEISMIC_INGEST_BULLETIN_URL";
    pub const CSV_PATH: &str = "SEISMIC_INGEST_CSV_PATH";
}
