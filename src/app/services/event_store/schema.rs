//! SQL schema for the SQLite event store

/// Region, sub-region and event tables with natural-key indexes
///
/// SQLite treats NULLs as distinct inside UNIQUE indexes, so nullable key
/// columns are indexed through `IFNULL` expressions.
pub const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS regions (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS sub_regions (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    region_id INTEGER NOT NULL REFERENCES regions(id),
    name      TEXT NOT NULL,
    UNIQUE (region_id, name)
);

CREATE TABLE IF NOT EXISTS earthquakes (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    region_id     INTEGER NOT NULL REFERENCES regions(id),
    sub_region_id INTEGER REFERENCES sub_regions(id),
    occurred_at   TEXT NOT NULL,
    latitude      REAL NOT NULL,
    longitude     REAL NOT NULL,
    depth_km      REAL,
    magnitude     REAL,
    location_text TEXT NOT NULL DEFAULT '',
    source        TEXT NOT NULL,
    created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE UNIQUE INDEX IF NOT EXISTS ux_earthquakes_natural_key
    ON earthquakes (region_id, IFNULL(sub_region_id, -1), occurred_at, latitude, longitude);

CREATE TABLE IF NOT EXISTS historical_earthquakes (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    region_id     INTEGER NOT NULL REFERENCES regions(id),
    sub_region_id INTEGER REFERENCES sub_regions(id),
    occurred_at   TEXT NOT NULL,
    latitude      REAL NOT NULL,
    longitude     REAL NOT NULL,
    depth_km      REAL,
    magnitude     REAL,
    location_text TEXT NOT NULL DEFAULT '',
    source        TEXT NOT NULL,
    created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE UNIQUE INDEX IF NOT EXISTS ux_historical_earthquakes_natural_key
    ON historical_earthquakes (region_id, IFNULL(sub_region_id, -1), occurred_at, latitude, longitude,
                               IFNULL(magnitude, -1));
"#;
