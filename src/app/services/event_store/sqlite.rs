//! SQLite-backed event store

use super::schema::CREATE_SCHEMA;
use super::{EventRow, EventStore, RowPayload, UpsertOutcome};
use crate::app::models::TargetTable;
use crate::app::services::region_registry::RegionAllowList;
use crate::{Error, Result};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Event store persisting into a SQLite database file
pub struct SqliteEventStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for SqliteEventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteEventStore")
            .field("path", &self.path)
            .finish()
    }
}

impl SqliteEventStore {
    /// Open (or create) a database file and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("Failed to create database directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let conn = Connection::open(path)?;
        info!("Opened event store at {}", path.display());
        Self::from_connection(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(CREATE_SCHEMA)?;
        Ok(Self { conn, path })
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Insert every allow-list province that is not stored yet
    pub fn seed_regions(&mut self, allow_list: &RegionAllowList) -> Result<usize> {
        let mut inserted = 0;
        for name in allow_list.names() {
            inserted += self
                .conn
                .execute("INSERT OR IGNORE INTO regions (name) VALUES (?1)", params![name])?;
        }

        if inserted > 0 {
            debug!("Seeded {} regions", inserted);
        }
        Ok(inserted)
    }

    /// Register a sub-region under a stored region, returning its id
    pub fn add_sub_region(&mut self, region_name: &str, name: &str) -> Result<i64> {
        let region_id: i64 = self
            .conn
            .query_row(
                "SELECT id FROM regions WHERE name = ?1",
                params![region_name],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::persistence(format!("Unknown region '{}'", region_name)))?;

        self.conn.execute(
            "INSERT OR IGNORE INTO sub_regions (region_id, name) VALUES (?1, ?2)",
            params![region_id, name],
        )?;

        let id = self.conn.query_row(
            "SELECT id FROM sub_regions WHERE region_id = ?1 AND name = ?2",
            params![region_id, name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Number of stored rows in one table
    pub fn row_count(&self, table: TargetTable) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.table_name());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Look up an existing row by natural key
    fn find_existing(
        &self,
        table: TargetTable,
        row: &EventRow<'_>,
    ) -> Result<Option<(i64, RowPayload)>> {
        let event = row.event;
        let occurred_at = event.occurred_at_string();

        let existing = match table {
            TargetTable::Earthquakes => self
                .conn
                .query_row(
                    "SELECT id, depth_km, magnitude, location_text, source FROM earthquakes
                     WHERE region_id = ?1 AND sub_region_id IS ?2 AND occurred_at = ?3
                       AND latitude = ?4 AND longitude = ?5",
                    params![
                        row.region_id,
                        row.sub_region_id,
                        occurred_at,
                        event.latitude,
                        event.longitude
                    ],
                    |r| {
                        Ok((
                            r.get::<_, i64>(0)?,
                            RowPayload {
                                depth_km: r.get(1)?,
                                magnitude: r.get(2)?,
                                location_text: r.get(3)?,
                                source: r.get(4)?,
                            },
                        ))
                    },
                )
                .optional()?,
            TargetTable::HistoricalEarthquakes => self
                .conn
                .query_row(
                    "SELECT id, depth_km, location_text, source
                     FROM historical_earthquakes
                     WHERE region_id = ?1 AND sub_region_id IS ?2 AND occurred_at = ?3
                       AND latitude = ?4 AND longitude = ?5 AND magnitude IS ?6",
                    params![
                        row.region_id,
                        row.sub_region_id,
                        occurred_at,
                        event.latitude,
                        event.longitude,
                        event.magnitude
                    ],
                    |r| {
                        Ok((
                            r.get::<_, i64>(0)?,
                            RowPayload {
                                depth_km: r.get(1)?,
                                magnitude: None,
                                location_text: r.get(2)?,
                                source: r.get(3)?,
                            },
                        ))
                    },
                )
                .optional()?,
        };

        Ok(existing)
    }

    fn insert_row(&self, table: TargetTable, row: &EventRow<'_>) -> rusqlite::Result<usize> {
        let event = row.event;
        let sql = format!(
            "INSERT INTO {} (region_id, sub_region_id, occurred_at, latitude, longitude,
                             depth_km, magnitude, location_text, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            table.table_name()
        );

        self.conn.execute(
            &sql,
            params![
                row.region_id,
                row.sub_region_id,
                event.occurred_at_string(),
                event.latitude,
                event.longitude,
                event.depth_km,
                event.magnitude,
                event.location_text,
                event.source
            ],
        )
    }

    fn update_row(&self, table: TargetTable, id: i64, row: &EventRow<'_>) -> Result<()> {
        let event = row.event;
        let sql = format!(
            "UPDATE {} SET latitude = ?1, longitude = ?2, depth_km = ?3, magnitude = ?4,
                           location_text = ?5, source = ?6, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?7",
            table.table_name()
        );

        self.conn.execute(
            &sql,
            params![
                event.latitude,
                event.longitude,
                event.depth_km,
                event.magnitude,
                event.location_text,
                event.source,
                id
            ],
        )?;
        Ok(())
    }
}

/// Whether a driver error is a UNIQUE/constraint conflict
fn is_constraint_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}

impl EventStore for SqliteEventStore {
    fn region_ids(&self) -> Result<HashMap<String, i64>> {
        let mut stmt = self.conn.prepare("SELECT name, id FROM regions")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

        let mut regions = HashMap::new();
        for row in rows {
            let (name, id) = row?;
            regions.insert(name, id);
        }
        Ok(regions)
    }

    fn sub_region_ids(&self) -> Result<HashMap<(i64, String), i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT region_id, name, id FROM sub_regions")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut sub_regions = HashMap::new();
        for row in rows {
            let (region_id, name, id) = row?;
            sub_regions.insert((region_id, name), id);
        }
        Ok(sub_regions)
    }

    fn upsert_event(&mut self, table: TargetTable, row: &EventRow<'_>) -> Result<UpsertOutcome> {
        let payload = row.payload(table);

        if let Some((id, existing)) = self.find_existing(table, row)? {
            if existing == payload {
                return Ok(UpsertOutcome::Duplicate);
            }
            self.update_row(table, id, row)?;
            return Ok(UpsertOutcome::Updated);
        }

        match self.insert_row(table, row) {
            Ok(_) => Ok(UpsertOutcome::Inserted),
            Err(e) if is_constraint_violation(&e) => {
                debug!("Unique key conflict on {}: {}", table, e);
                Ok(UpsertOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }
}
