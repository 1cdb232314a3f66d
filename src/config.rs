//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `SEISMIC_INGEST_*` environment variables. Command-line flags are
//! applied last by the CLI layer through the `with_*` builders.

use crate::app::models::TargetTable;
use crate::app::services::bulletin_parser::BulletinLayout;
use crate::app::services::region_registry::RegionAllowList;
use crate::constants::{
    APP_DIR_NAME, BULLETIN_SOURCE_LABEL, BULLETIN_URL, CONFIG_FILENAME, CSV_SOURCE_LABEL,
    DATABASE_FILENAME, DEFAULT_CSV_PATH, DEFAULT_REQUEST_TIMEOUT_SECS, REGION_ALLOW_LIST,
    env_vars,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Bulletin source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletinConfig {
    /// Page to fetch
    pub url: String,

    /// Overall request timeout in seconds
    pub timeout_secs: u64,

    /// Label written on every bulletin event
    pub source_label: String,

    /// Block markers, scan window and bounding box
    pub layout: BulletinLayout,
}

impl Default for BulletinConfig {
    fn default() -> Self {
        Self {
            url: BULLETIN_URL.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            source_label: BULLETIN_SOURCE_LABEL.to_string(),
            layout: BulletinLayout::default(),
        }
    }
}

impl BulletinConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// CSV import settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// File read when none is given on the command line
    pub path: PathBuf,

    /// Table rows are written to
    pub table: TargetTable,

    /// Label written on every imported event
    pub source_label: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CSV_PATH),
            table: TargetTable::default(),
            source_label: CSV_SOURCE_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Canonical province names, in match priority order
    pub allow_list: Vec<String>,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            allow_list: REGION_ALLOW_LIST.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl RegionConfig {
    pub fn allow_list(&self) -> RegionAllowList {
        RegionAllowList::new(self.allow_list.iter().cloned())
    }
}

/// Global configuration for seismic ingestion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bulletin: BulletinConfig,
    pub csv: CsvConfig,
    pub database: DatabaseConfig,
    pub regions: RegionConfig,
}

impl Config {
    /// Load defaults, the config file and environment overrides, then validate
    ///
    /// An explicit `path` must exist; the per-user default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|candidate| candidate.exists()) {
                Some(candidate) => Self::from_file(&candidate)?,
                None => {
                    debug!("No configuration file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read configuration {}", path.display()), e)
        })?;

        info!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `SEISMIC_INGEST_*` overrides from a variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(database) = lookup(env_vars::DATABASE) {
            debug!("{} overrides database path", env_vars::DATABASE);
            self.database.path = PathBuf::from(database);
        }
        if let Some(url) = lookup(env_vars::BULLETIN_URL) {
            debug!("{} overrides bulletin URL", env_vars::BULLETIN_URL);
            self.bulletin.url = url;
        }
        if let Some(csv_path) = lookup(env_vars::CSV_PATH) {
            debug!("{} overrides CSV path", env_vars::CSV_PATH);
            self.csv.path = PathBuf::from(csv_path);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.bulletin.url.trim().is_empty() {
            return Err(Error::configuration("Bulletin URL cannot be empty"));
        }
        if self.bulletin.timeout_secs == 0 {
            return Err(Error::configuration("Bulletin timeout must be at least one second"));
        }
        if self.bulletin.source_label.trim().is_empty() || self.csv.source_label.trim().is_empty() {
            return Err(Error::configuration("Source labels cannot be empty"));
        }
        if self.regions.allow_list().is_empty() {
            return Err(Error::configuration("Region allow-list cannot be empty"));
        }

        self.bulletin.layout.validate()
    }

    /// Override the database path
    pub fn with_database(mut self, path: PathBuf) -> Self {
        self.database.path = path;
        self
    }

    /// Override the bulletin URL
    pub fn with_bulletin_url(mut self, url: String) -> Self {
        self.bulletin.url = url;
        self
    }

    /// Override the CSV input path
    pub fn with_csv_path(mut self, path: PathBuf) -> Self {
        self.csv.path = path;
        self
    }

    /// Override the CSV target table
    pub fn with_csv_table(mut self, table: TargetTable) -> Self {
        self.csv.table = table;
        self
    }
}

/// Per-user configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILENAME))
}

/// Per-user database location, falling back to the working directory
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DATABASE_FILENAME))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILENAME))
}
