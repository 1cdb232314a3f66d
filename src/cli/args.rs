//! Command-line argument definitions for seismic-ingest
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::app::models::TargetTable;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the seismic event ingester
///
/// Loads the Kandilli Observatory bulletin and Marmara-region earthquake
/// CSV exports into the disaster-management datastore.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seismic-ingest",
    version,
    about = "Load Kandilli bulletin and Marmara earthquake CSV data into the datastore",
    long_about = "Parses the Kandilli Observatory plaintext earthquake bulletin and regional \
                  earthquake CSV exports, keeps events from the Marmara provinces and writes them \
                  to a SQLite datastore with idempotent insert-or-update semantics. Re-running an \
                  import reports already stored events as skipped."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Fetch and ingest the latest Kandilli bulletin
    Bulletin(BulletinArgs),
    /// Ingest a regional earthquake CSV export
    Csv(CsvArgs),
    /// List the regions known to the datastore
    Regions(RegionsArgs),
}

/// Arguments for the bulletin command
#[derive(Debug, Clone, Parser)]
pub struct BulletinArgs {
    /// Bulletin page URL
    ///
    /// Overrides the configured URL. Defaults to the KOERI list page.
    #[arg(
        long = "url",
        value_name = "URL",
        conflicts_with = "from_file",
        help = "Bulletin page URL"
    )]
    pub url: Option<String>,

    /// Parse a saved bulletin page instead of fetching it
    #[arg(
        long = "from-file",
        value_name = "PATH",
        help = "Read the bulletin from a saved page instead of the network"
    )]
    pub from_file: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the csv command
#[derive(Debug, Clone, Parser)]
pub struct CsvArgs {
    /// CSV export to ingest
    ///
    /// If not specified, uses the configured path (data/marmara_earthquakes.csv).
    #[arg(value_name = "FILE", help = "CSV export to ingest")]
    pub file: Option<PathBuf>,

    /// Table the rows are written to
    #[arg(
        short = 't',
        long = "table",
        value_name = "TABLE",
        help = "Target table (earthquakes or historical-earthquakes)"
    )]
    pub table: Option<TargetTable>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the regions command
#[derive(Debug, Clone, Parser)]
pub struct RegionsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// SQLite database file
    ///
    /// Created on first use. Defaults to the per-user data directory.
    #[arg(
        short = 'd',
        long = "database",
        value_name = "PATH",
        help = "SQLite database file"
    )]
    pub database: Option<PathBuf>,

    /// Run against an in-memory store seeded with the allow-list
    ///
    /// Tallies then show what a run against an empty datastore would do.
    #[arg(
        long = "dry-run",
        help = "Parse and tally without touching the database"
    )]
    pub dry_run: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// seismic-ingest/config.toml in the user configuration directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for the run report
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format for the run report"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for run reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// JSON report on stdout
    Json,
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Bulletin(args) => &args.common,
            Commands::Csv(args) => &args.common,
            Commands::Regions(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars are shown for text output unless quiet
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Text
    }
}

impl BulletinArgs {
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            if url.trim().is_empty() {
                return Err(Error::configuration("Bulletin URL cannot be empty"));
            }
        }

        if let Some(path) = &self.from_file {
            if !path.exists() {
                return Err(Error::file_not_found(path.display().to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let args = Args::try_parse_from(["seismic-ingest"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_csv_command_parsing() {
        let args = Args::try_parse_from([
            "seismic-ingest",
            "csv",
            "quakes.csv",
            "--table",
            "historical-earthquakes",
            "--dry-run",
            "-vv",
        ])
        .unwrap();

        let Some(Commands::Csv(csv)) = args.command else {
            panic!("expected csv command");
        };
        assert_eq!(csv.file, Some(PathBuf::from("quakes.csv")));
        assert_eq!(csv.table, Some(TargetTable::HistoricalEarthquakes));
        assert!(csv.common.dry_run);
        assert_eq!(csv.common.get_log_level(), "debug");
    }

    #[test]
    fn test_bulletin_url_conflicts_with_file() {
        let result = Args::try_parse_from([
            "seismic-ingest",
            "bulletin",
            "--url",
            "http://example.org",
            "--from-file",
            "page.html",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["seismic-ingest", "regions", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_and_progress() {
        let mut common = CommonArgs::default();
        assert_eq!(common.get_log_level(), "warn");
        assert!(common.show_progress());

        common.output_format = OutputFormat::Json;
        assert!(!common.show_progress());

        common.quiet = true;
        assert_eq!(common.get_log_level(), "error");
    }

    #[test]
    fn test_bulletin_args_validation() {
        let args = BulletinArgs {
            url: None,
            from_file: Some(PathBuf::from("/nonexistent/lst0.html")),
            common: CommonArgs::default(),
        };
        assert!(matches!(args.validate(), Err(Error::FileNotFound { .. })));
    }
}
