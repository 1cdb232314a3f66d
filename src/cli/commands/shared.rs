//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, datastore selection, progress bars
//! and the run report printed at the end of each ingestion command.

use crate::app::models::TargetTable;
use crate::app::services::bulletin_parser::BulletinParseStats;
use crate::app::services::csv_ingest::CsvFilterStats;
use crate::app::services::event_store::{EventStore, InMemoryEventStore, SqliteEventStore};
use crate::app::services::ingest::IngestTally;
use crate::cli::args::{CommonArgs, OutputFormat};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("seismic_ingest={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    info!("Loading configuration");

    let mut config = Config::load(args.config_file.as_deref())?;
    if let Some(database) = &args.database {
        config = config.with_database(database.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Open the datastore, seeding the allow-listed regions
///
/// A dry run gets a fresh in-memory store instead of the database file.
pub fn open_store(config: &Config, dry_run: bool) -> Result<Box<dyn EventStore>> {
    let allow_list = config.regions.allow_list();

    if dry_run {
        info!("Dry run: using in-memory event store");
        return Ok(Box::new(InMemoryEventStore::with_regions(&allow_list)));
    }

    let mut store = SqliteEventStore::open(&config.database.path)?;
    store.seed_regions(&allow_list)?;
    Ok(Box::new(store))
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// Create a spinner for work of unknown length
pub fn create_spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Summary of one ingestion run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// URL or file the events came from
    pub source: String,
    pub table: TargetTable,
    pub dry_run: bool,
    /// Events handed to the persistence loop
    pub events: usize,
    pub tally: IngestTally,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulletin_stats: Option<BulletinParseStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_stats: Option<CsvFilterStats>,
    #[serde(skip)]
    pub duration: Duration,
}

impl IngestReport {
    /// Print the report to stdout in the requested format
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => {
                self.print_text();
                Ok(())
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self).map_err(|e| {
                    Error::data_validation(format!("Failed to serialize report: {}", e))
                })?;
                println!("{}", json);
                Ok(())
            }
        }
    }

    fn print_text(&self) {
        let title = if self.dry_run {
            "Ingestion complete (dry run)"
        } else {
            "Ingestion complete"
        };

        println!("\n{}", title.bright_green().bold());
        println!("  {} {}", "Source:".bright_cyan(), self.source);
        println!("  {} {}", "Table:".bright_cyan(), self.table);
        println!("  {} {}", "Events:".bright_cyan(), self.events);

        if let Some(stats) = &self.bulletin_stats {
            println!(
                "  {} {} lines, {} skipped, {} without magnitude",
                "Bulletin:".bright_cyan(),
                stats.total_lines,
                stats.lines_skipped(),
                stats.missing_magnitude
            );
        }

        if let Some(stats) = &self.csv_stats {
            println!(
                "  {} {} rows, {} out of region, {} incomplete, {} malformed",
                "CSV:".bright_cyan(),
                stats.total_rows,
                stats.dropped_out_of_region,
                stats.skipped_incomplete,
                stats.skipped_malformed
            );
            if !stats.missing_columns.is_empty() {
                println!(
                    "  {} {}",
                    "Missing columns:".bright_yellow(),
                    stats.missing_columns.join(", ")
                );
            }
        }

        println!(
            "  {} {}",
            "Added:".bright_cyan(),
            self.tally.added.to_string().bright_green().bold()
        );
        println!(
            "  {} {}",
            "Updated:".bright_cyan(),
            self.tally.updated.to_string().bright_yellow()
        );
        println!("  {} {}", "Skipped:".bright_cyan(), self.tally.skipped);
        if self.tally.unresolved > 0 {
            println!(
                "  {} {}",
                "Unresolved:".bright_yellow(),
                self.tally.unresolved
            );
        }
        println!("  {} {}", "Time:".bright_cyan(), HumanDuration(self.duration));
        println!();
    }
}
