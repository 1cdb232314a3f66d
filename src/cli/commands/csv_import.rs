//! CSV command: filter a regional export and persist the retained rows

use super::shared::{IngestReport, create_progress_bar, load_configuration, open_store};
use crate::Result;
use crate::app::services::csv_ingest::RegionalCsvFilter;
use crate::app::services::ingest::persist_events;
use crate::app::services::region_registry::RegionDirectory;
use crate::cli::args::CsvArgs;
use crate::config::Config;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Run the csv command and print its report
pub async fn run_csv_import(
    args: CsvArgs,
    cancellation: CancellationToken,
) -> Result<IngestReport> {
    let mut config = load_configuration(&args.common)?;
    if let Some(file) = &args.file {
        config = config.with_csv_path(file.clone());
    }
    if let Some(table) = args.table {
        config = config.with_csv_table(table);
    }

    let report = ingest_csv(&args, &config, &cancellation).await?;
    report.print(args.common.output_format)?;
    Ok(report)
}

/// Filter the configured CSV file and persist the retained events
pub async fn ingest_csv(
    args: &CsvArgs,
    config: &Config,
    cancellation: &CancellationToken,
) -> Result<IngestReport> {
    let start_time = Instant::now();
    let path = &config.csv.path;
    let table = config.csv.table;

    let filter = RegionalCsvFilter::new(config.regions.allow_list(), config.csv.source_label.clone());
    let result = filter.filter_file(path, table)?;

    let mut store = open_store(config, args.common.dry_run)?;
    let directory = RegionDirectory::load(&*store)?;

    let pb = create_progress_bar(
        result.events.len() as u64,
        "Persisting CSV rows",
        args.common.show_progress(),
    );
    let tally = persist_events(
        &mut *store,
        &directory,
        table,
        &result.events,
        Some(&pb),
        cancellation,
    )
    .await?;
    pb.finish_and_clear();

    info!("CSV ingestion into {} finished: {}", table, tally);

    Ok(IngestReport {
        source: path.display().to_string(),
        table,
        dry_run: args.common.dry_run,
        events: result.events.len(),
        tally,
        bulletin_stats: None,
        csv_stats: Some(result.stats),
        duration: start_time.elapsed(),
    })
}
