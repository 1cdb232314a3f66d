//! Bulletin command: fetch, parse and persist the Kandilli bulletin

use super::shared::{
    IngestReport, create_progress_bar, create_spinner, load_configuration, open_store,
};
use crate::Result;
use crate::app::models::TargetTable;
use crate::app::services::bulletin_fetcher::{BulletinFetcher, read_bulletin_file};
use crate::app::services::bulletin_parser::BulletinParser;
use crate::app::services::ingest::persist_events;
use crate::app::services::region_registry::RegionDirectory;
use crate::cli::args::BulletinArgs;
use crate::config::Config;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Run the bulletin command and print its report
pub async fn run_bulletin(
    args: BulletinArgs,
    cancellation: CancellationToken,
) -> Result<IngestReport> {
    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    if let Some(url) = &args.url {
        config = config.with_bulletin_url(url.clone());
    }

    let report = ingest_bulletin(&args, &config, &cancellation).await?;
    report.print(args.common.output_format)?;
    Ok(report)
}

/// Fetch or read the page, parse it and persist the events
///
/// Bulletin events always go to the `earthquakes` table.
pub async fn ingest_bulletin(
    args: &BulletinArgs,
    config: &Config,
    cancellation: &CancellationToken,
) -> Result<IngestReport> {
    let start_time = Instant::now();
    let show_progress = args.common.show_progress();

    let (page, source) = match &args.from_file {
        Some(path) => (read_bulletin_file(path)?, path.display().to_string()),
        None => {
            let fetcher = BulletinFetcher::new(&config.bulletin.url, config.bulletin.timeout())?;
            let spinner = create_spinner("Fetching bulletin...", show_progress);
            let page = fetcher.fetch_text().await;
            spinner.finish_and_clear();
            (page?, config.bulletin.url.clone())
        }
    };

    let parser = BulletinParser::new(
        config.bulletin.layout.clone(),
        config.regions.allow_list(),
        config.bulletin.source_label.clone(),
    )?;
    let result = parser.parse(&page);
    result.ensure_well_formed(&source)?;

    if result.events.is_empty() {
        warn!("No events found in bulletin from {}", source);
    }

    let mut store = open_store(config, args.common.dry_run)?;
    let directory = RegionDirectory::load(&*store)?;

    let table = TargetTable::Earthquakes;
    let pb = create_progress_bar(
        result.events.len() as u64,
        "Persisting bulletin events",
        show_progress,
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

    info!("Bulletin ingestion finished: {}", tally);

    Ok(IngestReport {
        source,
        table,
        dry_run: args.common.dry_run,
        events: result.events.len(),
        tally,
        bulletin_stats: Some(result.stats),
        csv_stats: None,
        duration: start_time.elapsed(),
    })
}
