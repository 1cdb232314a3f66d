//! Row-at-a-time persistence of normalized events

use indicatif::ProgressBar;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::tally::IngestTally;
use crate::app::models::{SeismicEvent, TargetTable};
use crate::app::services::event_store::{EventRow, EventStore};
use crate::app::services::region_registry::RegionDirectory;
use crate::{Error, Result};

/// Persist events into one table and tally the outcomes
///
/// Events without a region, or whose region is not in the directory, are
/// counted as unresolved and never reach the datastore. An unknown
/// sub-region is stored as null. Duplicate keys are counted as skipped; any
/// other datastore error ends the run.
///
/// The loop yields between rows and checks `cancellation`, so an interrupt
/// lands on a row boundary.
pub async fn persist_events<S: EventStore + ?Sized>(
    store: &mut S,
    directory: &RegionDirectory,
    table: TargetTable,
    events: &[SeismicEvent],
    progress: Option<&ProgressBar>,
    cancellation: &CancellationToken,
) -> Result<IngestTally> {
    info!("Persisting {} events into {}", events.len(), table);

    let mut tally = IngestTally::new();

    for event in events {
        if cancellation.is_cancelled() {
            warn!("Ingestion cancelled after {} events", tally.total());
            return Err(Error::processing_interrupted(format!(
                "Ingestion into {} cancelled ({})",
                table, tally
            )));
        }

        let region_id = event
            .region_name
            .as_deref()
            .and_then(|name| directory.region_id(name));

        match region_id {
            Some(region_id) => {
                let sub_region_id = event
                    .sub_region_name
                    .as_deref()
                    .and_then(|name| directory.sub_region_id(region_id, name));

                let row = EventRow::new(region_id, sub_region_id, event);
                let outcome = store.upsert_event(table, &row)?;
                debug!("{} at {}: {}", table, event.occurred_at_string(), outcome);
                tally.record(outcome);
            }
            None => {
                debug!(
                    "No region id for event at {} ({:?})",
                    event.occurred_at_string(),
                    event.region_name
                );
                tally.unresolved += 1;
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }

        tokio::task::yield_now().await;
    }

    info!("Ingestion into {} finished: {}", table, tally);
    Ok(tally)
}
