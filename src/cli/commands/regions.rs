//! Regions command: list the regions stored in the datastore

use super::shared::{load_configuration, open_store};
use crate::app::services::event_store::EventStore;
use crate::cli::args::{OutputFormat, RegionsArgs};
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::collections::HashMap;

/// One stored region with its district count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub id: i64,
    pub name: String,
    pub sub_regions: usize,
}

/// Run the regions command
pub fn run_regions(args: RegionsArgs) -> Result<()> {
    let config = load_configuration(&args.common)?;
    let store = open_store(&config, args.common.dry_run)?;
    let summaries = summarize_regions(&*store)?;

    match args.common.output_format {
        OutputFormat::Text => {
            println!("\n{}", "Stored regions".bright_green().bold());
            for summary in &summaries {
                println!(
                    "  {:>3}  {:<12} {} sub-regions",
                    summary.id.to_string().bright_cyan(),
                    summary.name,
                    summary.sub_regions
                );
            }
            println!();
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summaries).map_err(|e| {
                Error::data_validation(format!("Failed to serialize regions: {}", e))
            })?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Regions ordered by id, with sub-region counts
pub fn summarize_regions<S: EventStore + ?Sized>(store: &S) -> Result<Vec<RegionSummary>> {
    let mut sub_region_counts: HashMap<i64, usize> = HashMap::new();
    for (region_id, _) in store.sub_region_ids()?.keys() {
        *sub_region_counts.entry(*region_id).or_default() += 1;
    }

    let mut summaries: Vec<RegionSummary> = store
        .region_ids()?
        .into_iter()
        .map(|(name, id)| RegionSummary {
            id,
            sub_regions: sub_region_counts.get(&id).copied().unwrap_or(0),
            name,
        })
        .collect();
    summaries.sort_by_key(|summary| summary.id);

    Ok(summaries)
}
