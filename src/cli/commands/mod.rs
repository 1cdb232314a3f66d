//! Command implementations for the seismic-ingest CLI
//!
//! Each command is implemented in its own module:
//! - `bulletin`: fetch, parse and persist the Kandilli bulletin
//! - `csv_import`: filter and persist a regional CSV export
//! - `regions`: list the regions stored in the datastore

pub mod bulletin;
pub mod csv_import;
pub mod regions;
pub mod shared;

pub use shared::IngestReport;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;

/// Main command runner
///
/// Initializes logging from the subcommand's verbosity flags and dispatches.
/// Running without a subcommand is handled by the binary before this point.
pub async fn run(args: Args, cancellation: CancellationToken) -> Result<()> {
    let Some(command) = args.command else {
        return Ok(());
    };

    shared::setup_logging(command.common())?;

    match command {
        Commands::Bulletin(bulletin_args) => {
            bulletin::run_bulletin(bulletin_args, cancellation).await?;
        }
        Commands::Csv(csv_args) => {
            csv_import::run_csv_import(csv_args, cancellation).await?;
        }
        Commands::Regions(regions_args) => regions::run_regions(regions_args)?,
    }

    Ok(())
}
