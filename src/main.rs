use clap::Parser;
use seismic_ingest::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No handler available; never resolve so the command runs to completion
                std::future::pending::<()>().await;
            }
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, stopping after the current row...");
                Err(seismic_ingest::Error::processing_interrupted(
                    "Ingestion interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("seismic-ingest - Kandilli bulletin and Marmara earthquake CSV loader");
    println!("====================================================================");
    println!();
    println!("Parse the Kandilli Observatory earthquake bulletin and regional CSV");
    println!("exports into the disaster-management datastore.");
    println!();
    println!("USAGE:");
    println!("    seismic-ingest <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    bulletin    Fetch and ingest the latest Kandilli bulletin");
    println!("    csv         Ingest a regional earthquake CSV export");
    println!("    regions     List the regions known to the datastore");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Ingest the live bulletin:");
    println!("    seismic-ingest bulletin");
    println!();
    println!("    # Preview a CSV import without writing to the database:");
    println!("    seismic-ingest csv data/marmara_earthquakes.csv --dry-run");
    println!();
    println!("    # Load a historical catalogue as JSON report:");
    println!("    seismic-ingest csv catalogue.csv --table historical-earthquakes --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    seismic-ingest <COMMAND> --help");
}
