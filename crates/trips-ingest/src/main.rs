//! trips-ingest - load a trips CSV file into PostgreSQL

use std::process;

use clap::Parser;
use tracing::error;
use trips_common::logging::{init_logging, LogConfig, LogLevel};
use trips_ingest::{Cli, IngestConfig};

#[tokio::main]
async fn main() {
    // .env must be loaded before clap reads DATABASE_URL
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("trips-ingest")
        .filter_directives("sqlx=warn")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    let guard = match init_logging(&log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: failed to initialize logging: {e}");
            None
        },
    };

    let result = match IngestConfig::from_cli(&cli) {
        Ok(config) => trips_ingest::run(&config).await,
        Err(e) => Err(e),
    };

    let code = match result {
        Ok(report) => {
            println!("{report}");
            0
        },
        Err(e) => {
            error!(error = %e, "Ingestion failed");
            if guard.is_none() {
                eprintln!("Error: {e}");
            }
            1
        },
    };

    // Flush the file appender before exiting
    drop(guard);
    process::exit(code);
}
