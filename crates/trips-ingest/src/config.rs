//! Command line and run configuration

use std::path::PathBuf;

use clap::Parser;

use crate::error::{IngestError, Result};
use crate::pipeline::PipelineConfig;

/// Default source file, relative to the working directory
pub const DEFAULT_CSV_PATH: &str = "output.csv";

/// Rows per `INSERT` statement
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Upper bound keeping a batch under PostgreSQL's 65535 bind-parameter limit (5 per row)
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Progress is logged every this many rows read
pub const DEFAULT_LOG_EVERY_N_ROWS: u64 = 50_000;

/// Environment variable consulted when `--db-url` is not given
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Parser, Debug)]
#[command(name = "trips-ingest")]
#[command(author, version, about = "Ingest a trips CSV file into PostgreSQL")]
pub struct Cli {
    /// Path to the semicolon-delimited CSV file
    #[arg(long = "csv", value_name = "PATH", default_value = DEFAULT_CSV_PATH)]
    pub csv: PathBuf,

    /// PostgreSQL connection URL
    #[arg(long = "db-url", value_name = "URL", env = DATABASE_URL_ENV, hide_env_values = true)]
    pub db_url: Option<String>,

    /// Rows per insert batch
    #[arg(long, value_name = "ROWS", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Log a progress line every N rows
    #[arg(long = "log-every", value_name = "ROWS", default_value_t = DEFAULT_LOG_EVERY_N_ROWS)]
    pub log_every: u64,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a run needs, validated
#[derive(Clone)]
pub struct IngestConfig {
    pub csv_path: PathBuf,
    pub database_url: String,
    pub pipeline: PipelineConfig,
}

impl std::fmt::Debug for IngestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestConfig")
            .field("csv_path", &self.csv_path)
            .field("database_url", &"<redacted>")
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

impl IngestConfig {
    /// Build from parsed arguments, falling back to `DATABASE_URL` when the
    /// flag is absent or blank
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let env_url = std::env::var(DATABASE_URL_ENV).ok();
        let database_url = resolve_database_url(cli.db_url.as_deref(), env_url.as_deref())?;

        let config = Self {
            csv_path: cli.csv.clone(),
            database_url,
            pipeline: PipelineConfig {
                batch_size: cli.batch_size,
                log_every_n_rows: cli.log_every,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(IngestError::config("Database URL cannot be empty"));
        }

        self.pipeline.validate()
    }
}

/// First non-blank of the flag value and the environment value
fn resolve_database_url(arg: Option<&str>, env: Option<&str>) -> Result<String> {
    [arg, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            IngestError::config(format!("Missing --db-url (or set {DATABASE_URL_ENV} env var)"))
        })
}
