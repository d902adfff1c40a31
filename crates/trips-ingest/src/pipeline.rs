//! Ingestion orchestration
//!
//! Streams the source file row by row, classifies each row, buffers accepted
//! records and flushes full batches to a [`TripStore`]. Reads and writes are
//! strictly sequential.

use std::path::Path;
use std::time::Instant;

use csv_async::{AsyncReaderBuilder, ByteRecord};
use tokio::io::AsyncRead;
use tracing::{debug, info, warn};

use crate::batch::BatchAccumulator;
use crate::config::{IngestConfig, DEFAULT_BATCH_SIZE, DEFAULT_LOG_EVERY_N_ROWS, MAX_BATCH_SIZE};
use crate::counters::Counters;
use crate::error::{IngestError, Result};
use crate::models::{RawRow, TripRecord, EXPECTED_HEADER};
use crate::report::IngestReport;
use crate::storage::{PgTripStore, TripStore};
use crate::validate::validate_row;

const UTF8_BOM: char = '\u{feff}';

/// Knobs for a single pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Rows per `insert_batch` call
    pub batch_size: usize,
    /// Emit a progress line every this many rows read
    pub log_every_n_rows: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            log_every_n_rows: DEFAULT_LOG_EVERY_N_ROWS,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(IngestError::config(format!(
                "Batch size must be between 1 and {} (got {})",
                MAX_BATCH_SIZE, self.batch_size
            )));
        }

        if self.log_every_n_rows == 0 {
            return Err(IngestError::config("Progress interval must be greater than 0"));
        }

        Ok(())
    }
}

/// Drives one run against a borrowed store
pub struct IngestPipeline<'a, S: TripStore + ?Sized> {
    store: &'a mut S,
    config: PipelineConfig,
}

impl<'a, S: TripStore + ?Sized> IngestPipeline<'a, S> {
    pub fn new(store: &'a mut S, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Open `path` and ingest it
    pub async fn ingest_file(&mut self, path: &Path) -> Result<Counters> {
        let file = tokio::fs::File::open(path).await.map_err(|source| IngestError::Open {
            path: path.display().to_string(),
            source,
        })?;

        info!(path = %path.display(), "Reading trips file");
        self.ingest_reader(file).await
    }

    /// Ingest a semicolon-delimited stream whose first line is the header
    ///
    /// Fails before counting any row when the header does not match.
    pub async fn ingest_reader<R>(&mut self, reader: R) -> Result<Counters>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut csv = AsyncReaderBuilder::new()
            .delimiter(b';')
            .quote(b'"')
            .has_headers(true)
            .flexible(true)
            .create_reader(reader);

        check_header(csv.byte_headers().await?)?;

        let mut counters = Counters::new();
        let mut batch = BatchAccumulator::new(self.config.batch_size);
        let mut record = ByteRecord::new();

        while csv.read_byte_record(&mut record).await? {
            counters.record_read();

            if let Some(trip) = validate_row(&RawRow::from_byte_record(&record), &mut counters) {
                if let Some(full) = batch.push(trip) {
                    self.flush(&full, &mut counters).await?;
                }
            }

            if counters.total_rows_read % self.config.log_every_n_rows == 0 {
                log_progress(&counters);
            }
        }

        if let Some(rest) = batch.drain() {
            self.flush(&rest, &mut counters).await?;
        }

        debug!(?counters, "Stream exhausted");
        Ok(counters)
    }

    async fn flush(&mut self, records: &[TripRecord], counters: &mut Counters) -> Result<()> {
        let outcome = self
            .store
            .insert_batch(records)
            .await
            .map_err(|e| IngestError::BatchInsert {
                rows: records.len(),
                rows_read: counters.total_rows_read,
                source: Box::new(e),
            })?;

        counters.record_batch(outcome);
        Ok(())
    }
}

/// Header must match exactly once a leading BOM is removed
fn check_header(header: &ByteRecord) -> Result<()> {
    let found: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let text = String::from_utf8_lossy(field);
            if i == 0 {
                text.trim_start_matches(UTF8_BOM).to_string()
            } else {
                text.into_owned()
            }
        })
        .collect();

    if found.iter().map(String::as_str).eq(EXPECTED_HEADER) {
        Ok(())
    } else {
        Err(IngestError::header_mismatch(&EXPECTED_HEADER, &found))
    }
}

fn log_progress(counters: &Counters) {
    info!(
        read = counters.total_rows_read,
        inserted = counters.inserted,
        dup = counters.duplicates_skipped,
        invalid_date = counters.invalid_date,
        invalid_status = counters.invalid_status,
        other = counters.other_errors,
        "Progress"
    );
}

/// Full run: connect, ensure schema, ingest the file, close
///
/// Duration covers everything from connecting to closing.
pub async fn run(config: &IngestConfig) -> Result<IngestReport> {
    let started = Instant::now();

    let mut store = PgTripStore::connect(&config.database_url).await?;

    let counters = match ingest_with(&mut store, config).await {
        Ok(counters) => counters,
        Err(e) => {
            if let Err(close_err) = store.close().await {
                warn!(error = %close_err, "Failed to close connection after ingestion error");
            }
            return Err(e);
        },
    };

    store.close().await?;

    let report = IngestReport::new(counters, started.elapsed());
    info!(
        rows = counters.total_rows_read,
        inserted = counters.inserted,
        duration_secs = report.duration.as_secs_f64(),
        "Ingestion finished"
    );

    Ok(report)
}

async fn ingest_with<S: TripStore + ?Sized>(
    store: &mut S,
    config: &IngestConfig,
) -> Result<Counters> {
    store.ensure_schema().await?;

    IngestPipeline::new(store, config.pipeline)?
        .ingest_file(&config.csv_path)
        .await
}
