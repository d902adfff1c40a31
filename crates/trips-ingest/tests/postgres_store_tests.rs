//! PostgreSQL store tests
//!
//! These tests require Docker. Run with:
//!
//! ```bash
//! cargo test -p trips-ingest --test postgres_store_tests -- --ignored
//! ```

mod common;

use chrono::NaiveDate;
use common::{init_test_tracing, valid_rows, write_csv, TestPostgres, HEADER};
use trips_common::TripStatus;
use trips_ingest::{
    run, BatchOutcome, IngestConfig, IngestError, IngestPipeline, PipelineConfig, TripRecord,
    TripStore,
};

fn trip(id: &str, status: TripStatus) -> TripRecord {
    TripRecord {
        trip_id: id.to_string(),
        client_id: "C1".to_string(),
        driver_id: "D1".to_string(),
        trip_date: NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_milli_opt(10, 0, 0, 250))
            .unwrap(),
        status,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_ensure_schema_is_idempotent() {
    init_test_tracing();
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    let mut store = pg.store().await.unwrap();

    store.ensure_schema().await.unwrap();
    store.ensure_schema().await.unwrap();

    let (indexes,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM pg_indexes WHERE tablename = 'trips' \
         AND indexname IN ('idx_trips_driver_date', 'idx_trips_client_date')",
    )
    .fetch_one(pg.pool())
    .await
    .unwrap();
    assert_eq!(indexes, 2);

    store.close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_batch_skips_conflicts() {
    init_test_tracing();
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    let mut store = pg.store().await.unwrap();
    store.ensure_schema().await.unwrap();

    let first = store
        .insert_batch(&[trip("T1", TripStatus::Done), trip("T2", TripStatus::NotRespond)])
        .await
        .unwrap();
    assert_eq!(first, BatchOutcome { inserted: 2, duplicates: 0 });

    // Existing id plus an intra-batch repeat
    let second = store
        .insert_batch(&[
            trip("T2", TripStatus::Done),
            trip("T3", TripStatus::Done),
            trip("T3", TripStatus::NotRespond),
        ])
        .await
        .unwrap();
    assert_eq!(second, BatchOutcome { inserted: 1, duplicates: 2 });

    assert_eq!(pg.count_trips().await.unwrap(), 3);

    let (status,): (String,) = sqlx::query_as("SELECT status FROM trips WHERE trip_id = 'T2'")
        .fetch_one(pg.pool())
        .await
        .unwrap();
    assert_eq!(status, "not_respond");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_failed_batch_commits_nothing() {
    init_test_tracing();
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    let mut store = pg.store().await.unwrap();
    store.ensure_schema().await.unwrap();

    store.insert_batch(&[trip("T1", TripStatus::Done)]).await.unwrap();

    sqlx::query(
        "CREATE FUNCTION reject_trip() RETURNS trigger AS $$ \
         BEGIN \
             IF NEW.trip_id = 'REJECT' THEN RAISE EXCEPTION 'trip rejected'; END IF; \
             RETURN NEW; \
         END $$ LANGUAGE plpgsql",
    )
    .execute(pg.pool())
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER reject_trip BEFORE INSERT ON trips \
         FOR EACH ROW EXECUTE FUNCTION reject_trip()",
    )
    .execute(pg.pool())
    .await
    .unwrap();

    let err = store
        .insert_batch(&[
            trip("T2", TripStatus::Done),
            trip("REJECT", TripStatus::Done),
            trip("T3", TripStatus::NotRespond),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::Database(_)), "unexpected error: {err:?}");
    assert_eq!(pg.count_trips().await.unwrap(), 1);

    // The connection is still usable after the rollback
    let next = store.insert_batch(&[trip("T4", TripStatus::Done)]).await.unwrap();
    assert_eq!(next, BatchOutcome { inserted: 1, duplicates: 0 });
    assert_eq!(pg.count_trips().await.unwrap(), 2);

    store.close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_empty_batch_is_noop() {
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    let mut store = pg.store().await.unwrap();
    store.ensure_schema().await.unwrap();

    assert_eq!(store.insert_batch(&[]).await.unwrap(), BatchOutcome::default());
    assert_eq!(pg.count_trips().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_sub_second_precision_round_trips() {
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    let mut store = pg.store().await.unwrap();
    store.ensure_schema().await.unwrap();

    let record = trip("T1", TripStatus::Done);
    store.insert_batch(std::slice::from_ref(&record)).await.unwrap();

    let (stored,): (chrono::NaiveDateTime,) =
        sqlx::query_as("SELECT trip_date FROM trips WHERE trip_id = 'T1'")
            .fetch_one(pg.pool())
            .await
            .unwrap();
    assert_eq!(stored, record.trip_date);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_full_file_twice() {
    init_test_tracing();
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    let mut store = pg.store().await.unwrap();
    store.ensure_schema().await.unwrap();

    let mut csv = valid_rows(2500);
    csv.push_str("BAD1;C1;D1;2024-13-01 10:00:00;done\n");
    let (_dir, path) = write_csv("trips.csv", &csv).unwrap();

    let first = IngestPipeline::new(&mut store, PipelineConfig::default())
        .unwrap()
        .ingest_file(&path)
        .await
        .unwrap();
    assert_eq!(first.inserted, 2500);
    assert_eq!(first.invalid_date, 1);

    let second = IngestPipeline::new(&mut store, PipelineConfig::default())
        .unwrap()
        .ingest_file(&path)
        .await
        .unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.duplicates_skipped, 2500);

    assert_eq!(pg.count_trips().await.unwrap(), 2500);
    store.close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_header_mismatch_leaves_schema_in_place() {
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    let mut store = pg.store().await.unwrap();
    store.ensure_schema().await.unwrap();

    let csv = format!("{}\nT1;C1;D1;2024-01-01 10:00:00;done\n", HEADER.replace(';', ","));
    let (_dir, path) = write_csv("trips.csv", &csv).unwrap();

    let err = IngestPipeline::new(&mut store, PipelineConfig::default())
        .unwrap()
        .ingest_file(&path)
        .await
        .unwrap_err();
    assert!(err.is_header_mismatch());
    assert_eq!(pg.count_trips().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_run_releases_connection_on_failure() {
    init_test_tracing();
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    let dir = tempfile::tempdir().unwrap();

    let config = IngestConfig {
        csv_path: dir.path().join("missing.csv"),
        database_url: format!("{}?application_name=trips-ingest-run", pg.connection_string()),
        pipeline: PipelineConfig::default(),
    };

    let err = run(&config).await.unwrap_err();
    assert!(matches!(err, IngestError::Open { .. }), "unexpected error: {err:?}");

    // Schema was created before the file was opened
    assert_eq!(pg.count_trips().await.unwrap(), 0);

    let mut sessions = i64::MAX;
    for _ in 0..20 {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM pg_stat_activity WHERE application_name = 'trips-ingest-run'",
        )
        .fetch_one(pg.pool())
        .await
        .unwrap();
        sessions = count;
        if sessions == 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    assert_eq!(sessions, 0, "ingest connection left open");
}
