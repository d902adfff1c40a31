//! File logging runs in its own test binary because the subscriber is global.

use tracing::info;
use trips_common::logging::{init_logging, LogConfig, LogOutput};

#[test]
fn test_file_output_writes_into_log_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_dir = dir.path().join("logs");

    let config = LogConfig::builder()
        .output(LogOutput::File)
        .log_dir(&log_dir)
        .log_file_prefix("trips-test")
        .build();

    let guard = init_logging(&config).expect("logging should initialize");
    info!(rows_read = 3u64, "file logging smoke test");
    drop(guard);

    let entries: Vec<_> = std::fs::read_dir(&log_dir)
        .expect("log dir created")
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(entries.len(), 1);

    let name = entries[0].file_name().to_string_lossy().to_string();
    assert!(name.starts_with("trips-test"), "unexpected file {name}");

    let contents = std::fs::read_to_string(entries[0].path()).expect("read log");
    assert!(contents.contains("file logging smoke test"));

    // A second subscriber cannot be installed
    assert!(init_logging(&LogConfig::default()).is_err());
}
