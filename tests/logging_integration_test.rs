//! Integration test for file logging
//!
//! A global subscriber can only be installed once per process, so this
//! binary holds a single test.

use attendance_report::config::LoggingConfig;
use attendance_report::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_file_logging_writes_json_lines() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("logs");
    let config = LoggingConfig {
        level: "info".to_string(),
        local_enabled: true,
        local_path: log_dir.to_string_lossy().into_owned(),
        local_rotation: "daily".to_string(),
    };

    let guard = init_logging("info", &config).unwrap();
    drop(guard);

    let files: Vec<_> = std::fs::read_dir(&log_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);

    let contents = std::fs::read_to_string(&files[0]).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("Logging initialized"))
        .unwrap();
    assert!(line.starts_with('{'));
    assert!(line.contains("\"local_enabled\":true"));

    // A second subscriber cannot be installed
    assert!(init_logging("info", &config).is_err());
}
