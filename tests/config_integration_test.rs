//! Integration tests for configuration loading and validation
//!
//! Tests that touch the process environment hold `ENV_MUTEX` and clean up
//! the variables they set.

use attendance_report::config::load_config;
use attendance_report::domain::AttendanceError;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "DB_SERVER",
    "DB_PORT",
    "DB_NAME",
    "DB_USERNAME",
    "DB_PASSWORD",
    "DB_SSL_MODE",
    "DB_CONNECT_TIMEOUT_SECONDS",
    "REPORT_DEVICE_ID",
    "EMAIL_FROM",
    "EMAIL_PASSWORD",
    "EMAIL_TO",
    "SMTP_SERVER",
    "SMTP_PORT",
    "SMTP_TIMEOUT_SECONDS",
    "REPORT_OUTPUT_DIR",
    "REPORT_FILE_PREFIX",
    "SCHEDULE_DAILY_AT",
    "SCHEDULE_POLL_INTERVAL_SECONDS",
    "RUN_IMMEDIATELY",
    "LOG_LEVEL",
    "LOG_LOCAL_ENABLED",
    "LOG_LOCAL_PATH",
    "LOG_LOCAL_ROTATION",
    "TEST_ATTENDANCE_DB_PASSWORD",
    "TEST_ATTENDANCE_MAIL_PASSWORD",
];

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_defaults_without_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let config = load_config(None::<&str>).unwrap();

    assert_eq!(config.database.host, "localhost");
    assert_eq!(config.database.device_id, 19);
    assert_eq!(config.mail.smtp_server, "smtp.gmail.com");
    assert_eq!(config.mail.smtp_port, 587);
    assert!(config.mail.from.is_none());
    assert!(config.mail.password.is_none());
    assert!(config.mail.validate_for_delivery().is_err());
    assert_eq!(config.schedule.daily_at, "12:40");
    assert!(!config.schedule.run_immediately);
    assert_eq!(config.report.file_prefix, "Daily_Attendance");
}

#[test]
fn test_load_file_with_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_ATTENDANCE_DB_PASSWORD", "sa@123");
    std::env::set_var("TEST_ATTENDANCE_MAIL_PASSWORD", "app-password");

    let file = write_config(
        r#"
# Attendance store
[database]
host = "10.0.0.5"
port = 5433
name = "etimetrackliteWEB"
username = "report_reader"
password = "${TEST_ATTENDANCE_DB_PASSWORD}"
device_id = 21

[mail]
from = "reports@example.com"
password = "${TEST_ATTENDANCE_MAIL_PASSWORD}"
to = "hr@example.com"
smtp_port = 465

[report]
output_dir = "/var/tmp"

[schedule]
daily_at = "07:15"
run_immediately = true
"#,
    );

    let config = load_config(Some(file.path())).unwrap();
    cleanup_env_vars();

    assert_eq!(config.database.host, "10.0.0.5");
    assert_eq!(config.database.port, 5433);
    assert_eq!(config.database.password.expose_secret(), "sa@123");
    assert_eq!(config.database.device_id, 21);
    assert_eq!(config.mail.from.as_deref(), Some("reports@example.com"));
    assert!(config.mail.validate_for_delivery().is_ok());
    assert_eq!(config.mail.smtp_port, 465);
    assert_eq!(config.report.output_dir, "/var/tmp");
    assert_eq!(config.schedule.daily_at, "07:15");
    assert!(config.schedule.run_immediately);
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[database]
password = "${TEST_ATTENDANCE_DB_PASSWORD}"
"#,
    );

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, AttendanceError::Configuration(_)));
    assert!(err.to_string().contains("TEST_ATTENDANCE_DB_PASSWORD"));
}

#[test]
fn test_environment_overrides_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("DB_SERVER", "sql.internal:6543");
    std::env::set_var("EMAIL_TO", "ops@example.com");
    std::env::set_var("RUN_IMMEDIATELY", "true");

    let file = write_config(
        r#"
[database]
host = "10.0.0.5"

[mail]
to = "hr@example.com"
"#,
    );

    let config = load_config(Some(file.path()));
    cleanup_env_vars();
    let config = config.unwrap();

    assert_eq!(config.database.host, "sql.internal");
    assert_eq!(config.database.port, 6543);
    assert_eq!(config.mail.to, "ops@example.com");
    assert!(config.schedule.run_immediately);
}

#[test]
fn test_invalid_values_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("SMTP_PORT", "not-a-port");
    let result = load_config(None::<&str>);
    cleanup_env_vars();
    assert!(matches!(result, Err(AttendanceError::Configuration(_))));

    std::env::set_var("SCHEDULE_DAILY_AT", "25:00");
    let result = load_config(None::<&str>);
    cleanup_env_vars();
    assert!(matches!(result, Err(AttendanceError::Configuration(_))));
}

#[test]
fn test_missing_file_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let result = load_config(Some("/nonexistent/attendance.toml"));
    assert!(matches!(result, Err(AttendanceError::Configuration(_))));
}
