//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output
//! - optional JSON log files with daily or hourly rotation
//! - `RUST_LOG` overrides the configured level
//!
//! # Example
//!
//! ```no_run
//! use attendance_report::logging::init_logging;
//! use attendance_report::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Scheduler started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a report run
///
/// # Example
///
/// ```no_run
/// use attendance_report::log_run_start;
/// use attendance_report::domain::ReportDate;
///
/// let run_id = uuid::Uuid::new_v4();
/// log_run_start!(run_id, ReportDate::today());
/// ```
#[macro_export]
macro_rules! log_run_start {
    ($run_id:expr, $date:expr) => {
        tracing::info!(
            run_id = %$run_id,
            report_date = %$date,
            "Starting attendance report run"
        );
    };
}

/// Log the stage a report run failed in, with the error kind
///
/// # Example
///
/// ```no_run
/// use attendance_report::log_stage_failure;
/// use attendance_report::domain::AttendanceError;
///
/// let error = AttendanceError::Connection("timed out".to_string());
/// log_stage_failure!(uuid::Uuid::new_v4(), "fetch", &error);
/// ```
#[macro_export]
macro_rules! log_stage_failure {
    ($run_id:expr, $stage:expr, $error:expr) => {
        tracing::error!(
            run_id = %$run_id,
            stage = $stage,
            error_kind = $error.kind(),
            error = %$error,
            "Report run stage failed"
        );
    };
}

/// Log the terminal state of a report run
///
/// # Example
///
/// ```no_run
/// use attendance_report::log_run_complete;
/// use std::time::Duration;
///
/// log_run_complete!(uuid::Uuid::new_v4(), "completed-delivered", 2, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($run_id:expr, $outcome:expr, $records:expr, $duration:expr) => {
        tracing::info!(
            run_id = %$run_id,
            outcome = $outcome,
            records = $records,
            duration_ms = $duration.as_millis() as u64,
            "Attendance report run finished"
        );
    };
}
