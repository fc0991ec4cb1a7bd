//! Integration tests for the report pipeline
//!
//! These tests drive `ReportPipeline` with in-memory fakes and verify that:
//! - every terminal state is reachable
//! - empty days and failed fetches produce no file and no message
//! - a delivered artifact is deleted, an undelivered one is kept

use async_trait::async_trait;
use attendance_report::adapters::attendance::AttendanceSource;
use attendance_report::adapters::mail::ReportMailer;
use attendance_report::core::diagnostics::run_diagnostics;
use attendance_report::core::pipeline::{ReportPipeline, RunOutcome};
use attendance_report::core::report::ReportBuilder;
use attendance_report::domain::{
    AttendanceError, AttendanceRecord, EmployeeCode, ReportDate, Result,
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Source returning canned records, or failing with a connection error
struct FakeSource {
    records: Option<Vec<AttendanceRecord>>,
    fetched_dates: Mutex<Vec<ReportDate>>,
}

impl FakeSource {
    fn with_records(records: Vec<AttendanceRecord>) -> Self {
        Self {
            records: Some(records),
            fetched_dates: Mutex::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            records: None,
            fetched_dates: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AttendanceSource for FakeSource {
    async fn test_connection(&self) -> Result<()> {
        match self.records {
            Some(_) => Ok(()),
            None => Err(AttendanceError::Connection("connection refused".to_string())),
        }
    }

    async fn fetch(&self, date: ReportDate) -> Result<Vec<AttendanceRecord>> {
        self.fetched_dates.lock().unwrap().push(date);
        self.records
            .clone()
            .ok_or_else(|| AttendanceError::Connection("connection refused".to_string()))
    }

    fn describe(&self) -> String {
        "fake store".to_string()
    }
}

/// Mailer recording each delivery; optionally rejects every send
struct FakeMailer {
    reject: bool,
    sends: AtomicUsize,
    delivered: Mutex<Vec<(PathBuf, bool, ReportDate)>>,
}

impl FakeMailer {
    fn accepting() -> Self {
        Self {
            reject: false,
            sends: AtomicUsize::new(0),
            delivered: Mutex::new(Vec::new()),
        }
    }

    fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::accepting()
        }
    }

    fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportMailer for FakeMailer {
    async fn deliver(&self, artifact: &Path, date: ReportDate) -> Result<()> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.delivered
            .lock()
            .unwrap()
            .push((artifact.to_path_buf(), artifact.exists(), date));
        if self.reject {
            return Err(AttendanceError::Delivery(
                "535 5.7.8 Username and Password not accepted".to_string(),
            ));
        }
        Ok(())
    }
}

fn record(code: &str, name: &str, dept: &str, h: u32, m: u32, s: u32) -> AttendanceRecord {
    AttendanceRecord::new(
        EmployeeCode::new(code).unwrap(),
        name,
        Some(dept.to_string()),
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s),
        "Gate19",
    )
}

fn scenario_records() -> Vec<AttendanceRecord> {
    vec![
        record("E001", "Alice", "Sales", 9, 2, 15),
        record("E002", "Bob", "Ops", 8, 55, 3),
    ]
}

fn march_first() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 3, 1)
}

fn pipeline(
    dir: &TempDir,
    source: Arc<FakeSource>,
    mailer: Arc<FakeMailer>,
) -> ReportPipeline {
    ReportPipeline::new(
        source,
        ReportBuilder::new(dir.path(), "Daily_Attendance", 50),
        mailer,
    )
}

fn files_in(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

#[tokio::test]
async fn test_delivered_report_is_deleted_afterwards() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(FakeSource::with_records(scenario_records()));
    let mailer = Arc::new(FakeMailer::accepting());

    let summary = pipeline(&dir, source.clone(), mailer.clone())
        .run(march_first())
        .await;

    assert_eq!(summary.outcome.name(), "completed-delivered");
    assert!(summary.is_success());
    assert_eq!(summary.record_count, 2);
    assert!(summary.cleanup_warning.is_none());

    let delivered = mailer.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    let (path, existed_at_send, date) = &delivered[0];
    assert!(*existed_at_send);
    assert_eq!(date.to_string(), "2024-03-01");
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "Daily_Attendance_20240301.xlsx"
    );
    assert!(!path.exists());
    assert_eq!(files_in(&dir), 0);

    match &summary.outcome {
        RunOutcome::CompletedDelivered { artifact } => assert_eq!(artifact.record_count, 2),
        other => panic!("unexpected outcome: {other}"),
    }
    assert_eq!(source.fetched_dates.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_day_writes_and_sends_nothing() {
    let dir = TempDir::new().unwrap();
    let mailer = Arc::new(FakeMailer::accepting());

    let summary = pipeline(
        &dir,
        Arc::new(FakeSource::with_records(Vec::new())),
        mailer.clone(),
    )
    .run(march_first())
    .await;

    assert_eq!(summary.outcome.name(), "completed-empty");
    assert!(summary.is_success());
    assert_eq!(summary.record_count, 0);
    assert_eq!(mailer.sends(), 0);
    assert_eq!(files_in(&dir), 0);
}

#[tokio::test]
async fn test_fetch_failure_writes_and_sends_nothing() {
    let dir = TempDir::new().unwrap();
    let mailer = Arc::new(FakeMailer::accepting());

    let summary = pipeline(&dir, Arc::new(FakeSource::unreachable()), mailer.clone())
        .run(march_first())
        .await;

    assert_eq!(summary.outcome.name(), "failed-fetch");
    assert!(!summary.is_success());
    assert_eq!(summary.outcome.error().map(|e| e.kind()), Some("connection"));
    assert_eq!(mailer.sends(), 0);
    assert_eq!(files_in(&dir), 0);
}

#[tokio::test]
async fn test_build_failure_sends_nothing() {
    let dir = TempDir::new().unwrap();
    let mailer = Arc::new(FakeMailer::accepting());
    let pipeline = ReportPipeline::new(
        Arc::new(FakeSource::with_records(scenario_records())),
        ReportBuilder::new(dir.path().join("does-not-exist"), "Daily_Attendance", 50),
        mailer.clone(),
    );

    let summary = pipeline.run(march_first()).await;

    assert_eq!(summary.outcome.name(), "failed-build");
    assert_eq!(
        summary.outcome.error().map(|e| e.kind()),
        Some("artifact_write")
    );
    assert_eq!(summary.record_count, 2);
    assert_eq!(mailer.sends(), 0);
}

#[tokio::test]
async fn test_delivery_failure_keeps_artifact() {
    let dir = TempDir::new().unwrap();
    let mailer = Arc::new(FakeMailer::rejecting());

    let summary = pipeline(
        &dir,
        Arc::new(FakeSource::with_records(scenario_records())),
        mailer.clone(),
    )
    .run(march_first())
    .await;

    assert_eq!(summary.outcome.name(), "failed-deliver");
    assert_eq!(summary.outcome.error().map(|e| e.kind()), Some("delivery"));
    assert_eq!(mailer.sends(), 1);

    let retained = summary.retained_artifact().expect("artifact retained");
    assert!(retained.exists());
    assert_eq!(retained, dir.path().join("Daily_Attendance_20240301.xlsx"));
}

#[tokio::test]
async fn test_health_check_leaves_undelivered_artifact_in_place() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(FakeSource::with_records(scenario_records()));
    let builder = ReportBuilder::new(dir.path(), "Daily_Attendance", 50);
    let pipeline = ReportPipeline::new(
        source.clone(),
        builder.clone(),
        Arc::new(FakeMailer::rejecting()),
    );

    let summary = pipeline.run(march_first()).await;
    let retained = summary.retained_artifact().expect("artifact retained");
    let before = std::fs::read(&retained).unwrap();

    let date = summary.report_date;
    let report = run_diagnostics(&*source, &builder, date).await;

    assert!(report.all_passed());
    assert!(retained.exists());
    assert_eq!(std::fs::read(&retained).unwrap(), before);
    assert_eq!(files_in(&dir), 1);
}

#[tokio::test]
async fn test_runs_are_independent() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(FakeSource::with_records(scenario_records()));
    let mailer = Arc::new(FakeMailer::accepting());
    let pipeline = pipeline(&dir, source.clone(), mailer.clone());

    let first = pipeline.run(march_first()).await;
    let second = pipeline.run(NaiveDate::from_ymd_opt(2024, 3, 2)).await;

    assert_ne!(first.run_id, second.run_id);
    assert_eq!(second.report_date.to_string(), "2024-03-02");
    assert_eq!(mailer.sends(), 2);
    assert_eq!(files_in(&dir), 0);

    let dates: Vec<String> = source
        .fetched_dates
        .lock()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-03-02"]);
}
