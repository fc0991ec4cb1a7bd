//! Health checks behind `attendance-report check`
//!
//! Three independent checks, each run even if an earlier one failed:
//!
//! 1. store connectivity
//! 2. attendance query for the target date
//! 3. artifact generation, with the generated file removed again
//!
//! The generation check writes `<prefix>_check_YYYYMMDD.xlsx` next to the
//! real reports, so an artifact kept after a failed delivery is never
//! overwritten or removed.
//!
//! An empty query result passes checks 2 and 3; there is simply nothing to
//! write on that day.

use crate::adapters::attendance::AttendanceSource;
use crate::core::report::ReportBuilder;
use crate::domain::{AttendanceRecord, ReportDate};

/// Rows echoed back by the query check
const SAMPLE_ROWS: usize = 5;

/// Appended to the configured prefix for the generation check's file
const CHECK_PREFIX_SUFFIX: &str = "_check";

/// Outcome of one check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Short name of the check
    pub name: &'static str,

    /// Whether the check passed
    pub passed: bool,

    /// One-line result
    pub detail: String,

    /// Additional lines (sample rows, notes)
    pub notes: Vec<String>,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            detail: detail.into(),
            notes: Vec::new(),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            detail: detail.into(),
            notes: Vec::new(),
        }
    }

    fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }
}

/// Results of all checks, in execution order
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    /// Date the query and generation checks used
    pub report_date: ReportDate,

    /// One entry per check
    pub checks: Vec<CheckResult>,
}

impl DiagnosticReport {
    /// Number of checks that passed
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// True if every check passed
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Human-readable rendering, one line per check plus `Passed: n/m`
    pub fn render(&self) -> String {
        let mut out = format!("=== Attendance Report Diagnostics ({}) ===\n\n", self.report_date);
        for check in &self.checks {
            let mark = if check.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!("[{mark}] {}: {}\n", check.name, check.detail));
            for note in &check.notes {
                out.push_str(&format!("       {note}\n"));
            }
        }
        out.push_str(&format!(
            "\nPassed: {}/{}\n",
            self.passed_count(),
            self.checks.len()
        ));
        out.push_str(if self.all_passed() {
            "All checks passed\n"
        } else {
            "Some checks failed\n"
        });
        out
    }
}

/// Runs all checks against `source` and `builder`
pub async fn run_diagnostics(
    source: &dyn AttendanceSource,
    builder: &ReportBuilder,
    date: ReportDate,
) -> DiagnosticReport {
    let checks = vec![
        check_connection(source).await,
        check_query(source, date).await,
        check_generation(source, builder, date).await,
    ];

    for check in &checks {
        tracing::info!(
            check = check.name,
            passed = check.passed,
            detail = %check.detail,
            "Diagnostic check finished"
        );
    }

    DiagnosticReport {
        report_date: date,
        checks,
    }
}

async fn check_connection(source: &dyn AttendanceSource) -> CheckResult {
    const NAME: &str = "Database connection";
    match source.test_connection().await {
        Ok(()) => CheckResult::pass(NAME, format!("connected to {}", source.describe())),
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}

async fn check_query(source: &dyn AttendanceSource, date: ReportDate) -> CheckResult {
    const NAME: &str = "Attendance query";
    match source.fetch(date).await {
        Ok(records) => CheckResult::pass(
            NAME,
            format!("retrieved {} attendance records", records.len()),
        )
        .with_notes(records.iter().take(SAMPLE_ROWS).map(sample_line).collect()),
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}

async fn check_generation(
    source: &dyn AttendanceSource,
    builder: &ReportBuilder,
    date: ReportDate,
) -> CheckResult {
    const NAME: &str = "Report generation";
    let records = match source.fetch(date).await {
        Ok(records) => records,
        Err(e) => return CheckResult::fail(NAME, e.to_string()),
    };
    if records.is_empty() {
        return CheckResult::pass(NAME, "no data to generate a report from");
    }

    let check_builder =
        builder.with_file_prefix(format!("{}{CHECK_PREFIX_SUFFIX}", builder.file_prefix()));
    match check_builder.build(&records, date) {
        Ok(artifact) => {
            let detail = format!("generated {}", artifact.path.display());
            match tokio::fs::remove_file(&artifact.path).await {
                Ok(()) => CheckResult::pass(NAME, detail),
                Err(e) => CheckResult::pass(NAME, detail)
                    .with_notes(vec![format!("could not remove test artifact: {e}")]),
            }
        }
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}

fn sample_line(record: &AttendanceRecord) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        record.employee_code,
        record.employee_name,
        record.department.as_deref().unwrap_or(""),
        record.first_in_display(),
        record.device_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttendanceError, EmployeeCode, Result};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::str::FromStr;
    use tempfile::TempDir;

    struct FakeSource {
        reachable: bool,
        records: Vec<AttendanceRecord>,
    }

    #[async_trait]
    impl AttendanceSource for FakeSource {
        async fn test_connection(&self) -> Result<()> {
            if self.reachable {
                Ok(())
            } else {
                Err(AttendanceError::Connection("refused".to_string()))
            }
        }

        async fn fetch(&self, _date: ReportDate) -> Result<Vec<AttendanceRecord>> {
            if self.reachable {
                Ok(self.records.clone())
            } else {
                Err(AttendanceError::Connection("refused".to_string()))
            }
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    fn date() -> ReportDate {
        ReportDate::from_str("2024-03-01").unwrap()
    }

    fn record(code: &str) -> AttendanceRecord {
        AttendanceRecord::new(
            EmployeeCode::new(code).unwrap(),
            "Alice",
            Some("Sales".to_string()),
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 2, 15),
            "Gate19",
        )
    }

    #[tokio::test]
    async fn test_all_checks_pass_and_artifact_is_removed() {
        let dir = TempDir::new().unwrap();
        let source = FakeSource {
            reachable: true,
            records: vec![record("E001"), record("E002")],
        };
        let builder = ReportBuilder::new(dir.path(), "Daily_Attendance", 50);

        let report = run_diagnostics(&source, &builder, date()).await;

        assert!(report.all_passed());
        assert_eq!(report.passed_count(), 3);
        assert_eq!(report.checks[1].notes.len(), 2);
        assert!(report.checks[1].notes[0].starts_with("E001 | Alice | Sales"));
        assert!(report.checks[2]
            .detail
            .ends_with("Daily_Attendance_check_20240301.xlsx"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(report.render().contains("Passed: 3/3"));
    }

    #[tokio::test]
    async fn test_generation_check_keeps_existing_report() {
        let dir = TempDir::new().unwrap();
        let kept = dir.path().join("Daily_Attendance_20240301.xlsx");
        std::fs::write(&kept, b"undelivered report").unwrap();
        let source = FakeSource {
            reachable: true,
            records: vec![record("E001")],
        };
        let builder = ReportBuilder::new(dir.path(), "Daily_Attendance", 50);

        let report = run_diagnostics(&source, &builder, date()).await;

        assert!(report.all_passed());
        assert_eq!(std::fs::read(&kept).unwrap(), b"undelivered report");
        assert!(!dir
            .path()
            .join("Daily_Attendance_check_20240301.xlsx")
            .exists());
    }

    #[tokio::test]
    async fn test_empty_result_passes() {
        let dir = TempDir::new().unwrap();
        let source = FakeSource {
            reachable: true,
            records: Vec::new(),
        };
        let builder = ReportBuilder::new(dir.path(), "Daily_Attendance", 50);

        let report = run_diagnostics(&source, &builder, date()).await;

        assert!(report.all_passed());
        assert_eq!(report.checks[2].detail, "no data to generate a report from");
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_every_check() {
        let dir = TempDir::new().unwrap();
        let source = FakeSource {
            reachable: false,
            records: Vec::new(),
        };
        let builder = ReportBuilder::new(dir.path(), "Daily_Attendance", 50);

        let report = run_diagnostics(&source, &builder, date()).await;

        assert_eq!(report.passed_count(), 0);
        let rendered = report.render();
        assert!(rendered.contains("[FAIL] Database connection"));
        assert!(rendered.contains("Passed: 0/3"));
        assert!(rendered.contains("Some checks failed"));
    }

    #[tokio::test]
    async fn test_unwritable_output_fails_generation_only() {
        let dir = TempDir::new().unwrap();
        let source = FakeSource {
            reachable: true,
            records: vec![record("E001")],
        };
        let builder = ReportBuilder::new(dir.path().join("absent"), "Daily_Attendance", 50);

        let report = run_diagnostics(&source, &builder, date()).await;

        assert_eq!(report.passed_count(), 2);
        assert!(!report.checks[2].passed);
    }
}
