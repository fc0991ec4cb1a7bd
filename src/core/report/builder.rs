//! Spreadsheet report builder
//!
//! Writes two sheets into one workbook:
//!
//! - `Daily Attendance`: header row plus one row per record, columns auto-sized
//!   to the longest rendered value (header included) plus padding, capped.
//! - `Summary`: total employees, report date, generation time.

use super::artifact::{artifact_file_name, ReportArtifact};
use crate::config::ReportConfig;
use crate::domain::{AttendanceError, AttendanceRecord, ReportDate, Result, TIMESTAMP_FORMAT};
use chrono::{Local, NaiveDateTime};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};

/// Name of the primary data sheet
pub const DATA_SHEET: &str = "Daily Attendance";

/// Name of the summary sheet
pub const SUMMARY_SHEET: &str = "Summary";

/// Header of the primary data sheet
pub const DATA_HEADERS: [&str; 5] = [
    "EmpCode",
    "EmpName",
    "Department",
    "FirstInTime",
    "DeviceName",
];

/// Header of the summary sheet
pub const SUMMARY_HEADERS: [&str; 3] = ["Total Employees", "Date", "Report Generated"];

/// Characters added to the longest value of a column
const COLUMN_PADDING: usize = 2;

/// Builds report artifacts
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    output_dir: PathBuf,
    file_prefix: String,
    max_column_width: u16,
}

impl ReportBuilder {
    /// Create a builder writing into `output_dir`
    pub fn new(
        output_dir: impl Into<PathBuf>,
        file_prefix: impl Into<String>,
        max_column_width: u16,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: file_prefix.into(),
            max_column_width,
        }
    }

    /// Create from report config
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            &config.output_dir,
            &config.file_prefix,
            config.max_column_width,
        )
    }

    /// Directory artifacts are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name prefix, joined to the date by `_`
    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    /// Same directory and widths, different file name prefix
    pub fn with_file_prefix(&self, file_prefix: impl Into<String>) -> Self {
        Self {
            file_prefix: file_prefix.into(),
            ..self.clone()
        }
    }

    /// Writes the artifact for `date`, stamped with the current local time
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceError::ArtifactWrite`] if the file cannot be
    /// created or written.
    pub fn build(&self, records: &[AttendanceRecord], date: ReportDate) -> Result<ReportArtifact> {
        self.build_at(records, date, Local::now().naive_local())
    }

    /// Writes the artifact for `date` with an explicit generation time
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceError::ArtifactWrite`] if the file cannot be
    /// created or written.
    pub fn build_at(
        &self,
        records: &[AttendanceRecord],
        date: ReportDate,
        generated_at: NaiveDateTime,
    ) -> Result<ReportArtifact> {
        let dir = self.resolved_output_dir()?;
        if !dir.is_dir() {
            return Err(AttendanceError::ArtifactWrite(format!(
                "Output directory does not exist: {}",
                dir.display()
            )));
        }
        let path = dir.join(artifact_file_name(&self.file_prefix, date));

        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.data_sheet(records)?);
        workbook.push_worksheet(summary_sheet(records.len(), date, generated_at)?);
        workbook.save(&path).map_err(|e| {
            AttendanceError::ArtifactWrite(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            report_date = %date,
            "Report artifact created"
        );

        Ok(ReportArtifact {
            path,
            record_count: records.len(),
            report_date: date,
            generated_at,
        })
    }

    fn resolved_output_dir(&self) -> Result<PathBuf> {
        if self.output_dir.is_absolute() {
            return Ok(self.output_dir.clone());
        }
        let cwd = std::env::current_dir().map_err(|e| {
            AttendanceError::ArtifactWrite(format!("Cannot resolve working directory: {e}"))
        })?;
        Ok(cwd.join(&self.output_dir))
    }

    fn data_sheet(&self, records: &[AttendanceRecord]) -> Result<Worksheet> {
        let rows: Vec<[String; 5]> = records.iter().map(render_row).collect();

        let mut sheet = Worksheet::new();
        sheet.set_name(DATA_SHEET)?;
        let header = Format::new().set_bold();

        for (col, title) in DATA_HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let row_num = idx as u32 + 1;
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(row_num, col as u16, value.as_str())?;
                }
            }
        }

        for (col, width) in column_widths(&rows, self.max_column_width)
            .into_iter()
            .enumerate()
        {
            sheet.set_column_width(col as u16, width)?;
        }

        Ok(sheet)
    }
}

fn summary_sheet(
    record_count: usize,
    date: ReportDate,
    generated_at: NaiveDateTime,
) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(SUMMARY_SHEET)?;
    let header = Format::new().set_bold();

    for (col, title) in SUMMARY_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    sheet.write_number(1, 0, record_count as f64)?;
    sheet.write_string(1, 1, date.to_string())?;
    sheet.write_string(1, 2, generated_at.format(TIMESTAMP_FORMAT).to_string())?;

    for (col, title) in SUMMARY_HEADERS.iter().enumerate() {
        sheet.set_column_width(col as u16, (title.chars().count() + COLUMN_PADDING) as f64)?;
    }
    sheet.set_column_width(2, (TIMESTAMP_FORMAT.len() + 2 + COLUMN_PADDING) as f64)?;

    Ok(sheet)
}

/// Cell texts of one record, in [`DATA_HEADERS`] order
fn render_row(record: &AttendanceRecord) -> [String; 5] {
    [
        record.employee_code.to_string(),
        record.employee_name.clone(),
        record.department.clone().unwrap_or_default(),
        record.first_in_display(),
        record.device_name.clone(),
    ]
}

/// Width of each data column: longest cell (header included) + padding, capped
fn column_widths(rows: &[[String; 5]], max_width: u16) -> Vec<f64> {
    DATA_HEADERS
        .iter()
        .enumerate()
        .map(|(col, title)| {
            let longest = rows
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(title.chars().count()))
                .max()
                .unwrap_or(0);
            (longest + COLUMN_PADDING).min(max_width as usize) as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmployeeCode;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(code: &str, name: &str) -> AttendanceRecord {
        AttendanceRecord::new(
            EmployeeCode::new(code).unwrap(),
            name,
            None,
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 2, 15),
            "Gate19",
        )
    }

    #[test]
    fn test_column_widths_use_longest_value() {
        let rows = vec![render_row(&record("E001", "Alexandria Ocasio"))];
        let widths = column_widths(&rows, 50);

        // EmpCode header (7) beats "E001" (4)
        assert_eq!(widths[0], 9.0);
        // name (17) beats header (7)
        assert_eq!(widths[1], 19.0);
        // timestamp is 19 characters
        assert_eq!(widths[3], 21.0);
    }

    #[test]
    fn test_column_widths_are_capped() {
        let long_name = "x".repeat(120);
        let rows = vec![render_row(&record("E001", &long_name))];
        let widths = column_widths(&rows, 50);
        assert_eq!(widths[1], 50.0);
    }

    #[test]
    fn test_column_widths_without_rows() {
        let widths = column_widths(&[], 50);
        assert_eq!(widths, vec![9.0, 9.0, 12.0, 13.0, 12.0]);
    }

    #[test]
    fn test_render_row_blank_optional_fields() {
        let mut rec = record("E009", "Dana");
        rec.first_in = None;
        let row = render_row(&rec);
        assert_eq!(row[2], "");
        assert_eq!(row[3], "");
    }

    #[test]
    fn test_build_writes_named_file() {
        let dir = TempDir::new().unwrap();
        let builder = ReportBuilder::new(dir.path(), "Daily_Attendance", 50);
        let date = ReportDate::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let artifact = builder
            .build(&[record("E001", "Alice"), record("E002", "Bob")], date)
            .unwrap();

        assert!(artifact.path.is_absolute());
        assert!(artifact.path.exists());
        assert_eq!(artifact.file_name(), "Daily_Attendance_20240301.xlsx");
        assert_eq!(artifact.record_count, 2);
    }

    #[test]
    fn test_build_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let builder = ReportBuilder::new(dir.path().join("missing"), "Daily_Attendance", 50);
        let date = ReportDate::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let result = builder.build(&[record("E001", "Alice")], date);
        assert!(matches!(result, Err(AttendanceError::ArtifactWrite(_))));
    }
}
