//! Generated report file

use crate::domain::ReportDate;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// A spreadsheet written to disk for one report run
///
/// Owned by the run that created it: the pipeline deletes the file after a
/// successful delivery and leaves it in place when delivery fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    /// Absolute path of the file
    pub path: PathBuf,

    /// Number of data rows in the primary sheet
    pub record_count: usize,

    /// Day the report covers
    pub report_date: ReportDate,

    /// Local time the file was generated
    pub generated_at: NaiveDateTime,
}

impl ReportArtifact {
    /// Absolute path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directory, used as the attachment name
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// `<prefix>_<YYYYMMDD>.xlsx`
pub fn artifact_file_name(prefix: &str, date: ReportDate) -> String {
    format!("{}_{}.xlsx", prefix, date.compact())
}
