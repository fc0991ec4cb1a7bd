//! Spreadsheet report generation
//!
//! [`ReportBuilder`] turns attendance records into a [`ReportArtifact`] on
//! disk. See [`builder`] for the sheet layout.

pub mod artifact;
pub mod builder;

pub use artifact::{artifact_file_name, ReportArtifact};
pub use builder::{ReportBuilder, DATA_HEADERS, DATA_SHEET, SUMMARY_HEADERS, SUMMARY_SHEET};
