//! Domain error types
//!
//! The error taxonomy of a report run. Every adapter converts its third-party
//! failures into one of these variants at the boundary, so callers never see
//! driver, spreadsheet or SMTP library types.

use thiserror::Error;

/// Main error type
///
/// Each variant aborts only the current report run. `Configuration` is the one
/// kind that is fatal to the process, and only at startup.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Attendance store unreachable or credentials rejected
    #[error("Connection error: {0}")]
    Connection(String),

    /// Attendance query could not be executed or decoded
    #[error("Query error: {0}")]
    Query(String),

    /// Report file could not be created or written
    #[error("Artifact write error: {0}")]
    ArtifactWrite(String),

    /// Mail authentication, connection or send failure
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// I/O errors outside of artifact generation
    #[error("I/O error: {0}")]
    Io(String),
}

impl AttendanceError {
    /// Short stable name of the error kind, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            AttendanceError::Configuration(_) => "configuration",
            AttendanceError::Connection(_) => "connection",
            AttendanceError::Query(_) => "query",
            AttendanceError::ArtifactWrite(_) => "artifact_write",
            AttendanceError::Delivery(_) => "delivery",
            AttendanceError::Io(_) => "io",
        }
    }
}

impl From<std::io::Error> for AttendanceError {
    fn from(err: std::io::Error) -> Self {
        AttendanceError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for AttendanceError {
    fn from(err: toml::de::Error) -> Self {
        AttendanceError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<rust_xlsxwriter::XlsxError> for AttendanceError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AttendanceError::ArtifactWrite(err.to_string())
    }
}
