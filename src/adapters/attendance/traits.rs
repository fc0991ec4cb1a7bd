//! Attendance store abstraction
//!
//! The pipeline and the diagnostics only see [`AttendanceSource`], so tests
//! substitute an in-memory fake for the database.

use crate::domain::{AttendanceRecord, ReportDate, Result};
use async_trait::async_trait;

/// Read access to first-IN attendance for one terminal
#[async_trait]
pub trait AttendanceSource: Send + Sync {
    /// Opens a connection, runs a trivial statement and closes it
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AttendanceError::Connection`] if the store is
    /// unreachable or rejects the credentials.
    async fn test_connection(&self) -> Result<()>;

    /// Earliest IN event per employee on `date`, ordered by employee code
    ///
    /// Returns an empty vector when nothing matched. Never returns partial
    /// results: any failure aborts the whole fetch.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AttendanceError::Connection`] when the store
    /// cannot be reached and [`crate::domain::AttendanceError::Query`] when the
    /// statement fails or a row cannot be decoded.
    async fn fetch(&self, date: ReportDate) -> Result<Vec<AttendanceRecord>>;

    /// Short description of the store for logs (never includes credentials)
    fn describe(&self) -> String;
}
