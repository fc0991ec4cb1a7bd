//! Result type alias

use super::errors::AttendanceError;

/// Result type alias for report operations
///
/// # Examples
///
/// ```
/// use attendance_report::domain::result::Result;
/// use attendance_report::domain::errors::AttendanceError;
///
/// fn failing_function() -> Result<()> {
///     Err(AttendanceError::Query("relation does not exist".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AttendanceError>;
