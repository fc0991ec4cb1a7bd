//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Records** ([`AttendanceRecord`], keyed by [`EmployeeCode`])
//! - **Target date** ([`ReportDate`])
//! - **Error taxonomy** ([`AttendanceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, AttendanceError>`]:
//!
//! ```rust
//! use attendance_report::domain::{AttendanceError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(AttendanceError::Delivery("535 5.7.8 credentials rejected".to_string()))
//! }
//! ```

pub mod date;
pub mod errors;
pub mod record;
pub mod result;

pub use date::ReportDate;
pub use errors::AttendanceError;
pub use record::{collapse_to_first_in, AttendanceRecord, EmployeeCode, TIMESTAMP_FORMAT};
pub use result::Result;
