//! Data source adapter
//!
//! - [`AttendanceSource`] - the trait the pipeline depends on
//! - [`PostgresAttendanceSource`] - eTimeTrackLite schema on PostgreSQL

pub mod postgresql;
pub mod traits;

pub use postgresql::{PostgresAttendanceSource, SslMode, FIRST_IN_QUERY};
pub use traits::AttendanceSource;
