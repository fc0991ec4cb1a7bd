//! CLI command implementations
//!
//! Each command returns the process exit code:
//! 0 success, 1 run or check failure, 2 configuration error.

pub mod check;
pub mod run;
pub mod schedule;
pub mod validate;

/// Exit code for a successful command
pub const EXIT_OK: i32 = 0;

/// Exit code for a failed run or check
pub const EXIT_FAILED: i32 = 1;

/// Exit code for a configuration error
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for an unexpected fatal error
pub const EXIT_FATAL: i32 = 5;
