//! Configuration management.
//!
//! The configuration is environment-first: every setting has a default except
//! the mail credentials, and each can be overridden from the environment (a
//! `.env` file in the working directory is loaded at startup). An optional TOML
//! file can provide a base layer, with `${VAR_NAME}` substitution.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use attendance_report::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None::<&str>)?;
//! println!("Store: {}", config.database.endpoint_display());
//! println!("Daily at: {}", config.schedule.daily_at);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`DatabaseConfig`] - attendance store connection, fixed device id
//! - [`MailConfig`] - sender, credentials, recipient, relay
//! - [`ReportConfig`] - artifact directory, file prefix, column width cap
//! - [`ScheduleConfig`] - daily time, poll interval, immediate run
//! - [`LoggingConfig`] - level and optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [database]
//! host = "10.0.0.5"
//! port = 5432
//! name = "etimetrackliteWEB"
//! username = "report_reader"
//! password = "${DB_PASSWORD}"
//! device_id = 19
//!
//! [mail]
//! from = "attendance@example.com"
//! password = "${EMAIL_PASSWORD}"
//! to = "hr@example.com"
//!
//! [schedule]
//! daily_at = "12:40"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{apply_env_overrides, load_config};
pub use schema::{
    DatabaseConfig, LoggingConfig, MailConfig, ReportConfig, ReportSystemConfig, ScheduleConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
