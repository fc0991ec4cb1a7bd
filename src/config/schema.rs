//! Configuration schema types
//!
//! Every section has defaults, so a process started with nothing but the mail
//! credentials in its environment gets a complete configuration.

use crate::config::{secret_string, SecretString};
use crate::core::schedule::DailyTime;
use serde::Deserialize;

/// Root configuration
///
/// Passed by construction to each component; there is no process-wide
/// configuration state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSystemConfig {
    /// Attendance store connection and query settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Outbound mail settings
    #[serde(default)]
    pub mail: MailConfig,

    /// Report artifact settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Daily trigger settings
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReportSystemConfig {
    /// Validates the configuration
    ///
    /// Mail credentials are not checked here; see
    /// [`MailConfig::validate_for_delivery`].
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.database.validate()?;
        self.mail.validate()?;
        self.report.validate()?;
        self.schedule.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Attendance store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Store host name or address
    #[serde(default = "default_db_host")]
    pub host: String,

    /// Store port
    #[serde(default = "default_db_port")]
    pub port: u16,

    /// Database name
    #[serde(default = "default_db_name")]
    pub name: String,

    /// Login user
    #[serde(default = "default_db_username")]
    pub username: String,

    /// Login password
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default = "default_db_password")]
    pub password: SecretString,

    /// TLS mode (disable or require)
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Attendance terminal whose IN events feed the report
    #[serde(default = "default_device_id")]
    pub device_id: i32,
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("database.host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("database.port must be > 0".to_string());
        }

        if self.name.trim().is_empty() {
            return Err("database.name cannot be empty".to_string());
        }

        if self.username.trim().is_empty() {
            return Err("database.username cannot be empty".to_string());
        }

        let valid_ssl_modes = ["disable", "require"];
        if !valid_ssl_modes.contains(&self.ssl_mode.as_str()) {
            return Err(format!(
                "database.ssl_mode must be one of: {}, got '{}'",
                valid_ssl_modes.join(", "),
                self.ssl_mode
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err("database.connect_timeout_seconds must be > 0".to_string());
        }

        if self.device_id < 0 {
            return Err(format!(
                "database.device_id must be >= 0, got {}",
                self.device_id
            ));
        }

        Ok(())
    }

    /// Human-readable label of the source terminal, used in message text
    pub fn device_label(&self) -> String {
        format!("Device {}", self.device_id)
    }

    /// `host:port/name` for logs and summaries, never includes credentials
    pub fn endpoint_display(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.name)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            username: default_db_username(),
            password: default_db_password(),
            ssl_mode: default_ssl_mode(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            device_id: default_device_id(),
        }
    }
}

/// Outbound mail configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Sender address, also the SMTP login (no default)
    #[serde(default)]
    pub from: Option<String>,

    /// Sender password (no default)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Recipient address
    #[serde(default = "default_mail_to")]
    pub to: String,

    /// Mail relay host
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,

    /// Mail relay port (465 = implicit TLS, anything else = STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Relay command timeout in seconds
    #[serde(default = "default_smtp_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl MailConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.to.contains('@') {
            return Err(format!("mail.to '{}' is not an email address", self.to));
        }

        if let Some(from) = &self.from {
            if !from.contains('@') {
                return Err(format!("mail.from '{from}' is not an email address"));
            }
        }

        if self.smtp_server.trim().is_empty() {
            return Err("mail.smtp_server cannot be empty".to_string());
        }

        if self.smtp_port == 0 {
            return Err("mail.smtp_port must be > 0".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("mail.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }

    /// Checks that the sender credentials required for delivery are present
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing setting
    pub fn validate_for_delivery(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.from.as_deref().map(str::trim).unwrap_or("").is_empty() {
            return Err("mail.from (EMAIL_FROM) is required for delivery".to_string());
        }

        if self
            .password
            .as_ref()
            .map(|p| p.expose_secret().is_empty())
            .unwrap_or(true)
        {
            return Err("mail.password (EMAIL_PASSWORD) is required for delivery".to_string());
        }

        Ok(())
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from: None,
            password: None,
            to: default_mail_to(),
            smtp_server: default_smtp_server(),
            smtp_port: default_smtp_port(),
            timeout_seconds: default_smtp_timeout_seconds(),
        }
    }
}

/// Report artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Directory the artifact is written to (relative to the working directory)
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name prefix, followed by `_YYYYMMDD.xlsx`
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Upper bound for auto-sized column widths, in characters
    #[serde(default = "default_max_column_width")]
    pub max_column_width: u16,
}

impl ReportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("report.output_dir cannot be empty".to_string());
        }

        if self.file_prefix.trim().is_empty() {
            return Err("report.file_prefix cannot be empty".to_string());
        }

        if self.file_prefix.contains(['/', '\\']) {
            return Err(format!(
                "report.file_prefix must not contain path separators, got '{}'",
                self.file_prefix
            ));
        }

        if !(10..=255).contains(&self.max_column_width) {
            return Err(format!(
                "report.max_column_width must be between 10 and 255, got {}",
                self.max_column_width
            ));
        }

        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            max_column_width: default_max_column_width(),
        }
    }
}

/// Daily trigger configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Local wall-clock time of the daily run (HH:MM)
    #[serde(default = "default_daily_at")]
    pub daily_at: String,

    /// Seconds between due-trigger polls
    #[serde(default = "default_poll_interval_seconds")]
    pub poll_interval_seconds: u64,

    /// Run once immediately at startup
    #[serde(default)]
    pub run_immediately: bool,
}

impl ScheduleConfig {
    fn validate(&self) -> Result<(), String> {
        self.daily_time()?;

        if !(1..=3600).contains(&self.poll_interval_seconds) {
            return Err(format!(
                "schedule.poll_interval_seconds must be between 1 and 3600, got {}",
                self.poll_interval_seconds
            ));
        }

        Ok(())
    }

    /// Parsed daily trigger time
    ///
    /// # Errors
    ///
    /// Returns an error if `daily_at` is not a valid `HH:MM` time
    pub fn daily_time(&self) -> Result<DailyTime, String> {
        self.daily_at
            .parse::<DailyTime>()
            .map_err(|e| format!("schedule.daily_at: {e}"))
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_at: default_daily_at(),
            poll_interval_seconds: default_poll_interval_seconds(),
            run_immediately: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "etimetrackliteWEB".to_string()
}

fn default_db_username() -> String {
    "attendance".to_string()
}

fn default_db_password() -> SecretString {
    secret_string(String::new())
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

fn default_connect_timeout_seconds() -> u64 {
    30
}

fn default_device_id() -> i32 {
    19
}

fn default_mail_to() -> String {
    "attendance@example.com".to_string()
}

fn default_smtp_server() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_timeout_seconds() -> u64 {
    60
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_file_prefix() -> String {
    "Daily_Attendance".to_string()
}

fn default_max_column_width() -> u16 {
    50
}

fn default_daily_at() -> String {
    "12:40".to_string()
}

fn default_poll_interval_seconds() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
