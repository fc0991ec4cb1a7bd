//! Configuration loader with optional TOML file and environment overrides

use super::schema::ReportSystemConfig;
use super::secret::secret_string;
use crate::domain::errors::AttendanceError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads the configuration
///
/// This function:
/// 1. Reads the TOML file, if a path is given (defaults otherwise)
/// 2. Performs environment variable substitution (${VAR} syntax) in the file
/// 3. Applies environment variable overrides (`DB_SERVER`, `EMAIL_TO`, ...)
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - The given file cannot be read
/// - TOML parsing fails
/// - A referenced `${VAR}` is not set
/// - An override has an unparsable value
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use attendance_report::config::loader::load_config;
///
/// let config = load_config(None::<&str>).expect("Failed to load config");
/// ```
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<ReportSystemConfig> {
    let mut config = match path {
        Some(path) => parse_config_file(path.as_ref())?,
        None => ReportSystemConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    config.validate().map_err(|e| {
        AttendanceError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<ReportSystemConfig> {
    if !path.exists() {
        return Err(AttendanceError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AttendanceError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    Ok(toml::from_str(&contents)?)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AttendanceError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AttendanceError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment overrides on top of file or default values
///
/// `lookup` resolves a variable name to its value; the loader passes the
/// process environment, tests pass a map.
///
/// # Errors
///
/// Returns a configuration error when a numeric or boolean override cannot
/// be parsed. A mistyped port must not silently fall back to a default.
pub fn apply_env_overrides<F>(config: &mut ReportSystemConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    // Attendance store
    if let Some(val) = lookup("DB_SERVER") {
        let (host, port) = split_host_port(&val)?;
        config.database.host = host;
        if let Some(port) = port {
            config.database.port = port;
        }
    }
    if let Some(val) = lookup("DB_PORT") {
        config.database.port = parse_value("DB_PORT", &val)?;
    }
    if let Some(val) = lookup("DB_NAME") {
        config.database.name = val;
    }
    if let Some(val) = lookup("DB_USERNAME") {
        config.database.username = val;
    }
    if let Some(val) = lookup("DB_PASSWORD") {
        config.database.password = secret_string(val);
    }
    if let Some(val) = lookup("DB_SSL_MODE") {
        config.database.ssl_mode = val.to_lowercase();
    }
    if let Some(val) = lookup("DB_CONNECT_TIMEOUT_SECONDS") {
        config.database.connect_timeout_seconds = parse_value("DB_CONNECT_TIMEOUT_SECONDS", &val)?;
    }
    if let Some(val) = lookup("REPORT_DEVICE_ID") {
        config.database.device_id = parse_value("REPORT_DEVICE_ID", &val)?;
    }

    // Mail
    if let Some(val) = lookup("EMAIL_FROM") {
        config.mail.from = Some(val);
    }
    if let Some(val) = lookup("EMAIL_PASSWORD") {
        config.mail.password = Some(secret_string(val));
    }
    if let Some(val) = lookup("EMAIL_TO") {
        config.mail.to = val;
    }
    if let Some(val) = lookup("SMTP_SERVER") {
        config.mail.smtp_server = val;
    }
    if let Some(val) = lookup("SMTP_PORT") {
        config.mail.smtp_port = parse_value("SMTP_PORT", &val)?;
    }
    if let Some(val) = lookup("SMTP_TIMEOUT_SECONDS") {
        config.mail.timeout_seconds = parse_value("SMTP_TIMEOUT_SECONDS", &val)?;
    }

    // Report artifact
    if let Some(val) = lookup("REPORT_OUTPUT_DIR") {
        config.report.output_dir = val;
    }
    if let Some(val) = lookup("REPORT_FILE_PREFIX") {
        config.report.file_prefix = val;
    }

    // Schedule
    if let Some(val) = lookup("SCHEDULE_DAILY_AT") {
        config.schedule.daily_at = val;
    }
    if let Some(val) = lookup("SCHEDULE_POLL_INTERVAL_SECONDS") {
        config.schedule.poll_interval_seconds =
            parse_value("SCHEDULE_POLL_INTERVAL_SECONDS", &val)?;
    }
    if let Some(val) = lookup("RUN_IMMEDIATELY") {
        config.schedule.run_immediately = parse_flag("RUN_IMMEDIATELY", &val)?;
    }

    // Logging
    if let Some(val) = lookup("LOG_LEVEL") {
        config.logging.level = val;
    }
    if let Some(val) = lookup("LOG_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_flag("LOG_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = lookup("LOG_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = lookup("LOG_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

/// Splits `host` or `host:port`
fn split_host_port(value: &str) -> Result<(String, Option<u16>)> {
    let value = value.trim();
    match value.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() => {
            let port = parse_value("DB_SERVER port", port)?;
            Ok((host.to_string(), Some(port)))
        }
        _ => Ok((value.to_string(), None)),
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        AttendanceError::Configuration(format!("Invalid value '{value}' for {name}: {e}"))
    })
}

/// Parses a boolean flag (true/false, 1/0, yes/no, on/off, case-insensitive)
fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(AttendanceError::Configuration(format!(
            "Invalid value '{value}' for {name}: expected true or false"
        ))),
    }
}
