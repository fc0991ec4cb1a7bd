//! Validate config command implementation
//!
//! Configuration is loaded and validated before any command runs, so this
//! command only reports what was loaded. Secrets are never printed.

use super::EXIT_OK;
use crate::config::ReportSystemConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(
        &self,
        config: &ReportSystemConfig,
        config_path: Option<&str>,
    ) -> anyhow::Result<i32> {
        println!(
            "🔍 Configuration source: {}",
            config_path.unwrap_or("environment only")
        );
        println!("✅ Configuration is valid");
        println!();
        for line in summary_lines(config) {
            println!("  {line}");
        }

        if let Err(e) = config.mail.validate_for_delivery() {
            println!();
            println!("⚠️  {e}; schedule and run will refuse to start");
        }
        println!();
        Ok(EXIT_OK)
    }
}

fn summary_lines(config: &ReportSystemConfig) -> Vec<String> {
    let set_or_missing = |present: bool| if present { "set" } else { "missing" };

    vec![
        format!("Database: {}", config.database.endpoint_display()),
        format!("Database User: {}", config.database.username),
        format!("Database TLS: {}", config.database.ssl_mode),
        format!("Device: {}", config.database.device_label()),
        format!(
            "Sender: {}",
            config.mail.from.as_deref().unwrap_or("(missing)")
        ),
        format!(
            "Sender Password: {}",
            set_or_missing(config.mail.password.is_some())
        ),
        format!("Recipient: {}", config.mail.to),
        format!(
            "SMTP Relay: {}:{}",
            config.mail.smtp_server, config.mail.smtp_port
        ),
        format!("Output Directory: {}", config.report.output_dir),
        format!("File Prefix: {}", config.report.file_prefix),
        format!("Daily At: {}", config.schedule.daily_at),
        format!("Run Immediately: {}", config.schedule.run_immediately),
        format!("Log Level: {}", config.logging.level),
    ]
}
