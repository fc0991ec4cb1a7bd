//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap. Without a
//! subcommand the binary runs the daily scheduler.

pub mod commands;

use crate::config::ReportSystemConfig;
use clap::{Parser, Subcommand};

/// Daily attendance report: fetch, build, mail, repeat
#[derive(Parser, Debug)]
#[command(name = "attendance-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Optional TOML configuration file; environment variables override it
    #[arg(short, long, env = "ATTENDANCE_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute (default: schedule)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The requested command, `schedule` when none was given
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Schedule(commands::schedule::ScheduleArgs {}))
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the report every day at the configured time
    Schedule(commands::schedule::ScheduleArgs),

    /// Run the report once and exit
    Run(commands::run::RunArgs),

    /// Check store connectivity, query retrieval and report generation
    Check(commands::check::CheckArgs),

    /// Validate configuration and print a redacted summary
    ValidateConfig(commands::validate::ValidateArgs),
}

impl Commands {
    /// True for commands that send mail and therefore need mail credentials
    pub fn requires_delivery(&self) -> bool {
        matches!(self, Commands::Schedule(_) | Commands::Run(_))
    }

    /// Checks settings this command needs that `load_config` leaves optional
    ///
    /// # Errors
    ///
    /// Returns a message naming the missing mail setting when the command
    /// sends mail.
    pub fn preflight(&self, config: &ReportSystemConfig) -> Result<(), String> {
        if self.requires_delivery() {
            config.mail.validate_for_delivery()?;
        }
        Ok(())
    }
}
