//! Schedule command implementation
//!
//! The long-running mode: fires the report pipeline once a day until SIGINT
//! or SIGTERM.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::ReportSystemConfig;
use crate::core::pipeline::ReportPipeline;
use crate::core::schedule::DailyScheduler;
use clap::Args;
use std::time::Duration;
use tokio::sync::watch;

/// Arguments for the schedule command
#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {}

impl ScheduleArgs {
    /// Execute the schedule command
    pub async fn execute(
        &self,
        config: &ReportSystemConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let pipeline = match ReportPipeline::from_config(config) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                tracing::error!(error = %e, "Cannot start scheduler");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let daily_at = match config.schedule.daily_time() {
            Ok(at) => at,
            Err(e) => {
                eprintln!("❌ Invalid schedule.daily_at: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("Attendance report scheduler started");
        println!("  Daily at: {daily_at}");
        println!("  Recipient: {}", config.mail.to);
        println!("  Source: {}", config.database.endpoint_display());
        println!("  Run immediately: {}", config.schedule.run_immediately);

        let scheduler = DailyScheduler::new(
            daily_at,
            Duration::from_secs(config.schedule.poll_interval_seconds),
            config.schedule.run_immediately,
        );
        scheduler.run(&pipeline, shutdown_signal).await;

        println!("Scheduler stopped");
        Ok(EXIT_OK)
    }
}
