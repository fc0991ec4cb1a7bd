//! Run command implementation
//!
//! One pipeline run for a single date, then exit.

use super::{EXIT_CONFIG, EXIT_FAILED, EXIT_OK};
use crate::config::ReportSystemConfig;
use crate::core::pipeline::{ReportPipeline, RunSummary};
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Report date (YYYY-MM-DD), today if omitted
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config: &ReportSystemConfig) -> anyhow::Result<i32> {
        let pipeline = match ReportPipeline::from_config(config) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                tracing::error!(error = %e, "Cannot start report run");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let summary = pipeline.run(self.date).await;
        print_summary(&summary);

        Ok(if summary.is_success() {
            EXIT_OK
        } else {
            EXIT_FAILED
        })
    }
}

fn print_summary(summary: &RunSummary) {
    let mark = if summary.is_success() { "✅" } else { "❌" };
    println!("{mark} Report run {}: {}", summary.report_date, summary.outcome);
    println!("  Run ID: {}", summary.run_id);
    println!("  Records: {}", summary.record_count);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    if let Some(error) = summary.outcome.error() {
        println!("  Error: {error}");
    }
    if let Some(path) = summary.retained_artifact() {
        println!("  Artifact kept at: {}", path.display());
    }
    if let Some(warning) = &summary.cleanup_warning {
        println!("  Warning: {warning}");
    }
}
