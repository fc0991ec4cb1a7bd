//! Check command implementation
//!
//! Diagnostic entry point for automated health checks: prints one line per
//! check and exits non-zero if any failed. Needs no mail credentials.

use super::{EXIT_CONFIG, EXIT_FAILED, EXIT_OK};
use crate::adapters::attendance::PostgresAttendanceSource;
use crate::config::ReportSystemConfig;
use crate::core::diagnostics::run_diagnostics;
use crate::core::report::ReportBuilder;
use crate::domain::ReportDate;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the check command
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Date to query (YYYY-MM-DD), today if omitted
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self, config: &ReportSystemConfig) -> anyhow::Result<i32> {
        let source = match PostgresAttendanceSource::new(&config.database) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };
        let builder = ReportBuilder::from_config(&config.report);

        let report = run_diagnostics(&source, &builder, ReportDate::or_today(self.date)).await;
        print!("{}", report.render());

        Ok(if report.all_passed() {
            EXIT_OK
        } else {
            EXIT_FAILED
        })
    }
}
