//! Core business logic
//!
//! # Modules
//!
//! - [`report`] - spreadsheet generation
//! - [`pipeline`] - one report run: fetch, build, deliver, cleanup
//! - [`schedule`] - daily trigger and scheduler loop
//! - [`diagnostics`] - health checks for the `check` command
//!
//! # Run workflow
//!
//! 1. **Fetch**: first IN event per employee for the target date
//! 2. **Check empty**: no rows ends the run as `completed-empty`
//! 3. **Build**: write `Daily_Attendance_YYYYMMDD.xlsx`
//! 4. **Deliver**: mail the file as an attachment
//! 5. **Cleanup**: delete the file once it was sent
//!
//! # Example
//!
//! ```rust,no_run
//! use attendance_report::config::load_config;
//! use attendance_report::core::pipeline::ReportPipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None::<&str>)?;
//! let pipeline = ReportPipeline::from_config(&config)?;
//!
//! let summary = pipeline.run(None).await;
//! println!("{}: {} records", summary.outcome, summary.record_count);
//! # Ok(())
//! # }
//! ```

pub mod diagnostics;
pub mod pipeline;
pub mod report;
pub mod schedule;
