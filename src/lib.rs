// Attendance Report - Daily first-IN attendance report mailer
// Copyright (c) 2025 Attendance Report Contributors
// Licensed under the MIT License

//! # Attendance Report
//!
//! Builds a daily attendance spreadsheet from the first IN event of every
//! employee on one attendance terminal, mails it, and deletes it again.
//!
//! ## Overview
//!
//! - **Fetch** first-IN timestamps for a date from the attendance store
//! - **Build** `Daily_Attendance_YYYYMMDD.xlsx` with a data and a summary sheet
//! - **Deliver** the file as an email attachment over SMTP
//! - **Schedule** the run once a day at a fixed local time
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface (`schedule`, `run`, `check`, `validate-config`)
//! - [`core`] - Report builder, pipeline, scheduler, diagnostics
//! - [`adapters`] - Attendance store and mail relay integrations
//! - [`domain`] - Records, dates and the error taxonomy
//! - [`config`] - Configuration loading and validation
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use attendance_report::config::load_config;
//! use attendance_report::core::pipeline::ReportPipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(Some("attendance.toml"))?;
//!     let pipeline = ReportPipeline::from_config(&config)?;
//!
//!     let summary = pipeline.run(None).await;
//!     println!("{} ({} records)", summary.outcome, summary.record_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`] with an
//! [`domain::AttendanceError`]. A report run itself does not fail: its
//! terminal state is a [`core::pipeline::RunOutcome`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
