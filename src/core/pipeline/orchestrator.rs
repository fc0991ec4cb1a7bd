//! Report pipeline orchestration
//!
//! Sequences one run: fetch -> (empty? stop) -> build -> deliver -> cleanup.
//! Every stage failure ends the run with the matching `failed-*` outcome;
//! nothing here aborts the process.

use super::summary::{RunOutcome, RunSummary};
use crate::adapters::attendance::{AttendanceSource, PostgresAttendanceSource};
use crate::adapters::mail::{ReportMailer, SmtpMailer};
use crate::config::ReportSystemConfig;
use crate::core::report::{ReportArtifact, ReportBuilder};
use crate::core::schedule::DailyJob;
use crate::domain::{AttendanceError, AttendanceRecord, ReportDate, Result};
use crate::{log_run_start, log_stage_failure};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Daily attendance report pipeline
pub struct ReportPipeline {
    source: Arc<dyn AttendanceSource>,
    builder: ReportBuilder,
    mailer: Arc<dyn ReportMailer>,
}

impl ReportPipeline {
    /// Create a pipeline from its three collaborators
    pub fn new(
        source: Arc<dyn AttendanceSource>,
        builder: ReportBuilder,
        mailer: Arc<dyn ReportMailer>,
    ) -> Self {
        Self {
            source,
            builder,
            mailer,
        }
    }

    /// Wire the PostgreSQL source and SMTP mailer from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the ssl mode is unknown or the mail
    /// credentials are missing.
    pub fn from_config(config: &ReportSystemConfig) -> Result<Self> {
        let source = PostgresAttendanceSource::new(&config.database)?;
        let mailer = SmtpMailer::from_config(&config.mail, config.database.device_label())?;
        Ok(Self::new(
            Arc::new(source),
            ReportBuilder::from_config(&config.report),
            Arc::new(mailer),
        ))
    }

    /// Runs the pipeline for `date`, today when `None`
    ///
    /// Always returns a summary; the terminal state is in
    /// [`RunSummary::outcome`].
    pub async fn run(&self, date: Option<NaiveDate>) -> RunSummary {
        let run_id = Uuid::new_v4();
        let report_date = ReportDate::or_today(date);
        let started = Instant::now();
        log_run_start!(run_id, report_date);

        let (record_count, outcome, cleanup_warning) = self.execute(run_id, report_date).await;

        let summary = RunSummary {
            run_id,
            report_date,
            record_count,
            outcome,
            cleanup_warning,
            duration: started.elapsed(),
        };
        summary.log();
        summary
    }

    async fn execute(
        &self,
        run_id: Uuid,
        date: ReportDate,
    ) -> (usize, RunOutcome, Option<String>) {
        let records = match self.source.fetch(date).await {
            Ok(records) => records,
            Err(error) => {
                log_stage_failure!(run_id, "fetch", &error);
                return (0, RunOutcome::FailedFetch(error), None);
            }
        };

        let record_count = records.len();
        if records.is_empty() {
            tracing::info!(
                run_id = %run_id,
                report_date = %date,
                source = %self.source.describe(),
                "No attendance data found, nothing to send"
            );
            return (0, RunOutcome::CompletedEmpty, None);
        }
        tracing::info!(run_id = %run_id, records = record_count, "Attendance fetched");

        let artifact = match self.write_artifact(records, date).await {
            Ok(artifact) => artifact,
            Err(error) => {
                log_stage_failure!(run_id, "build", &error);
                return (record_count, RunOutcome::FailedBuild(error), None);
            }
        };

        if let Err(error) = self.mailer.deliver(&artifact.path, date).await {
            log_stage_failure!(run_id, "deliver", &error);
            return (
                record_count,
                RunOutcome::FailedDeliver { artifact, error },
                None,
            );
        }

        let cleanup_warning = remove_artifact(run_id, &artifact).await;
        (
            record_count,
            RunOutcome::CompletedDelivered { artifact },
            cleanup_warning,
        )
    }

    /// Writes the workbook on the blocking pool
    async fn write_artifact(
        &self,
        records: Vec<AttendanceRecord>,
        date: ReportDate,
    ) -> Result<ReportArtifact> {
        let builder = self.builder.clone();
        tokio::task::spawn_blocking(move || builder.build(&records, date))
            .await
            .map_err(|e| AttendanceError::ArtifactWrite(format!("Report writer task failed: {e}")))?
    }
}

/// Deletes a delivered artifact, returning a warning instead of failing
async fn remove_artifact(run_id: Uuid, artifact: &ReportArtifact) -> Option<String> {
    match tokio::fs::remove_file(&artifact.path).await {
        Ok(()) => {
            tracing::debug!(run_id = %run_id, path = %artifact.path.display(), "Artifact removed");
            None
        }
        Err(e) => {
            let warning = format!("Failed to remove {}: {}", artifact.path.display(), e);
            tracing::warn!(run_id = %run_id, warning = %warning, "Artifact cleanup failed");
            Some(warning)
        }
    }
}

#[async_trait]
impl DailyJob for ReportPipeline {
    async fn fire(&self) {
        self.run(None).await;
    }
}
