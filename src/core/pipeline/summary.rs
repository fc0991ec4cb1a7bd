//! Run outcome and summary
//!
//! A report run never returns an error to its caller: how far it got is
//! recorded as a [`RunOutcome`] inside a [`RunSummary`].

use crate::core::report::ReportArtifact;
use crate::domain::{AttendanceError, ReportDate};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Terminal state of one report run
#[derive(Debug)]
pub enum RunOutcome {
    /// No matching attendance; nothing written or sent
    CompletedEmpty,

    /// Report mailed; the artifact was removed afterwards
    CompletedDelivered {
        /// Artifact that was delivered
        artifact: ReportArtifact,
    },

    /// Store unreachable or query failed
    FailedFetch(AttendanceError),

    /// Report file could not be written
    FailedBuild(AttendanceError),

    /// Report written but not delivered; the artifact stays on disk
    FailedDeliver {
        /// Artifact retained for a manual resend
        artifact: ReportArtifact,
        /// Delivery failure
        error: AttendanceError,
    },
}

impl RunOutcome {
    /// Stable name of the terminal state
    pub fn name(&self) -> &'static str {
        match self {
            RunOutcome::CompletedEmpty => "completed-empty",
            RunOutcome::CompletedDelivered { .. } => "completed-delivered",
            RunOutcome::FailedFetch(_) => "failed-fetch",
            RunOutcome::FailedBuild(_) => "failed-build",
            RunOutcome::FailedDeliver { .. } => "failed-deliver",
        }
    }

    /// True for the `completed-*` states
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            RunOutcome::CompletedEmpty | RunOutcome::CompletedDelivered { .. }
        )
    }

    /// Error that ended the run, if it failed
    pub fn error(&self) -> Option<&AttendanceError> {
        match self {
            RunOutcome::FailedFetch(error) | RunOutcome::FailedBuild(error) => Some(error),
            RunOutcome::FailedDeliver { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Artifact produced by the run, if any
    pub fn artifact(&self) -> Option<&ReportArtifact> {
        match self {
            RunOutcome::CompletedDelivered { artifact }
            | RunOutcome::FailedDeliver { artifact, .. } => Some(artifact),
            _ => None,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Summary of one report run
#[derive(Debug)]
pub struct RunSummary {
    /// Correlates the log lines of one run
    pub run_id: Uuid,

    /// Day the run covered
    pub report_date: ReportDate,

    /// Records fetched (0 when the fetch failed)
    pub record_count: usize,

    /// Terminal state
    pub outcome: RunOutcome,

    /// Set when the delivered artifact could not be removed
    pub cleanup_warning: Option<String>,

    /// Wall time of the run
    pub duration: Duration,
}

impl RunSummary {
    /// True for the `completed-*` states
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Path of an artifact still on disk after the run
    ///
    /// Only a failed delivery, or a delivered artifact whose removal failed,
    /// leaves one behind.
    pub fn retained_artifact(&self) -> Option<PathBuf> {
        match &self.outcome {
            RunOutcome::FailedDeliver { artifact, .. } => Some(artifact.path.clone()),
            RunOutcome::CompletedDelivered { artifact } if self.cleanup_warning.is_some() => {
                Some(artifact.path.clone())
            }
            _ => None,
        }
    }

    /// Emits the terminal log line of the run
    pub fn log(&self) {
        crate::log_run_complete!(
            self.run_id,
            self.outcome.name(),
            self.record_count,
            self.duration
        );
        if let Some(path) = self.retained_artifact() {
            tracing::warn!(
                run_id = %self.run_id,
                path = %path.display(),
                "Report artifact retained on disk"
            );
        }
    }
}
