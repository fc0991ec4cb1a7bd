//! Report delivery abstraction

use crate::domain::{ReportDate, Result};
use async_trait::async_trait;
use std::path::Path;

/// Sends a finished report artifact to its recipient
#[async_trait]
pub trait ReportMailer: Send + Sync {
    /// Mails the artifact at `artifact` as an attachment
    ///
    /// The artifact is only read; deleting it is the caller's decision.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AttendanceError::Delivery`] on any composition,
    /// connection, authentication or send failure.
    async fn deliver(&self, artifact: &Path, date: ReportDate) -> Result<()>;
}
