//! Report pipeline
//!
//! [`ReportPipeline`] runs fetch, build, deliver and cleanup for one date and
//! reports the result as a [`RunSummary`].

pub mod orchestrator;
pub mod summary;

pub use orchestrator::ReportPipeline;
pub use summary::{RunOutcome, RunSummary};
