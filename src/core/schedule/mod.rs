//! Daily scheduling
//!
//! - [`DailyTime`] / [`DailyTrigger`] - when the job is due
//! - [`DailyScheduler`] - cooperative poll loop that fires a [`DailyJob`]

pub mod daily;
pub mod runner;

pub use daily::{Clock, DailyTime, DailyTrigger, LocalClock};
pub use runner::{DailyJob, DailyScheduler};
