//! Daily scheduler loop

use super::daily::{Clock, DailyTime, DailyTrigger, LocalClock};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Work fired by the scheduler
///
/// `fire` handles its own failures; the scheduler only sequences invocations.
#[async_trait]
pub trait DailyJob: Send + Sync {
    /// Executes one invocation to completion
    async fn fire(&self);
}

/// Fires a [`DailyJob`] once a day at a fixed local time
///
/// The job is awaited inside the poll loop, so two invocations never overlap:
/// the next poll happens only after the current invocation returns.
pub struct DailyScheduler {
    at: DailyTime,
    poll_interval: Duration,
    run_immediately: bool,
    clock: Arc<dyn Clock>,
}

impl DailyScheduler {
    /// Create a scheduler on the local system clock
    pub fn new(at: DailyTime, poll_interval: Duration, run_immediately: bool) -> Self {
        Self::with_clock(at, poll_interval, run_immediately, Arc::new(LocalClock))
    }

    /// Create a scheduler on a custom clock
    pub fn with_clock(
        at: DailyTime,
        poll_interval: Duration,
        run_immediately: bool,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            at,
            poll_interval,
            run_immediately,
            clock,
        }
    }

    /// Runs until `shutdown` broadcasts `true` or its sender is dropped
    ///
    /// A shutdown signal received while the job is running takes effect once
    /// the job returns.
    pub async fn run(&self, job: &dyn DailyJob, mut shutdown: watch::Receiver<bool>) {
        let mut trigger = DailyTrigger::new(self.at, self.clock.now());
        info!(
            daily_at = %self.at,
            next_run = %trigger.next_run(),
            poll_interval_secs = self.poll_interval.as_secs_f64(),
            "Scheduler started"
        );

        if self.run_immediately {
            info!("Running job immediately at startup");
            job.fire().await;
        }

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = interval.tick() => {
                    let now = self.clock.now();
                    if trigger.poll(now) {
                        info!(fired_at = %now, "Daily trigger due");
                        job.fire().await;
                        info!(next_run = %trigger.next_run(), "Next run scheduled");
                    } else {
                        debug!(next_run = %trigger.next_run(), "No trigger due");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!("Scheduler stopped");
    }
}
