//! Daily trigger arithmetic in local wall-clock time

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

/// Time of day a daily job fires, minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTime {
    hour: u32,
    minute: u32,
}

impl DailyTime {
    /// Creates a daily time
    ///
    /// # Errors
    ///
    /// Returns an error unless `hour < 24` and `minute < 60`
    pub fn new(hour: u32, minute: u32) -> Result<Self, String> {
        if hour > 23 || minute > 59 {
            return Err(format!(
                "time out of range: {hour:02}:{minute:02} (expected 00:00 to 23:59)"
            ));
        }
        Ok(Self { hour, minute })
    }

    fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// First occurrence of this time strictly after `after`
    pub fn next_after(&self, after: NaiveDateTime) -> NaiveDateTime {
        let candidate = after.date().and_time(self.as_naive_time());
        if candidate > after {
            candidate
        } else {
            candidate + Duration::days(1)
        }
    }
}

impl fmt::Display for DailyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for DailyTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("invalid time '{s}', expected HH:MM"))?;
        if minute.len() != 2 {
            return Err(format!("invalid time '{s}', expected HH:MM"));
        }
        let hour = hour
            .parse::<u32>()
            .map_err(|_| format!("invalid hour in '{s}'"))?;
        let minute = minute
            .parse::<u32>()
            .map_err(|_| format!("invalid minute in '{s}'"))?;
        Self::new(hour, minute)
    }
}

/// Source of the current local wall-clock time
pub trait Clock: Send + Sync {
    /// Current local time without zone
    fn now(&self) -> NaiveDateTime;
}

/// System clock in the process's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Armed daily trigger
///
/// Holds the next due instant. Polling at or after that instant reports the
/// trigger as due exactly once and re-arms it for the next day's occurrence
/// after the poll time, so days that passed while the process was busy or
/// suspended are not replayed.
#[derive(Debug, Clone)]
pub struct DailyTrigger {
    at: DailyTime,
    next_run: NaiveDateTime,
}

impl DailyTrigger {
    /// Arms a trigger for the first occurrence of `at` strictly after `now`
    pub fn new(at: DailyTime, now: NaiveDateTime) -> Self {
        Self {
            at,
            next_run: at.next_after(now),
        }
    }

    /// Next due instant
    pub fn next_run(&self) -> NaiveDateTime {
        self.next_run
    }

    /// Returns true if the trigger is due at `now`, re-arming it if so
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        if now < self.next_run {
            return false;
        }
        self.next_run = self.at.next_after(now);
        true
    }
}
