//! Report target date

use chrono::{Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Calendar day a report run covers
///
/// Drives the query filter, the artifact file name (`YYYYMMDD`) and the
/// message text (`YYYY-MM-DD`).
///
/// # Examples
///
/// ```
/// use attendance_report::domain::ReportDate;
/// use std::str::FromStr;
///
/// let date = ReportDate::from_str("2024-03-01").unwrap();
/// assert_eq!(date.compact(), "20240301");
/// assert_eq!(date.to_string(), "2024-03-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// Wraps a calendar date
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today in the local time zone
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Resolves an optional explicit date, defaulting to today
    pub fn or_today(date: Option<NaiveDate>) -> Self {
        date.map(Self).unwrap_or_else(Self::today)
    }

    /// Underlying calendar date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `YYYYMMDD`, used in artifact file names
    pub fn compact(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for ReportDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| format!("Invalid date '{s}', expected YYYY-MM-DD: {e}"))
    }
}

impl From<NaiveDate> for ReportDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
