//! Attendance records
//!
//! One [`AttendanceRecord`] per employee per report day, keyed by
//! [`EmployeeCode`].

use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Format used whenever a first-IN timestamp is rendered as text
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Employee code newtype wrapper
///
/// The unique key of an employee in the attendance store.
///
/// # Examples
///
/// ```
/// use attendance_report::domain::EmployeeCode;
/// use std::str::FromStr;
///
/// let code = EmployeeCode::from_str("E001").unwrap();
/// assert_eq!(code.as_str(), "E001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmployeeCode(String);

impl EmployeeCode {
    /// Creates a new EmployeeCode, trimming surrounding whitespace
    ///
    /// Fixed-width `CHAR` columns pad codes with trailing spaces, so the
    /// trimmed value is the key.
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err("Employee code cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the employee code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for EmployeeCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// First-IN attendance of one employee on one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    /// Employee code (unique within a report)
    pub employee_code: EmployeeCode,

    /// Employee display name
    pub employee_name: String,

    /// Department, when the employee has one
    pub department: Option<String>,

    /// Earliest IN event of the day, absent if no IN event matched
    pub first_in: Option<NaiveDateTime>,

    /// Name of the terminal that captured the event
    pub device_name: String,
}

impl AttendanceRecord {
    /// Creates a record with all fields
    pub fn new(
        employee_code: EmployeeCode,
        employee_name: impl Into<String>,
        department: Option<String>,
        first_in: Option<NaiveDateTime>,
        device_name: impl Into<String>,
    ) -> Self {
        Self {
            employee_code,
            employee_name: employee_name.into(),
            department,
            first_in,
            device_name: device_name.into(),
        }
    }

    /// First-IN timestamp rendered as `YYYY-MM-DD HH:MM:SS`, empty when absent
    pub fn first_in_display(&self) -> String {
        self.first_in
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// Collapses records to one per employee code, keeping the earliest first-IN
///
/// The store query already groups per employee; this guards the uniqueness of
/// employee codes when the employee table holds duplicate rows. The result is
/// ordered by employee code ascending. Returns the collapsed records together
/// with the number of rows that were merged away.
pub fn collapse_to_first_in(records: Vec<AttendanceRecord>) -> (Vec<AttendanceRecord>, usize) {
    let total = records.len();
    let mut by_code: BTreeMap<EmployeeCode, AttendanceRecord> = BTreeMap::new();

    for record in records {
        match by_code.get_mut(&record.employee_code) {
            Some(existing) => {
                let earlier = match (existing.first_in, record.first_in) {
                    (Some(kept), Some(candidate)) => candidate < kept,
                    (None, Some(_)) => true,
                    _ => false,
                };
                if earlier {
                    *existing = record;
                }
            }
            None => {
                by_code.insert(record.employee_code.clone(), record);
            }
        }
    }

    let collapsed: Vec<AttendanceRecord> = by_code.into_values().collect();
    let merged = total - collapsed.len();
    (collapsed, merged)
}
