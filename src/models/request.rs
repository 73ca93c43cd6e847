//! Overtime and leave request models.
//!
//! Both requests are validated client-side before they are sent; the
//! remote sheet stores whatever it receives.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AttendanceError, AttendanceResult};

/// A request to work overtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// The day the overtime is for.
    pub date: NaiveDate,
    /// Requested time, as entered (e.g. "17:00-20:00" or "3 hours").
    pub time: String,
    /// Why the overtime is needed.
    pub reason: String,
}

impl OvertimeRequest {
    /// Checks that the free-text fields are filled in.
    pub fn validate(&self) -> AttendanceResult<()> {
        require_text("time", &self.time)?;
        require_text("reason", &self.reason)
    }
}

/// The kind of leave being requested.
///
/// Serialized with the labels the remote sheet stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    /// Sick leave.
    #[serde(rename = "ลาป่วย")]
    Sick,
    /// Personal business leave.
    #[serde(rename = "ลากิจ")]
    Personal,
    /// Annual vacation leave.
    #[serde(rename = "ลาพักร้อน")]
    Annual,
}

impl LeaveType {
    /// The label the remote sheet records for this leave type.
    pub fn wire_label(self) -> &'static str {
        match self {
            LeaveType::Sick => "ลาป่วย",
            LeaveType::Personal => "ลากิจ",
            LeaveType::Annual => "ลาพักร้อน",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveType::Sick => write!(f, "sick"),
            LeaveType::Personal => write!(f, "personal"),
            LeaveType::Annual => write!(f, "annual"),
        }
    }
}

impl FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sick" | "ลาป่วย" => Ok(LeaveType::Sick),
            "personal" | "ลากิจ" => Ok(LeaveType::Personal),
            "annual" | "vacation" | "ลาพักร้อน" => Ok(LeaveType::Annual),
            other => Err(format!("unknown leave type '{}'", other)),
        }
    }
}

/// A request for leave over an inclusive date range.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{LeaveRequest, LeaveType};
/// use chrono::NaiveDate;
///
/// let request = LeaveRequest {
///     leave_type: LeaveType::Personal,
///     start_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
///     reason: "Moving house".to_string(),
/// };
/// assert!(request.validate().is_ok());
/// assert_eq!(request.days(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Why the leave is needed.
    pub reason: String,
}

impl LeaveRequest {
    /// Checks the date range and reason.
    pub fn validate(&self) -> AttendanceResult<()> {
        if self.end_date < self.start_date {
            return Err(AttendanceError::invalid(
                "end_date",
                format!(
                    "{} is before start_date {}",
                    self.end_date, self.start_date
                ),
            ));
        }
        require_text("reason", &self.reason)
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

fn require_text(field: &str, value: &str) -> AttendanceResult<()> {
    if value.trim().is_empty() {
        return Err(AttendanceError::invalid(field, "must not be empty"));
    }
    Ok(())
}
