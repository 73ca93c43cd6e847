//! Attendance action and verdict models.
//!
//! This module defines the input ([`AttendanceEvent`]) and output
//! ([`AttendanceVerdict`]) of attendance evaluation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The kind of attendance action an employee records.
///
/// Serialized with the labels the remote attendance sheet stores.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ActionKind;
///
/// let action: ActionKind = "check-in".parse().unwrap();
/// assert_eq!(action, ActionKind::CheckIn);
/// assert_eq!(action.to_string(), "check-in");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Arriving at work.
    #[serde(rename = "เข้างาน")]
    CheckIn,
    /// Leaving work.
    #[serde(rename = "ออกงาน")]
    CheckOut,
}

impl ActionKind {
    /// The label the remote sheet records for this action.
    pub fn wire_label(self) -> &'static str {
        match self {
            ActionKind::CheckIn => "เข้างาน",
            ActionKind::CheckOut => "ออกงาน",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::CheckIn => write!(f, "check-in"),
            ActionKind::CheckOut => write!(f, "check-out"),
        }
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "check-in" | "checkin" | "in" | "เข้างาน" => Ok(ActionKind::CheckIn),
            "check-out" | "checkout" | "out" | "ออกงาน" => Ok(ActionKind::CheckOut),
            other => Err(format!("unknown attendance action '{}'", other)),
        }
    }
}

/// A single check-in or check-out at a wall-clock instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// What the employee did.
    pub action: ActionKind,
    /// When they did it, in local wall-clock time.
    pub timestamp: NaiveDateTime,
}

impl AttendanceEvent {
    /// Creates an event.
    pub fn new(action: ActionKind, timestamp: NaiveDateTime) -> Self {
        Self { action, timestamp }
    }
}

/// How an outcome should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing to flag.
    Success,
    /// Minor deviation from the schedule.
    Warning,
    /// Serious deviation from the schedule.
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger => write!(f, "danger"),
        }
    }
}

/// The classification of an attendance action against the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttendanceOutcome {
    /// Checked in at or before work start.
    OnTime,
    /// Checked in within the grace period.
    Late {
        /// Rounded minutes after work start.
        minutes: i64,
    },
    /// Checked in after the grace period.
    VeryLate {
        /// Rounded minutes after work start.
        minutes: i64,
    },
    /// Checked out at or after work end.
    OnTimeCheckout,
    /// Checked out before work end.
    EarlyCheckout {
        /// Rounded minutes before work end.
        minutes: i64,
    },
}

impl AttendanceOutcome {
    /// The severity the outcome is presented with.
    pub fn severity(self) -> Severity {
        match self {
            AttendanceOutcome::OnTime | AttendanceOutcome::OnTimeCheckout => Severity::Success,
            AttendanceOutcome::Late { .. } | AttendanceOutcome::EarlyCheckout { .. } => {
                Severity::Warning
            }
            AttendanceOutcome::VeryLate { .. } => Severity::Danger,
        }
    }
}

/// The result of evaluating an [`AttendanceEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceVerdict {
    /// Typed classification.
    pub outcome: AttendanceOutcome,
    /// Presentation severity.
    pub severity: Severity,
    /// Short status, e.g. "late by 10 minutes".
    pub status_label: String,
    /// Sentence for the employee.
    pub message: String,
    /// Recorded clock time next to the scheduled boundary, for audit display.
    pub detail: String,
}

impl AttendanceVerdict {
    /// Minutes late for a late check-in, `None` otherwise.
    pub fn minutes_late(&self) -> Option<i64> {
        match self.outcome {
            AttendanceOutcome::Late { minutes } | AttendanceOutcome::VeryLate { minutes } => {
                Some(minutes)
            }
            _ => None,
        }
    }

    /// Minutes early for an early check-out, `None` otherwise.
    pub fn minutes_early(&self) -> Option<i64> {
        match self.outcome {
            AttendanceOutcome::EarlyCheckout { minutes } => Some(minutes),
            _ => None,
        }
    }
}
