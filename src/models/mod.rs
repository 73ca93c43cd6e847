//! Core data models for the attendance client.
//!
//! This module contains all the domain models used throughout the crate.

mod attendance;
mod employee;
mod holiday;
mod location;
mod request;

pub use attendance::{ActionKind, AttendanceEvent, AttendanceOutcome, AttendanceVerdict, Severity};
pub use employee::Employee;
pub use holiday::{HolidayCategory, HolidayFilter, HolidayRecord, ScheduledHoliday};
pub use location::GeoPosition;
pub use request::{LeaveRequest, LeaveType, OvertimeRequest};
