//! Evaluation logic for the attendance client.
//!
//! This module contains the pure computations the client performs: classifying
//! check-ins and check-outs against the working schedule, and ordering,
//! categorizing and filtering the holiday calendar. Nothing here performs I/O
//! or reads the clock.

mod attendance_status;
mod holiday_schedule;

pub use attendance_status::{evaluate, evaluate_event};
pub use holiday_schedule::{categorize, filter_holidays, holiday_on, schedule, sort_holidays};
