//! Attendance status classification.
//!
//! This module classifies a check-in or check-out against the configured
//! working schedule. Boundaries are anchored to the calendar date of the
//! action itself, and an action exactly on a boundary falls in the better
//! bucket.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

use crate::config::AttendanceConfig;
use crate::models::{ActionKind, AttendanceEvent, AttendanceOutcome, AttendanceVerdict};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Classifies an attendance action against the working schedule.
///
/// The caller supplies `now` as the instant the action was recorded; the
/// function never reads the clock.
///
/// # Arguments
///
/// * `action` - Check-in or check-out
/// * `now` - Local wall-clock time of the action
/// * `config` - The working schedule; `work_start` must be before `work_end`
///
/// # Returns
///
/// An [`AttendanceVerdict`]:
/// - Check-in at or before work start: [`AttendanceOutcome::OnTime`]
/// - Check-in up to `late_threshold_minutes` after start: [`AttendanceOutcome::Late`]
/// - Any later check-in: [`AttendanceOutcome::VeryLate`]
/// - Check-out at or after work end: [`AttendanceOutcome::OnTimeCheckout`]
/// - Earlier check-out: [`AttendanceOutcome::EarlyCheckout`]
///
/// Minute counts are rounded to the nearest minute, halves rounding up.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::AttendanceConfig;
/// use attendance_engine::evaluation::evaluate;
/// use attendance_engine::models::{ActionKind, Severity};
/// use chrono::NaiveDateTime;
///
/// let config = AttendanceConfig::default(); // 08:00-17:00, 15 minute grace
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
///
/// let verdict = evaluate(ActionKind::CheckIn, at("2025-01-06 08:10"), &config);
/// assert_eq!(verdict.severity, Severity::Warning);
/// assert_eq!(verdict.minutes_late(), Some(10));
/// assert_eq!(verdict.status_label, "late by 10 minutes");
///
/// let verdict = evaluate(ActionKind::CheckOut, at("2025-01-06 16:45"), &config);
/// assert_eq!(verdict.severity, Severity::Warning);
/// assert_eq!(verdict.minutes_early(), Some(15));
/// ```
pub fn evaluate(
    action: ActionKind,
    now: NaiveDateTime,
    config: &AttendanceConfig,
) -> AttendanceVerdict {
    match action {
        ActionKind::CheckIn => evaluate_check_in(now, config),
        ActionKind::CheckOut => evaluate_check_out(now, config),
    }
}

/// Classifies a recorded [`AttendanceEvent`].
///
/// Equivalent to `evaluate(event.action, event.timestamp, config)`.
pub fn evaluate_event(event: &AttendanceEvent, config: &AttendanceConfig) -> AttendanceVerdict {
    evaluate(event.action, event.timestamp, config)
}

fn evaluate_check_in(now: NaiveDateTime, config: &AttendanceConfig) -> AttendanceVerdict {
    let work_start = now.date().and_time(config.work_start);
    // Past the end of the calendar the grace period never runs out.
    let grace = TimeDelta::minutes(i64::from(config.late_threshold_minutes));
    let late_threshold = work_start.checked_add_signed(grace);
    let detail = detail_line("Check-in", now, config.work_start);

    if now <= work_start {
        return verdict(
            AttendanceOutcome::OnTime,
            "on time".to_string(),
            "Checked in on time".to_string(),
            detail,
        );
    }

    let minutes = rounded_minutes(now - work_start);
    let message = format!("Checked in {} minutes late", minutes);

    if late_threshold.is_none_or(|threshold| now <= threshold) {
        verdict(
            AttendanceOutcome::Late { minutes },
            format!("late by {} minutes", minutes),
            message,
            detail,
        )
    } else {
        verdict(
            AttendanceOutcome::VeryLate { minutes },
            format!("very late by {} minutes", minutes),
            message,
            detail,
        )
    }
}

fn evaluate_check_out(now: NaiveDateTime, config: &AttendanceConfig) -> AttendanceVerdict {
    let work_end = now.date().and_time(config.work_end);
    let detail = detail_line("Check-out", now, config.work_end);

    if now >= work_end {
        return verdict(
            AttendanceOutcome::OnTimeCheckout,
            "on time checkout".to_string(),
            "Checked out on time".to_string(),
            detail,
        );
    }

    let minutes = rounded_minutes(work_end - now);
    verdict(
        AttendanceOutcome::EarlyCheckout { minutes },
        format!("early by {} minutes", minutes),
        format!("Checked out {} minutes early", minutes),
        detail,
    )
}

fn verdict(
    outcome: AttendanceOutcome,
    status_label: String,
    message: String,
    detail: String,
) -> AttendanceVerdict {
    AttendanceVerdict {
        outcome,
        severity: outcome.severity(),
        status_label,
        message,
        detail,
    }
}

fn detail_line(prefix: &str, now: NaiveDateTime, scheduled: NaiveTime) -> String {
    format!(
        "{} time: {} (scheduled: {})",
        prefix,
        now.format("%H:%M"),
        scheduled.format("%H:%M")
    )
}

/// Rounds a duration to whole minutes, halves rounding up.
fn rounded_minutes(delta: TimeDelta) -> i64 {
    (delta.num_milliseconds() + MILLIS_PER_MINUTE / 2).div_euclid(MILLIS_PER_MINUTE)
}
