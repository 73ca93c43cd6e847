//! Response types returned by the remote attendance sheet.
//!
//! Every response is a JSON object with a `success` flag. This module turns
//! those envelopes into typed results so that nothing past the API boundary
//! inspects the flag.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{Employee, HolidayRecord};

use super::request::RemoteAction;

/// Common shape of every endpoint reply.
pub trait Envelope {
    /// Whether the endpoint accepted the request.
    fn success(&self) -> bool;
    /// Optional explanation supplied by the endpoint.
    fn message(&self) -> Option<&str>;
}

/// Accepts an envelope reporting success, or converts it into
/// [`AttendanceError::Rejected`].
pub fn accept<T: Envelope>(action: RemoteAction, envelope: T) -> AttendanceResult<T> {
    if envelope.success() {
        return Ok(envelope);
    }

    let reason = envelope
        .message()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or("request was not accepted")
        .to_string();

    Err(AttendanceError::Rejected {
        action: action.as_str().to_string(),
        reason,
    })
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Envelope for $ty {
                fn success(&self) -> bool {
                    self.success
                }

                fn message(&self) -> Option<&str> {
                    self.message.as_deref()
                }
            }
        )*
    };
}

/// Reply to `login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Whether the employee ID is known.
    pub success: bool,
    /// Display name of the employee.
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Explanation on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Resolves the reply into the logged-in employee.
    pub fn into_employee(self, employee_id: &str) -> AttendanceResult<Employee> {
        let action = RemoteAction::Login;
        let reply = accept(action, self)?;
        let name = reply
            .employee_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AttendanceError::ResponseParse {
                action: action.as_str().to_string(),
                message: "missing employeeName".to_string(),
            })?;
        Ok(Employee::new(employee_id, name))
    }
}

/// Reply to `checkStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Whether the lookup succeeded.
    pub success: bool,
    /// Whether the employee's latest row is a check-in.
    #[serde(default)]
    pub is_checked_in: bool,
    /// Explanation on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    /// Resolves the reply into the check-in flag.
    pub fn into_checked_in(self) -> AttendanceResult<bool> {
        Ok(accept(RemoteAction::CheckStatus, self)?.is_checked_in)
    }
}

/// Reply to `checkHoliday`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayCheckResponse {
    /// Whether the lookup succeeded.
    pub success: bool,
    /// Whether the requested date is a holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// Holiday name when it is one.
    #[serde(default)]
    pub holiday_name: Option<String>,
    /// Explanation on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl HolidayCheckResponse {
    /// Resolves the reply into the holiday name, `None` on a working day.
    pub fn into_holiday_name(self) -> AttendanceResult<Option<String>> {
        let reply = accept(RemoteAction::CheckHoliday, self)?;
        if !reply.is_holiday {
            return Ok(None);
        }
        Ok(Some(reply.holiday_name.unwrap_or_default()))
    }
}

/// A holiday row as the endpoint sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteHoliday {
    /// ISO calendar date, or an RFC 3339 timestamp.
    pub date: String,
    /// Holiday name.
    pub name: String,
}

impl RemoteHoliday {
    /// Converts the row, `None` when the date is unreadable.
    pub fn to_record(&self) -> Option<HolidayRecord> {
        parse_remote_date(&self.date).map(|date| HolidayRecord::new(date, self.name.clone()))
    }
}

/// Reply to `getAllHolidays`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidaysResponse {
    /// Whether the lookup succeeded.
    pub success: bool,
    /// The calendar, in whatever order the sheet holds it.
    #[serde(default)]
    pub holidays: Option<Vec<RemoteHoliday>>,
    /// Explanation on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl HolidaysResponse {
    /// Resolves the reply into holiday records.
    ///
    /// Rows with unreadable dates are dropped with a warning. The result is
    /// in endpoint order; sorting is left to the caller.
    pub fn into_records(self) -> AttendanceResult<Vec<HolidayRecord>> {
        let action = RemoteAction::GetAllHolidays;
        let rows = accept(action, self)?
            .holidays
            .ok_or_else(|| AttendanceError::ResponseParse {
                action: action.as_str().to_string(),
                message: "missing holidays".to_string(),
            })?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let record = row.to_record();
                if record.is_none() {
                    warn!(date = %row.date, name = %row.name, "Skipping holiday with unreadable date");
                }
                record
            })
            .collect())
    }
}

/// Reply to the submission actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Whether the row was written.
    pub success: bool,
    /// Explanation, mostly on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitResponse {
    /// Resolves the reply for the given submission action.
    pub fn into_result(self, action: RemoteAction) -> AttendanceResult<()> {
        accept(action, self).map(|_| ())
    }
}

impl_envelope!(
    LoginResponse,
    StatusResponse,
    HolidayCheckResponse,
    HolidaysResponse,
    SubmitResponse,
);

/// Parses a holiday date from the endpoint.
///
/// Accepts `YYYY-MM-DD`; RFC 3339 timestamps resolve to their date in their
/// own offset.
///
/// # Example
///
/// ```
/// use attendance_engine::api::parse_remote_date;
/// use chrono::NaiveDate;
///
/// let new_year = NaiveDate::from_ymd_opt(2025, 1, 1);
/// assert_eq!(parse_remote_date("2025-01-01"), new_year);
/// assert_eq!(parse_remote_date("2025-01-01T00:00:00+07:00"), new_year);
/// assert_eq!(parse_remote_date("01/01/2025"), None);
/// ```
pub fn parse_remote_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_login_success_yields_employee() {
        let reply: LoginResponse =
            serde_json::from_value(json!({"success": true, "employeeName": "Somchai"})).unwrap();

        let employee = reply.into_employee("E042").unwrap();
        assert_eq!(employee, Employee::new("E042", "Somchai"));
    }

    #[test]
    fn test_login_failure_is_rejected() {
        let reply: LoginResponse = serde_json::from_value(json!({"success": false})).unwrap();

        match reply.into_employee("nobody") {
            Err(AttendanceError::Rejected { action, reason }) => {
                assert_eq!(action, "login");
                assert_eq!(reason, "request was not accepted");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_login_without_name_is_parse_error() {
        let reply: LoginResponse = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(matches!(
            reply.into_employee("E042"),
            Err(AttendanceError::ResponseParse { .. })
        ));
    }

    #[test]
    fn test_status_flag() {
        let reply: StatusResponse =
            serde_json::from_value(json!({"success": true, "isCheckedIn": true})).unwrap();
        assert!(reply.into_checked_in().unwrap());
    }

    #[test]
    fn test_holiday_check() {
        let holiday: HolidayCheckResponse = serde_json::from_value(
            json!({"success": true, "isHoliday": true, "holidayName": "Songkran"}),
        )
        .unwrap();
        assert_eq!(holiday.into_holiday_name().unwrap().as_deref(), Some("Songkran"));

        let working_day: HolidayCheckResponse =
            serde_json::from_value(json!({"success": true, "isHoliday": false})).unwrap();
        assert_eq!(working_day.into_holiday_name().unwrap(), None);
    }

    #[test]
    fn test_holidays_skip_unreadable_dates() {
        let reply: HolidaysResponse = serde_json::from_value(json!({
            "success": true,
            "holidays": [
                {"date": "2025-01-01", "name": "New Year"},
                {"date": "not a date", "name": "Broken"},
                {"date": "2024-12-25T00:00:00.000Z", "name": "Christmas"}
            ]
        }))
        .unwrap();

        let records = reply.into_records().unwrap();
        assert_eq!(
            records,
            vec![
                HolidayRecord::new(date(2025, 1, 1), "New Year"),
                HolidayRecord::new(date(2024, 12, 25), "Christmas"),
            ]
        );
    }

    #[test]
    fn test_holidays_missing_list_is_parse_error() {
        let reply: HolidaysResponse = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(matches!(
            reply.into_records(),
            Err(AttendanceError::ResponseParse { .. })
        ));
    }

    #[test]
    fn test_submit_failure_carries_remote_message() {
        let reply: SubmitResponse =
            serde_json::from_value(json!({"success": false, "message": "Sheet is locked"}))
                .unwrap();

        match reply.into_result(RemoteAction::SubmitLeaveRequest) {
            Err(AttendanceError::Rejected { action, reason }) => {
                assert_eq!(action, "submitLeaveRequest");
                assert_eq!(reason, "Sheet is locked");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }
}
