//! Request types sent to the remote attendance sheet.
//!
//! Lookups are GET requests with an `action` query parameter; submissions
//! are form-encoded POST bodies carrying the same `action` field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ActionKind, Employee, GeoPosition, LeaveRequest, OvertimeRequest};

/// Location text the sheet records when no position fix is available.
pub const LOCATION_UNAVAILABLE: &str = "ไม่สามารถระบุตำแหน่งได้";

/// The actions understood by the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteAction {
    /// Resolve an employee ID to a name.
    Login,
    /// Read whether the employee is currently checked in.
    CheckStatus,
    /// Ask whether a date is a holiday.
    CheckHoliday,
    /// Fetch the whole holiday calendar.
    GetAllHolidays,
    /// Append a check-in or check-out row.
    RecordAttendance,
    /// File an overtime request.
    SubmitOvertimeRequest,
    /// File a leave request.
    SubmitLeaveRequest,
}

impl RemoteAction {
    /// The value of the `action` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteAction::Login => "login",
            RemoteAction::CheckStatus => "checkStatus",
            RemoteAction::CheckHoliday => "checkHoliday",
            RemoteAction::GetAllHolidays => "getAllHolidays",
            RemoteAction::RecordAttendance => "recordAttendance",
            RemoteAction::SubmitOvertimeRequest => "submitOTRequest",
            RemoteAction::SubmitLeaveRequest => "submitLeaveRequest",
        }
    }
}

impl std::fmt::Display for RemoteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form body for `recordAttendance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceForm {
    /// Always `recordAttendance`.
    pub action: String,
    /// Employee display name.
    pub user_name: String,
    /// Wire label of the check-in/check-out action.
    pub attendance_action: String,
    /// `"lat, lon"` or [`LOCATION_UNAVAILABLE`].
    pub location: String,
    /// Accuracy radius in meters, omitted without a fix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl AttendanceForm {
    /// Builds the form for an attendance action.
    pub fn new(employee: &Employee, action: ActionKind, location: Option<&GeoPosition>) -> Self {
        Self {
            action: RemoteAction::RecordAttendance.as_str().to_string(),
            user_name: employee.name.clone(),
            attendance_action: action.wire_label().to_string(),
            location: location
                .map(GeoPosition::coordinates)
                .unwrap_or_else(|| LOCATION_UNAVAILABLE.to_string()),
            accuracy: location.map(|p| p.accuracy),
        }
    }
}

/// Form body for `submitOTRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeForm {
    /// Always `submitOTRequest`.
    pub action: String,
    /// Employee display name.
    pub user_name: String,
    /// Day of the overtime.
    pub date: NaiveDate,
    /// Requested time as entered.
    pub time: String,
    /// Reason for the overtime.
    pub reason: String,
}

impl OvertimeForm {
    /// Builds the form for an overtime request.
    pub fn new(employee: &Employee, request: &OvertimeRequest) -> Self {
        Self {
            action: RemoteAction::SubmitOvertimeRequest.as_str().to_string(),
            user_name: employee.name.clone(),
            date: request.date,
            time: request.time.trim().to_string(),
            reason: request.reason.trim().to_string(),
        }
    }
}

/// Form body for `submitLeaveRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveForm {
    /// Always `submitLeaveRequest`.
    pub action: String,
    /// Employee display name.
    pub user_name: String,
    /// Wire label of the leave type.
    pub leave_type: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Reason for the leave.
    pub reason: String,
}

impl LeaveForm {
    /// Builds the form for a leave request.
    pub fn new(employee: &Employee, request: &LeaveRequest) -> Self {
        Self {
            action: RemoteAction::SubmitLeaveRequest.as_str().to_string(),
            user_name: employee.name.clone(),
            leave_type: request.leave_type.wire_label().to_string(),
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveType;

    fn employee() -> Employee {
        Employee::new("E042", "Somchai")
    }

    #[test]
    fn test_attendance_form_with_location() {
        let position = GeoPosition::new(13.75, 100.5, 8.0);
        let form = AttendanceForm::new(&employee(), ActionKind::CheckIn, Some(&position));

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["action"], "recordAttendance");
        assert_eq!(json["userName"], "Somchai");
        assert_eq!(json["attendanceAction"], "เข้างาน");
        assert_eq!(json["location"], "13.750000, 100.500000");
        assert_eq!(json["accuracy"], 8.0);
    }

    #[test]
    fn test_attendance_form_without_location_omits_accuracy() {
        let form = AttendanceForm::new(&employee(), ActionKind::CheckOut, None);

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["location"], "ไม่สามารถระบุตำแหน่งได้");
        assert_eq!(json["attendanceAction"], "ออกงาน");
        assert!(json.get("accuracy").is_none());
    }

    #[test]
    fn test_leave_form_uses_wire_labels() {
        let request = LeaveRequest {
            leave_type: LeaveType::Sick,
            start_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 4).unwrap(),
            reason: " Flu ".to_string(),
        };
        let json = serde_json::to_value(LeaveForm::new(&employee(), &request)).unwrap();

        assert_eq!(json["action"], "submitLeaveRequest");
        assert_eq!(json["leaveType"], "ลาป่วย");
        assert_eq!(json["startDate"], "2025-02-03");
        assert_eq!(json["endDate"], "2025-02-04");
        assert_eq!(json["reason"], "Flu");
    }

    #[test]
    fn test_overtime_form_fields() {
        let request = OvertimeRequest {
            date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            time: "18:00-20:00".to_string(),
            reason: "Release".to_string(),
        };
        let json = serde_json::to_value(OvertimeForm::new(&employee(), &request)).unwrap();

        assert_eq!(json["action"], "submitOTRequest");
        assert_eq!(json["date"], "2025-02-03");
        assert_eq!(json["time"], "18:00-20:00");
    }

    #[test]
    fn test_remote_action_names() {
        assert_eq!(RemoteAction::SubmitOvertimeRequest.as_str(), "submitOTRequest");
        assert_eq!(RemoteAction::GetAllHolidays.to_string(), "getAllHolidays");
    }
}
