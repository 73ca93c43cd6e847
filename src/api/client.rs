//! Remote attendance sheet client.
//!
//! [`AttendanceApi`] is the seam between the application controller and the
//! data store; [`RemoteApi`] implements it over HTTP.

use std::future::Future;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::config::EndpointConfig;
use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{
    ActionKind, Employee, GeoPosition, HolidayRecord, LeaveRequest, OvertimeRequest,
};

use super::request::{AttendanceForm, LeaveForm, OvertimeForm, RemoteAction};
use super::response::{
    HolidayCheckResponse, HolidaysResponse, LoginResponse, StatusResponse, SubmitResponse,
};

/// Operations offered by the attendance data store.
///
/// Every method resolves the endpoint's success flag into a typed result.
pub trait AttendanceApi: Send + Sync {
    /// Resolves an employee ID to the employee record.
    fn login(&self, employee_id: &str) -> impl Future<Output = AttendanceResult<Employee>> + Send;

    /// Whether the employee is currently checked in.
    fn check_status(&self, employee_id: &str)
    -> impl Future<Output = AttendanceResult<bool>> + Send;

    /// The name of the holiday on `date`, if it is one.
    fn check_holiday(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = AttendanceResult<Option<String>>> + Send;

    /// The whole holiday calendar, in store order.
    fn all_holidays(&self) -> impl Future<Output = AttendanceResult<Vec<HolidayRecord>>> + Send;

    /// Records a check-in or check-out.
    fn record_attendance(
        &self,
        employee: &Employee,
        action: ActionKind,
        location: Option<GeoPosition>,
    ) -> impl Future<Output = AttendanceResult<()>> + Send;

    /// Files an overtime request.
    fn submit_overtime(
        &self,
        employee: &Employee,
        request: &OvertimeRequest,
    ) -> impl Future<Output = AttendanceResult<()>> + Send;

    /// Files a leave request.
    fn submit_leave(
        &self,
        employee: &Employee,
        request: &LeaveRequest,
    ) -> impl Future<Output = AttendanceResult<()>> + Send;
}

/// HTTP client for the spreadsheet web app.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::api::{AttendanceApi, RemoteApi};
/// use attendance_engine::config::ConfigLoader;
///
/// # async fn run() -> attendance_engine::error::AttendanceResult<()> {
/// let config = ConfigLoader::load("./config/attendance.yaml")?;
/// let api = RemoteApi::new(config.endpoint())?;
/// let employee = api.login("E042").await?;
/// println!("Hello {}", employee.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RemoteApi {
    client: reqwest::Client,
    url: String,
}

impl RemoteApi {
    /// Creates a client for the configured endpoint.
    pub fn new(endpoint: &EndpointConfig) -> AttendanceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| AttendanceError::Transport {
                action: "connect".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: endpoint.url.clone(),
        })
    }

    /// The endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        action: RemoteAction,
        params: &[(&str, &str)],
    ) -> AttendanceResult<T> {
        let request = self
            .client
            .get(&self.url)
            .query(&[("action", action.as_str())])
            .query(params);
        self.send(action, request).await
    }

    async fn post<F: Serialize, T: DeserializeOwned>(
        &self,
        action: RemoteAction,
        form: &F,
    ) -> AttendanceResult<T> {
        let request = self.client.post(&self.url).form(form);
        self.send(action, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        action: RemoteAction,
        request: reqwest::RequestBuilder,
    ) -> AttendanceResult<T> {
        let request_id = Uuid::new_v4();
        let start_time = Instant::now();
        debug!(request_id = %request_id, action = %action, "Sending request");

        let response = request.send().await.map_err(|e| {
            warn!(request_id = %request_id, action = %action, error = %e, "Request failed");
            AttendanceError::Transport {
                action: action.as_str().to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AttendanceError::Transport {
                action: action.as_str().to_string(),
                message: e.to_string(),
            })?;

        debug!(
            request_id = %request_id,
            action = %action,
            status = %status,
            duration_ms = start_time.elapsed().as_millis(),
            "Response received"
        );
        trace!(request_id = %request_id, body = %body, "Response body");

        if !status.is_success() {
            return Err(AttendanceError::Transport {
                action: action.as_str().to_string(),
                message: format!("HTTP {}", status),
            });
        }

        serde_json::from_str(&body).map_err(|e| AttendanceError::ResponseParse {
            action: action.as_str().to_string(),
            message: e.to_string(),
        })
    }
}

impl AttendanceApi for RemoteApi {
    async fn login(&self, employee_id: &str) -> AttendanceResult<Employee> {
        let reply: LoginResponse = self
            .get(RemoteAction::Login, &[("employeeId", employee_id)])
            .await?;
        reply.into_employee(employee_id)
    }

    async fn check_status(&self, employee_id: &str) -> AttendanceResult<bool> {
        let reply: StatusResponse = self
            .get(RemoteAction::CheckStatus, &[("employeeId", employee_id)])
            .await?;
        reply.into_checked_in()
    }

    async fn check_holiday(&self, date: NaiveDate) -> AttendanceResult<Option<String>> {
        let date = date.format("%Y-%m-%d").to_string();
        let reply: HolidayCheckResponse = self
            .get(RemoteAction::CheckHoliday, &[("date", date.as_str())])
            .await?;
        reply.into_holiday_name()
    }

    async fn all_holidays(&self) -> AttendanceResult<Vec<HolidayRecord>> {
        let reply: HolidaysResponse = self.get(RemoteAction::GetAllHolidays, &[]).await?;
        reply.into_records()
    }

    async fn record_attendance(
        &self,
        employee: &Employee,
        action: ActionKind,
        location: Option<GeoPosition>,
    ) -> AttendanceResult<()> {
        let form = AttendanceForm::new(employee, action, location.as_ref());
        let reply: SubmitResponse = self.post(RemoteAction::RecordAttendance, &form).await?;
        reply.into_result(RemoteAction::RecordAttendance)
    }

    async fn submit_overtime(
        &self,
        employee: &Employee,
        request: &OvertimeRequest,
    ) -> AttendanceResult<()> {
        let form = OvertimeForm::new(employee, request);
        let reply: SubmitResponse = self
            .post(RemoteAction::SubmitOvertimeRequest, &form)
            .await?;
        reply.into_result(RemoteAction::SubmitOvertimeRequest)
    }

    async fn submit_leave(
        &self,
        employee: &Employee,
        request: &LeaveRequest,
    ) -> AttendanceResult<()> {
        let form = LeaveForm::new(employee, request);
        let reply: SubmitResponse = self.post(RemoteAction::SubmitLeaveRequest, &form).await?;
        reply.into_result(RemoteAction::SubmitLeaveRequest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_api_keeps_url() {
        let api = RemoteApi::new(&EndpointConfig {
            url: "http://127.0.0.1:9/exec".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(api.url(), "http://127.0.0.1:9/exec");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let api = RemoteApi::new(&EndpointConfig {
            url: "http://127.0.0.1:9/exec".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        match api.check_status("E042").await {
            Err(AttendanceError::Transport { action, .. }) => assert_eq!(action, "checkStatus"),
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }
}
