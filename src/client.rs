//! Application controller.
//!
//! [`AttendanceClient`] owns the remote API, the working schedule, the
//! current [`Session`] and the location watch. Every user-facing operation
//! of the attendance client goes through it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::api::AttendanceApi;
use crate::config::{AttendanceConfig, ClientConfig};
use crate::error::{AttendanceError, AttendanceResult, LocationError};
use crate::evaluation::evaluate;
use crate::location::{PositionSource, WatchHandle, request_position, watch_position};
use crate::models::{
    ActionKind, AttendanceVerdict, Employee, GeoPosition, HolidayFilter, LeaveRequest,
    OvertimeRequest, ScheduledHoliday,
};
use crate::session::Session;

/// The attendance client for one user at a time.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::api::RemoteApi;
/// use attendance_engine::client::AttendanceClient;
/// use attendance_engine::config::ConfigLoader;
/// use attendance_engine::models::ActionKind;
/// use chrono::Local;
///
/// # async fn run() -> attendance_engine::error::AttendanceResult<()> {
/// let config = ConfigLoader::load("./config/attendance.yaml")?;
/// let api = RemoteApi::new(config.endpoint())?;
/// let mut client = AttendanceClient::new(api, config.config());
///
/// let now = Local::now().naive_local();
/// client.login("E042", now.date(), None).await?;
/// let verdict = client.record_attendance(ActionKind::CheckIn, now).await?;
/// println!("{}", verdict.status_label);
/// client.logout();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AttendanceClient<A> {
    api: A,
    schedule: AttendanceConfig,
    watch_interval: Duration,
    session: Option<Session>,
    tracker: Option<WatchHandle>,
}

impl<A: AttendanceApi> AttendanceClient<A> {
    /// Creates a logged-out client.
    pub fn new(api: A, config: &ClientConfig) -> Self {
        Self {
            api,
            schedule: config.schedule,
            watch_interval: Duration::from_secs(config.location.watch_interval_secs),
            session: None,
            tracker: None,
        }
    }

    /// The remote API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The working schedule verdicts are computed against.
    pub fn schedule(&self) -> &AttendanceConfig {
        &self.schedule
    }

    /// The current session, if logged in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether an employee is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Whether location tracking is running.
    pub fn is_tracking(&self) -> bool {
        self.tracker.as_ref().is_some_and(WatchHandle::is_active)
    }

    /// Logs an employee in.
    ///
    /// With a position source, a first fix is taken and tracking starts;
    /// location failures are logged and login continues without a position.
    /// After the remote login succeeds, today's holiday, the check-in state
    /// and the holiday calendar are fetched concurrently. Each of those
    /// lookups may fail on its own without failing the login.
    ///
    /// Logging in while logged in replaces the previous session.
    pub async fn login(
        &mut self,
        employee_id: &str,
        today: NaiveDate,
        source: Option<Arc<dyn PositionSource>>,
    ) -> AttendanceResult<Employee> {
        let employee_id = employee_id.trim();
        if employee_id.is_empty() {
            return Err(AttendanceError::invalid("employee_id", "must not be empty"));
        }

        self.logout();

        let location = source.map(|source| self.start_tracking(source));

        let employee = match self.api.login(employee_id).await {
            Ok(employee) => employee,
            Err(err) => {
                warn!(employee_id = %employee_id, error = %err, "Login failed");
                self.stop_tracking();
                return Err(err);
            }
        };

        let (holiday, status, holidays) = tokio::join!(
            self.api.check_holiday(today),
            self.api.check_status(&employee.id),
            self.api.all_holidays(),
        );

        let mut session = Session::new(employee.clone());
        match location {
            Some(Ok(position)) => session.update_location(Some(position)),
            Some(Err(error)) => session.set_location_error(Some(error)),
            None => {}
        }

        match status {
            Ok(checked_in) => session.set_checked_in(checked_in),
            Err(err) => warn!(employee_id = %employee.id, error = %err, "Could not read check-in status"),
        }

        match holidays {
            Ok(records) => session.set_holidays(records),
            Err(err) => warn!(error = %err, "Could not load holiday calendar"),
        }

        match holiday {
            Ok(name) => session.set_today_holiday(name),
            Err(err) => {
                warn!(error = %err, "Could not check today's holiday");
                session.fill_today_holiday_from_calendar(today);
            }
        }

        info!(
            employee_id = %employee.id,
            employee_name = %employee.name,
            checked_in = session.is_checked_in(),
            holidays = session.holidays().len(),
            today_holiday = session.today_holiday().unwrap_or("-"),
            "Logged in"
        );

        self.session = Some(session);
        Ok(employee)
    }

    /// Re-reads the check-in state from the remote sheet.
    pub async fn refresh_status(&mut self) -> AttendanceResult<bool> {
        let session = self.session.as_mut().ok_or(AttendanceError::NotLoggedIn)?;
        let checked_in = self.api.check_status(&session.employee().id).await?;
        session.set_checked_in(checked_in);
        Ok(checked_in)
    }

    /// Copies the latest tracked position into the session and returns the
    /// last known position.
    pub fn current_location(&mut self) -> Option<GeoPosition> {
        let latest = self.tracker.as_ref().and_then(WatchHandle::latest);
        let session = self.session.as_mut()?;
        session.update_location(latest);
        session.location()
    }

    /// The last known position, or why there is none.
    ///
    /// Without any recorded failure a missing position reports
    /// [`LocationError::PositionUnavailable`].
    pub fn require_location(&mut self) -> AttendanceResult<GeoPosition> {
        let location = self.current_location();
        let session = self.session.as_ref().ok_or(AttendanceError::NotLoggedIn)?;
        location.ok_or_else(|| {
            AttendanceError::Location(
                session
                    .location_error()
                    .unwrap_or(LocationError::PositionUnavailable),
            )
        })
    }

    /// Records a check-in or check-out at `now` and classifies it.
    ///
    /// Check-in is refused while checked in and check-out while checked
    /// out. The verdict is computed from `now`, the moment the action was
    /// taken, not from when the remote write completes.
    pub async fn record_attendance(
        &mut self,
        action: ActionKind,
        now: NaiveDateTime,
    ) -> AttendanceResult<AttendanceVerdict> {
        let location = self.current_location();
        let session = self.session.as_ref().ok_or(AttendanceError::NotLoggedIn)?;

        if !session.can_record(action) {
            return Err(AttendanceError::invalid(
                "action",
                format!("cannot {} while {}", action, session.status_text()),
            ));
        }

        self.api
            .record_attendance(session.employee(), action, location)
            .await?;

        let verdict = evaluate(action, now, &self.schedule);

        if let Some(session) = self.session.as_mut() {
            session.set_checked_in(action == ActionKind::CheckIn);
            info!(
                employee_id = %session.employee().id,
                action = %action,
                severity = %verdict.severity,
                status = %verdict.status_label,
                located = location.is_some(),
                "Attendance recorded"
            );
        }

        Ok(verdict)
    }

    /// Validates and files an overtime request.
    pub async fn submit_overtime(&self, request: &OvertimeRequest) -> AttendanceResult<()> {
        request.validate()?;
        let session = self.session.as_ref().ok_or(AttendanceError::NotLoggedIn)?;

        self.api.submit_overtime(session.employee(), request).await?;
        info!(
            employee_id = %session.employee().id,
            date = %request.date,
            "Overtime request submitted"
        );
        Ok(())
    }

    /// Validates and files a leave request.
    pub async fn submit_leave(&self, request: &LeaveRequest) -> AttendanceResult<()> {
        request.validate()?;
        let session = self.session.as_ref().ok_or(AttendanceError::NotLoggedIn)?;

        self.api.submit_leave(session.employee(), request).await?;
        info!(
            employee_id = %session.employee().id,
            leave_type = %request.leave_type,
            days = request.days(),
            "Leave request submitted"
        );
        Ok(())
    }

    /// Selects which holidays [`holidays`](Self::holidays) returns.
    pub fn set_holiday_filter(&mut self, filter: HolidayFilter) -> AttendanceResult<()> {
        let session = self.session.as_mut().ok_or(AttendanceError::NotLoggedIn)?;
        session.set_filter(filter);
        Ok(())
    }

    /// The filtered, categorized holiday calendar relative to `reference`.
    pub fn holidays(&self, reference: NaiveDate) -> AttendanceResult<Vec<ScheduledHoliday>> {
        let session = self.session.as_ref().ok_or(AttendanceError::NotLoggedIn)?;
        Ok(session.holiday_view(reference))
    }

    /// Ends the session and stops location tracking.
    ///
    /// Returns the employee who was logged in. Safe to call when logged out.
    pub fn logout(&mut self) -> Option<Employee> {
        self.stop_tracking();
        let session = self.session.take()?;
        info!(employee_id = %session.employee().id, "Logged out");
        Some(session.employee().clone())
    }

    fn start_tracking(
        &mut self,
        source: Arc<dyn PositionSource>,
    ) -> Result<GeoPosition, LocationError> {
        let initial = request_position(source.as_ref())?;
        self.tracker = Some(watch_position(source, self.watch_interval, Some(initial)));
        Ok(initial)
    }

    fn stop_tracking(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.stop();
        }
    }
}
