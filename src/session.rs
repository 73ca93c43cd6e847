//! Per-login session state.
//!
//! A [`Session`] holds everything the client knows about the logged-in
//! employee. It is owned by [`AttendanceClient`](crate::client::AttendanceClient)
//! and exists only between login and logout.

use chrono::NaiveDate;

use crate::error::LocationError;
use crate::evaluation::{holiday_on, schedule, sort_holidays};
use crate::models::{
    ActionKind, Employee, GeoPosition, HolidayFilter, HolidayRecord, ScheduledHoliday,
};

/// State of a logged-in employee.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ActionKind, Employee};
/// use attendance_engine::session::Session;
///
/// let mut session = Session::new(Employee::new("E042", "Somchai"));
/// assert!(session.can_record(ActionKind::CheckIn));
/// assert!(!session.can_record(ActionKind::CheckOut));
///
/// session.set_checked_in(true);
/// assert!(session.can_record(ActionKind::CheckOut));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    employee: Employee,
    checked_in: bool,
    location: Option<GeoPosition>,
    location_error: Option<LocationError>,
    today_holiday: Option<String>,
    holidays: Vec<HolidayRecord>,
    filter: HolidayFilter,
}

impl Session {
    /// Starts a session for an employee who is not checked in.
    pub fn new(employee: Employee) -> Self {
        Self {
            employee,
            checked_in: false,
            location: None,
            location_error: None,
            today_holiday: None,
            holidays: Vec::new(),
            filter: HolidayFilter::All,
        }
    }

    /// The logged-in employee.
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Whether the employee is currently checked in.
    pub fn is_checked_in(&self) -> bool {
        self.checked_in
    }

    /// Updates the check-in state.
    pub fn set_checked_in(&mut self, checked_in: bool) {
        self.checked_in = checked_in;
    }

    /// Human-readable check-in state.
    pub fn status_text(&self) -> &'static str {
        if self.checked_in {
            "checked in"
        } else {
            "not checked in"
        }
    }

    /// Whether `action` is allowed in the current state.
    ///
    /// Check-in requires being checked out and vice versa.
    pub fn can_record(&self, action: ActionKind) -> bool {
        match action {
            ActionKind::CheckIn => !self.checked_in,
            ActionKind::CheckOut => self.checked_in,
        }
    }

    /// The last known position.
    pub fn location(&self) -> Option<GeoPosition> {
        self.location
    }

    /// Caches a position. `None` leaves the previous fix in place.
    pub fn update_location(&mut self, location: Option<GeoPosition>) {
        if location.is_some() {
            self.location = location;
            self.location_error = None;
        }
    }

    /// Why no position is known, if acquiring one failed.
    pub fn location_error(&self) -> Option<LocationError> {
        self.location_error
    }

    /// Records why the position could not be acquired.
    pub fn set_location_error(&mut self, error: Option<LocationError>) {
        self.location_error = error;
    }

    /// Name of today's holiday, if today is one.
    pub fn today_holiday(&self) -> Option<&str> {
        self.today_holiday.as_deref()
    }

    /// Records today's holiday.
    pub fn set_today_holiday(&mut self, name: Option<String>) {
        self.today_holiday = name;
    }

    /// The holiday calendar, sorted by date.
    pub fn holidays(&self) -> &[HolidayRecord] {
        &self.holidays
    }

    /// Replaces the holiday calendar, sorting it.
    pub fn set_holidays(&mut self, holidays: Vec<HolidayRecord>) {
        self.holidays = sort_holidays(holidays);
    }

    /// Falls back to the local calendar when the remote holiday check
    /// gave no answer.
    pub fn fill_today_holiday_from_calendar(&mut self, today: NaiveDate) {
        if self.today_holiday.is_none() {
            self.today_holiday = holiday_on(&self.holidays, today).map(|h| h.name.clone());
        }
    }

    /// The active holiday filter.
    pub fn filter(&self) -> HolidayFilter {
        self.filter
    }

    /// Selects the holiday filter.
    pub fn set_filter(&mut self, filter: HolidayFilter) {
        self.filter = filter;
    }

    /// The holiday calendar under the active filter, categorized against
    /// `reference`.
    pub fn holiday_view(&self, reference: NaiveDate) -> Vec<ScheduledHoliday> {
        schedule(&self.holidays, self.filter, reference)
    }
}
