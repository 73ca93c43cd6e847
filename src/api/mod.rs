//! Remote API boundary for the attendance client.
//!
//! The attendance sheet is an opaque HTTP endpoint. This module defines the
//! requests sent to it, the replies it returns, and the [`AttendanceApi`]
//! trait through which the rest of the crate talks to it.

mod client;
mod request;
mod response;

pub use client::{AttendanceApi, RemoteApi};
pub use request::{AttendanceForm, LOCATION_UNAVAILABLE, LeaveForm, OvertimeForm, RemoteAction};
pub use response::{
    Envelope, HolidayCheckResponse, HolidaysResponse, LoginResponse, RemoteHoliday,
    StatusResponse, SubmitResponse, accept, parse_remote_date,
};
