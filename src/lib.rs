//! Employee attendance client.
//!
//! This crate classifies check-ins and check-outs against a working schedule,
//! orders and filters a holiday calendar, and talks to the spreadsheet web app
//! that stores attendance records, overtime and leave requests.
//!
//! The evaluation core in [`evaluation`] is pure and synchronous. The
//! [`client::AttendanceClient`] controller wraps it with a session, location
//! tracking and the remote [`api`].

#![warn(missing_docs)]

pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod location;
pub mod models;
pub mod session;
