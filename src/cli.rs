//! Command-line interface definition using clap.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};

use crate::error::LocationError;
use crate::location::{FixedPosition, PositionSource, Unavailable};
use crate::models::{ActionKind, GeoPosition, LeaveType};

/// Employee attendance client for a spreadsheet-backed time sheet
#[derive(Parser, Debug)]
#[command(name = "attendance")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "ATTENDANCE_CONFIG",
        default_value = "config/attendance.yaml"
    )]
    pub config: PathBuf,

    /// Remote endpoint URL, overriding the configuration file
    #[arg(long, global = true, env = "ATTENDANCE_ENDPOINT")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands of the attendance client.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a check-in or check-out without contacting the endpoint
    Evaluate {
        /// Attendance action (check-in, check-out)
        #[arg(short, long)]
        action: ActionKind,

        /// Moment of the action, YYYY-MM-DDTHH:MM[:SS] (default: now)
        #[arg(long, value_parser = parse_datetime)]
        at: Option<NaiveDateTime>,
    },

    /// List the holiday calendar
    Holidays {
        /// Which holidays to show (all, upcoming, current, past)
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Reference date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show whether an employee is checked in
    Status {
        #[command(flatten)]
        employee: EmployeeArgs,
    },

    /// Record a check-in
    CheckIn {
        #[command(flatten)]
        employee: EmployeeArgs,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Record a check-out
    CheckOut {
        #[command(flatten)]
        employee: EmployeeArgs,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// File an overtime request
    Overtime {
        #[command(flatten)]
        employee: EmployeeArgs,

        /// Date of the overtime, YYYY-MM-DD
        #[arg(short, long)]
        date: NaiveDate,

        /// Time range, e.g. 18:00-20:00
        #[arg(short, long)]
        time: String,

        /// Why the overtime is needed
        #[arg(short, long)]
        reason: String,
    },

    /// File a leave request
    Leave {
        #[command(flatten)]
        employee: EmployeeArgs,

        /// Leave type (sick, personal, annual)
        #[arg(long = "type")]
        leave_type: LeaveType,

        /// First day of leave, YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,

        /// Last day of leave, YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,

        /// Why the leave is needed
        #[arg(short, long)]
        reason: String,
    },
}

/// Identifies the employee acting.
#[derive(Args, Debug, Clone)]
pub struct EmployeeArgs {
    /// Employee ID
    #[arg(short, long, env = "ATTENDANCE_EMPLOYEE_ID")]
    pub employee_id: String,
}

/// Device position to attach to an attendance record.
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Latitude in degrees
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Accuracy radius in meters
    #[arg(long, default_value_t = 0.0)]
    pub accuracy: f64,
}

impl LocationArgs {
    /// The position given on the command line, if any.
    pub fn position(&self) -> Option<GeoPosition> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPosition::new(lat, lon, self.accuracy)),
            _ => None,
        }
    }

    /// The position source for this command line.
    ///
    /// Without coordinates the device has no way to locate itself; out of
    /// range coordinates are not a usable fix.
    pub fn source(&self) -> Arc<dyn PositionSource> {
        match self.position() {
            None => Arc::new(Unavailable(LocationError::Unsupported)),
            Some(position)
                if (-90.0..=90.0).contains(&position.latitude)
                    && (-180.0..=180.0).contains(&position.longitude) =>
            {
                Arc::new(FixedPosition(position))
            }
            Some(_) => Arc::new(Unavailable(LocationError::PositionUnavailable)),
        }
    }
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Parses `YYYY-MM-DDTHH:MM[:SS]`, also accepting a space for the `T`.
pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("invalid date-time '{}', expected YYYY-MM-DDTHH:MM", raw))
}
