//! Configuration types for the attendance client.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Default scheduled start of the working day.
pub const DEFAULT_WORK_START: &str = "08:00";

/// Default scheduled end of the working day.
pub const DEFAULT_WORK_END: &str = "17:00";

/// Default grace period after work start, in minutes.
pub const DEFAULT_LATE_THRESHOLD_MINUTES: u32 = 15;

/// The working schedule check-ins and check-outs are measured against.
///
/// Callers must keep `work_start` before `work_end`; the evaluator does not
/// re-check it. [`ConfigLoader`](super::ConfigLoader) rejects files that
/// break the rule.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendanceConfig;
/// use chrono::NaiveTime;
///
/// let config = AttendanceConfig::default();
/// assert_eq!(config.work_start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
/// assert_eq!(config.work_end, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
/// assert_eq!(config.late_threshold_minutes, 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceConfig {
    /// Scheduled start of the working day.
    #[serde(with = "clock_time")]
    pub work_start: NaiveTime,
    /// Scheduled end of the working day.
    #[serde(with = "clock_time")]
    pub work_end: NaiveTime,
    /// Minutes after `work_start` during which a check-in is only "late".
    pub late_threshold_minutes: u32,
}

impl AttendanceConfig {
    /// Creates a schedule from its parts.
    pub fn new(work_start: NaiveTime, work_end: NaiveTime, late_threshold_minutes: u32) -> Self {
        Self {
            work_start,
            work_end,
            late_threshold_minutes,
        }
    }
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            work_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            late_threshold_minutes: DEFAULT_LATE_THRESHOLD_MINUTES,
        }
    }
}

/// Where the remote attendance sheet lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// The web app URL every action is sent to.
    pub url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Location tracking settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Seconds between position polls while tracking.
    #[serde(default = "default_watch_interval_secs")]
    pub watch_interval_secs: u64,
}

fn default_watch_interval_secs() -> u64 {
    60
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            watch_interval_secs: default_watch_interval_secs(),
        }
    }
}

/// The complete client configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Working schedule.
    #[serde(default)]
    pub schedule: AttendanceConfig,
    /// Remote endpoint.
    pub endpoint: EndpointConfig,
    /// Location tracking.
    #[serde(default)]
    pub location: LocationConfig,
}

impl ClientConfig {
    /// Creates a configuration with default schedule and location settings.
    pub fn with_endpoint(url: impl Into<String>) -> Self {
        Self {
            schedule: AttendanceConfig::default(),
            endpoint: EndpointConfig {
                url: url.into(),
                timeout_secs: default_timeout_secs(),
            },
            location: LocationConfig::default(),
        }
    }
}

/// Serde adapter for `HH:MM` clock times (seconds optional on input).
pub(crate) mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid clock time '{}'", raw)))
    }

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .ok()
    }
}
