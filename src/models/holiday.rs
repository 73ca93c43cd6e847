//! Holiday calendar models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named holiday on a calendar date.
///
/// Several records may share a date; they are never merged.
///
/// # Example
///
/// ```
/// use attendance_engine::models::HolidayRecord;
/// use chrono::NaiveDate;
///
/// let holiday = HolidayRecord::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), "New Year");
/// assert_eq!(holiday.name, "New Year");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// The calendar date of the holiday.
    pub date: NaiveDate,
    /// The holiday name.
    pub name: String,
}

impl HolidayRecord {
    /// Creates a holiday record.
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// Where a holiday falls relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HolidayCategory {
    /// The holiday is on the reference date.
    Today,
    /// The holiday is after the reference date.
    Upcoming {
        /// Whole days from the reference date, always positive.
        days_until: i64,
    },
    /// The holiday is before the reference date.
    Past,
}

impl fmt::Display for HolidayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayCategory::Today => write!(f, "today"),
            HolidayCategory::Upcoming { days_until: 1 } => write!(f, "in 1 day"),
            HolidayCategory::Upcoming { days_until } => write!(f, "in {} days", days_until),
            HolidayCategory::Past => write!(f, "passed"),
        }
    }
}

/// Which slice of the holiday calendar to show.
///
/// Parsing is infallible: an unrecognized name selects [`HolidayFilter::All`].
///
/// # Example
///
/// ```
/// use attendance_engine::models::HolidayFilter;
///
/// assert_eq!(HolidayFilter::from_name("upcoming"), HolidayFilter::Upcoming);
/// assert_eq!(HolidayFilter::from_name("next-week"), HolidayFilter::All);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayFilter {
    /// Every holiday.
    #[default]
    All,
    /// Holidays after the reference date.
    Upcoming,
    /// Holidays on the reference date.
    Current,
    /// Holidays before the reference date.
    Past,
}

impl HolidayFilter {
    /// Resolves a filter name, falling back to `All`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "upcoming" => HolidayFilter::Upcoming,
            "current" => HolidayFilter::Current,
            "past" => HolidayFilter::Past,
            _ => HolidayFilter::All,
        }
    }

    /// The canonical filter name.
    pub fn name(self) -> &'static str {
        match self {
            HolidayFilter::All => "all",
            HolidayFilter::Upcoming => "upcoming",
            HolidayFilter::Current => "current",
            HolidayFilter::Past => "past",
        }
    }
}

impl fmt::Display for HolidayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A holiday paired with its category, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledHoliday {
    /// The holiday.
    #[serde(flatten)]
    pub record: HolidayRecord,
    /// Its position relative to the reference date.
    pub category: HolidayCategory,
}
