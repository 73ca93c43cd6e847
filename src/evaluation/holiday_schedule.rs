//! Holiday calendar ordering, categorization and filtering.
//!
//! All comparisons are at calendar-day granularity against a caller-supplied
//! reference date (normally "today").

use chrono::NaiveDate;

use crate::models::{HolidayCategory, HolidayFilter, HolidayRecord, ScheduledHoliday};

/// Sorts holidays by ascending date.
///
/// The sort is stable: holidays sharing a date keep their input order.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::sort_holidays;
/// use attendance_engine::models::HolidayRecord;
/// use chrono::NaiveDate;
///
/// let sorted = sort_holidays(vec![
///     HolidayRecord::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), "New Year"),
///     HolidayRecord::new(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(), "Christmas"),
/// ]);
/// assert_eq!(sorted[0].name, "Christmas");
/// assert_eq!(sorted[1].name, "New Year");
/// ```
pub fn sort_holidays(mut records: Vec<HolidayRecord>) -> Vec<HolidayRecord> {
    records.sort_by_key(|record| record.date);
    records
}

/// Places a holiday relative to the reference date.
///
/// # Returns
///
/// - [`HolidayCategory::Today`] when the dates are equal
/// - [`HolidayCategory::Upcoming`] with the number of days remaining when
///   the holiday is later
/// - [`HolidayCategory::Past`] when the holiday is earlier
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::categorize;
/// use attendance_engine::models::{HolidayCategory, HolidayRecord};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
/// let songkran = HolidayRecord::new(NaiveDate::from_ymd_opt(2025, 4, 13).unwrap(), "Songkran");
/// assert_eq!(categorize(&songkran, today), HolidayCategory::Upcoming { days_until: 3 });
/// ```
pub fn categorize(record: &HolidayRecord, reference: NaiveDate) -> HolidayCategory {
    let days_until = (record.date - reference).num_days();
    match days_until {
        0 => HolidayCategory::Today,
        d if d > 0 => HolidayCategory::Upcoming { days_until: d },
        _ => HolidayCategory::Past,
    }
}

/// Returns the holidays selected by `filter`, preserving input order.
///
/// An empty result is a normal outcome.
pub fn filter_holidays(
    records: &[HolidayRecord],
    filter: HolidayFilter,
    reference: NaiveDate,
) -> Vec<HolidayRecord> {
    records
        .iter()
        .filter(|record| matches_filter(record, filter, reference))
        .cloned()
        .collect()
}

/// Filters holidays and pairs each survivor with its category.
///
/// This is the display view of the calendar.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::schedule;
/// use attendance_engine::models::{HolidayCategory, HolidayFilter, HolidayRecord};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let holidays = vec![
///     HolidayRecord::new(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(), "Christmas"),
///     HolidayRecord::new(today, "New Year"),
/// ];
///
/// let view = schedule(&holidays, HolidayFilter::All, today);
/// assert_eq!(view[0].category, HolidayCategory::Past);
/// assert_eq!(view[1].category, HolidayCategory::Today);
/// ```
pub fn schedule(
    records: &[HolidayRecord],
    filter: HolidayFilter,
    reference: NaiveDate,
) -> Vec<ScheduledHoliday> {
    records
        .iter()
        .filter(|record| matches_filter(record, filter, reference))
        .map(|record| ScheduledHoliday {
            record: record.clone(),
            category: categorize(record, reference),
        })
        .collect()
}

/// Finds the first holiday falling on `date`.
pub fn holiday_on(records: &[HolidayRecord], date: NaiveDate) -> Option<&HolidayRecord> {
    records.iter().find(|record| record.date == date)
}

fn matches_filter(record: &HolidayRecord, filter: HolidayFilter, reference: NaiveDate) -> bool {
    match filter {
        HolidayFilter::All => true,
        HolidayFilter::Upcoming => record.date > reference,
        HolidayFilter::Current => record.date == reference,
        HolidayFilter::Past => record.date < reference,
    }
}
