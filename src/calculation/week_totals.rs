//! Calendar week totals for the dashboard.
//!
//! Unlike pay period aggregation, these weeks always run Monday to Sunday.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::calculation::aggregate;
use crate::models::{DailyRecord, Settings, WeekSummary};

/// Returns the Monday and Sunday of the calendar week containing `date`.
///
/// # Example
///
/// ```
/// use paycheck_engine::calculation::week_containing;
/// use chrono::NaiveDate;
///
/// // Wednesday 2025-01-15
/// let (monday, sunday) = week_containing(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
/// assert_eq!(monday, NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
/// assert_eq!(sunday, NaiveDate::from_ymd_opt(2025, 1, 19).unwrap());
/// ```
pub fn week_containing(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from_monday = u64::from(date.weekday().num_days_from_monday());
    let monday = date
        .checked_sub_days(Days::new(from_monday))
        .unwrap_or(NaiveDate::MIN);
    let sunday = monday
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    (monday, sunday)
}

/// Aggregates the Monday-to-Sunday week containing `date`.
///
/// The week is a single seven-day chunk, so anything over 40 hours in it is
/// overtime.
pub fn week_totals(
    date: NaiveDate,
    records: &BTreeMap<NaiveDate, DailyRecord>,
    settings: &Settings,
) -> WeekSummary {
    let (week_start, week_end) = week_containing(date);
    WeekSummary {
        week_start,
        week_end,
        totals: aggregate(week_start, week_end, records, settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_containing_monday() {
        assert_eq!(
            week_containing(date(2025, 1, 13)),
            (date(2025, 1, 13), date(2025, 1, 19))
        );
    }

    #[test]
    fn test_week_containing_sunday() {
        assert_eq!(
            week_containing(date(2025, 1, 19)),
            (date(2025, 1, 13), date(2025, 1, 19))
        );
    }

    #[test]
    fn test_week_crossing_year_boundary() {
        assert_eq!(
            week_containing(date(2025, 1, 1)),
            (date(2024, 12, 30), date(2025, 1, 5))
        );
    }

    #[test]
    fn test_week_totals_only_counts_that_week() {
        let settings = Settings::defaults(date(2025, 1, 6));
        let mut records = BTreeMap::new();
        for (d, hours) in [
            (date(2025, 1, 12), "8"), // previous Sunday
            (date(2025, 1, 13), "9"),
            (date(2025, 1, 19), "7"),
            (date(2025, 1, 20), "8"), // next Monday
        ] {
            records.insert(d, DailyRecord::new(d, dec(hours), Decimal::ZERO).unwrap());
        }

        let summary = week_totals(date(2025, 1, 16), &records, &settings);

        assert_eq!(summary.week_start, date(2025, 1, 13));
        assert_eq!(summary.week_end, date(2025, 1, 19));
        assert_eq!(summary.totals.total_hours, dec("16"));
        assert_eq!(summary.totals.gross_pay, dec("320"));
    }

    #[test]
    fn test_week_totals_overtime() {
        let settings = Settings::defaults(date(2025, 1, 6));
        let mut records = BTreeMap::new();
        let monday = date(2025, 1, 13);
        for d in monday.iter_days().take(6) {
            records.insert(d, DailyRecord::new(d, dec("8"), Decimal::ZERO).unwrap());
        }

        let summary = week_totals(monday, &records, &settings);

        assert_eq!(summary.totals.regular_hours, dec("40"));
        assert_eq!(summary.totals.overtime_hours, dec("8"));
        assert_eq!(summary.totals.overtime_pay, dec("240"));
    }
}
