//! Pay period and weekly chunk models.
//!
//! This module contains the [`PayPeriod`] and [`WeekChunk`] types. Both are
//! inclusive whole-day ranges: the start day begins at midnight and the end
//! day is counted in full.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a pay period with its inclusive date range.
///
/// Pay periods are derived from the settings anchor and period length and are
/// never stored.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let pay_period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 1, 19).unwrap(),
/// };
///
/// assert!(pay_period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()));
/// assert_eq!(pay_period.length_days(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The first day of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    ///
    /// # Example
    ///
    /// ```
    /// use paycheck_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod {
    ///     start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 1, 19).unwrap(),
    /// };
    ///
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())); // start date
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 19).unwrap())); // end date
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())); // before
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())); // after
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the number of calendar days covered by the period.
    ///
    /// A malformed period (end before start) has length zero.
    pub fn length_days(&self) -> i64 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        days.max(0)
    }
}

/// A run of at most seven consecutive days inside a date range.
///
/// Chunks are produced by
/// [`partition_into_weeks`](crate::calculation::partition_into_weeks) and are
/// anchored to the start of the range being partitioned, not to calendar weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekChunk {
    /// The first day of the chunk (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the chunk (inclusive).
    pub end_date: NaiveDate,
}

impl WeekChunk {
    /// Returns the number of days in the chunk (1 to 7).
    pub fn length_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Iterates over every calendar day in the chunk, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |day| *day <= end)
    }
}
