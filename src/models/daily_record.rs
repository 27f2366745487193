//! Daily timesheet record model.
//!
//! A [`DailyRecord`] holds the hours worked and travel time logged for one
//! calendar day. There is at most one record per date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Hours worked and travel time recorded for a single day.
///
/// Field names also accept the camelCase spelling used by older data files.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::DailyRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let record = DailyRecord::new(date, Decimal::new(80, 1), Decimal::new(5, 1)).unwrap();
/// assert_eq!(record.hours_worked, Decimal::new(8, 0));
///
/// assert!(DailyRecord::new(date, Decimal::new(-1, 0), Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// The calendar day this record belongs to.
    pub date: NaiveDate,
    /// Hours worked on the day.
    #[serde(alias = "hoursWorked", default)]
    pub hours_worked: Decimal,
    /// Hours spent travelling on the day.
    #[serde(alias = "travelTime", default)]
    pub travel_time: Decimal,
}

impl DailyRecord {
    /// Most hours of work or travel a single day can hold.
    pub const MAX_DAILY_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

    /// Creates a record, rejecting negative hours or travel time and
    /// anything above [`Self::MAX_DAILY_HOURS`].
    pub fn new(date: NaiveDate, hours_worked: Decimal, travel_time: Decimal) -> EngineResult<Self> {
        let record = Self {
            date,
            hours_worked,
            travel_time,
        };
        record.validate()?;
        Ok(record)
    }

    /// Returns the zero-valued record used when nothing was logged for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            hours_worked: Decimal::ZERO,
            travel_time: Decimal::ZERO,
        }
    }

    /// Checks that both quantities lie within `0..=24` hours.
    pub fn validate(&self) -> EngineResult<()> {
        self.check_hours("hours worked", self.hours_worked)?;
        self.check_hours("travel time", self.travel_time)
    }

    fn check_hours(&self, what: &str, value: Decimal) -> EngineResult<()> {
        let message = if value.is_sign_negative() && !value.is_zero() {
            format!("{} cannot be negative ({})", what, value)
        } else if value > Self::MAX_DAILY_HOURS {
            format!("{} cannot exceed {} hours ({})", what, Self::MAX_DAILY_HOURS, value)
        } else {
            return Ok(());
        };
        Err(EngineError::InvalidRecord {
            date: self.date,
            message,
        })
    }

    /// Returns the ISO `YYYY-MM-DD` key this record is stored under.
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
