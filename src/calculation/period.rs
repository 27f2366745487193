//! Pay period date arithmetic.
//!
//! Pay periods tile the calendar forwards and backwards from an anchor date
//! with no gaps or overlaps: period *n* starts at `anchor + n * length` for
//! any integer *n*. Every function here works on [`NaiveDate`] values, so a
//! time-of-day component can never leak into the arithmetic.

use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, Settings};

/// Returns the calendar day an instant falls on, in the instant's own time zone.
///
/// This is the only place instants enter the engine; everything downstream
/// works with whole days.
///
/// # Example
///
/// ```
/// use paycheck_engine::calculation::day_of;
/// use chrono::{DateTime, NaiveDate};
///
/// // 23:30 on the 6th at UTC-5 is already the 7th in UTC, but the local day is the 6th.
/// let instant = DateTime::parse_from_rfc3339("2025-01-06T23:30:00-05:00").unwrap();
/// assert_eq!(day_of(&instant), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
/// ```
pub fn day_of<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

/// Returns today's date in the local time zone.
pub fn local_today() -> NaiveDate {
    day_of(&Local::now())
}

/// Parses a pay period anchor date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp which is reduced to its
/// calendar day. Anything else is a configuration error.
///
/// # Example
///
/// ```
/// use paycheck_engine::calculation::parse_anchor_date;
/// use chrono::NaiveDate;
///
/// let anchor = parse_anchor_date("2025-01-06").unwrap();
/// assert_eq!(anchor, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
///
/// assert!(parse_anchor_date("undefined").is_err());
/// ```
pub fn parse_anchor_date(raw: &str) -> EngineResult<NaiveDate> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|instant| day_of(&instant))
        .map_err(|_| EngineError::InvalidAnchorDate {
            value: raw.to_string(),
        })
}

/// Finds the pay period that contains `date`.
///
/// `date` may fall before the anchor. The number of elapsed periods is
/// floored, never truncated, so a date one day before the anchor resolves to
/// the period ending the day before the anchor.
///
/// # Arguments
///
/// * `date` - Any calendar date
/// * `anchor_date` - A date known to start a pay period
/// * `period_length_days` - The pay period length in days
///
/// # Returns
///
/// The containing [`PayPeriod`], or an error if:
/// - `period_length_days` is zero or negative ([`EngineError::InvalidPeriodLength`])
/// - the period would fall outside the representable date range
///
/// # Examples
///
/// ```
/// use paycheck_engine::calculation::period_containing;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
///
/// let period = period_containing(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(), anchor, 14).unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 1, 19).unwrap());
///
/// // Dates before the anchor land in earlier periods.
/// let earlier = period_containing(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(), anchor, 14).unwrap();
/// assert_eq!(earlier.start_date, NaiveDate::from_ymd_opt(2024, 12, 23).unwrap());
/// assert_eq!(earlier.end_date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
/// ```
pub fn period_containing(
    date: NaiveDate,
    anchor_date: NaiveDate,
    period_length_days: i64,
) -> EngineResult<PayPeriod> {
    if period_length_days <= 0 {
        return Err(EngineError::InvalidPeriodLength {
            days: period_length_days,
        });
    }

    let days_since_anchor = (date - anchor_date).num_days();
    let periods_passed = days_since_anchor.div_euclid(period_length_days);
    let offset = periods_passed
        .checked_mul(period_length_days)
        .ok_or_else(|| out_of_range(anchor_date, periods_passed))?;

    let start_date = shift_days(anchor_date, offset)?;
    let end_date = shift_days(start_date, period_length_days - 1)?;

    Ok(PayPeriod {
        start_date,
        end_date,
    })
}

/// Returns the period immediately before the one starting on `period_start`.
///
/// # Example
///
/// ```
/// use paycheck_engine::calculation::previous_period;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let previous = previous_period(start, 14).unwrap();
/// assert_eq!(previous.start_date, NaiveDate::from_ymd_opt(2024, 12, 23).unwrap());
/// assert_eq!(previous.end_date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
/// ```
pub fn previous_period(period_start: NaiveDate, period_length_days: i64) -> EngineResult<PayPeriod> {
    shifted_period(period_start, period_length_days, -1)
}

/// Returns the period immediately after the one starting on `period_start`.
pub fn next_period(period_start: NaiveDate, period_length_days: i64) -> EngineResult<PayPeriod> {
    shifted_period(period_start, period_length_days, 1)
}

/// Returns the period containing `today` under the given settings.
pub fn current_pay_period(settings: &Settings, today: NaiveDate) -> EngineResult<PayPeriod> {
    period_containing(
        today,
        settings.pay_period_start_date,
        settings.period_length(),
    )
}

/// Resolves the period containing `date` from a raw, possibly bad, anchor.
///
/// On a configuration error the anchor is replaced with `today` and the
/// lookup is retried exactly once. If the retry fails as well, `None` is
/// returned and callers show zero totals.
///
/// # Example
///
/// ```
/// use paycheck_engine::calculation::resolve_pay_period;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
///
/// // A corrupt anchor falls back to today, which then starts the period.
/// let period = resolve_pay_period(today, Some("not-a-date"), 14, today).unwrap();
/// assert_eq!(period.start_date, today);
///
/// // A bad period length cannot be fixed by a new anchor.
/// assert!(resolve_pay_period(today, Some("2025-01-06"), 0, today).is_none());
/// ```
pub fn resolve_pay_period(
    date: NaiveDate,
    anchor_raw: Option<&str>,
    period_length_days: i64,
    today: NaiveDate,
) -> Option<PayPeriod> {
    let first_attempt = anchor_raw
        .ok_or_else(|| EngineError::InvalidAnchorDate {
            value: String::new(),
        })
        .and_then(parse_anchor_date)
        .and_then(|anchor| period_containing(date, anchor, period_length_days));

    match first_attempt {
        Ok(period) => Some(period),
        Err(err) if err.is_configuration_error() => {
            warn!(
                error = %err,
                fallback_anchor = %today,
                "Pay period anchor rejected, retrying with today"
            );
            match period_containing(date, today, period_length_days) {
                Ok(period) => Some(period),
                Err(retry_err) => {
                    warn!(error = %retry_err, "Pay period could not be resolved");
                    None
                }
            }
        }
        Err(err) => {
            warn!(error = %err, "Pay period could not be resolved");
            None
        }
    }
}

fn shifted_period(
    period_start: NaiveDate,
    period_length_days: i64,
    direction: i64,
) -> EngineResult<PayPeriod> {
    if period_length_days <= 0 {
        return Err(EngineError::InvalidPeriodLength {
            days: period_length_days,
        });
    }

    let start_date = shift_days(period_start, direction * period_length_days)?;
    let end_date = shift_days(start_date, period_length_days - 1)?;

    Ok(PayPeriod {
        start_date,
        end_date,
    })
}

/// Moves `date` by a signed number of days.
fn shift_days(date: NaiveDate, days: i64) -> EngineResult<NaiveDate> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| out_of_range(date, days))
}

fn out_of_range(date: NaiveDate, days: i64) -> EngineError {
    EngineError::DateOutOfRange {
        message: format!("{} shifted by {} days", date, days),
    }
}
