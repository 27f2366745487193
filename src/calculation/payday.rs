//! Days-until-payday countdown.

use chrono::NaiveDate;
use tracing::warn;

use crate::calculation::period_containing;
use crate::models::PayPeriod;

/// Counts the days until the pay for `today`'s period arrives.
///
/// The count is `(period end - today) + 1 + payday_delay`, clamped at zero.
/// The `+ 1` counts the end date as a full working day, so the last day of a
/// period returns `1 + payday_delay`.
///
/// A missing anchor or a non-positive period length returns 0, which callers
/// render as "unknown".
///
/// # Arguments
///
/// * `anchor_date` - A date known to start a pay period, if one is configured
/// * `period_length_days` - The pay period length in days
/// * `payday_delay` - Days after the period end until the funds arrive
/// * `today` - The current calendar day
///
/// # Examples
///
/// ```
/// use paycheck_engine::calculation::days_until_payday;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
///
/// // First day of a 14-day period, no delay.
/// assert_eq!(days_until_payday(Some(anchor), 14, 0, anchor), 14);
///
/// // Last day of the period, three-day delay.
/// let last_day = NaiveDate::from_ymd_opt(2025, 1, 19).unwrap();
/// assert_eq!(days_until_payday(Some(anchor), 14, 3, last_day), 4);
///
/// // Unknown anchor.
/// assert_eq!(days_until_payday(None, 14, 3, last_day), 0);
/// ```
pub fn days_until_payday(
    anchor_date: Option<NaiveDate>,
    period_length_days: i64,
    payday_delay: u32,
    today: NaiveDate,
) -> u32 {
    let Some(anchor_date) = anchor_date else {
        warn!("No pay period anchor configured, payday unknown");
        return 0;
    };

    match period_containing(today, anchor_date, period_length_days) {
        Ok(period) => days_until_payday_for_period(&period, payday_delay, today),
        Err(err) => {
            warn!(error = %err, "Payday could not be computed");
            0
        }
    }
}

/// Counts the days until payday for an already-resolved period.
///
/// `today` may lie after the period end, in which case the count shrinks
/// towards zero but never goes negative.
pub fn days_until_payday_for_period(period: &PayPeriod, payday_delay: u32, today: NaiveDate) -> u32 {
    let days = (period.end_date - today).num_days() + 1 + i64::from(payday_delay);
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn anchor() -> Option<NaiveDate> {
        Some(date(2025, 1, 6))
    }

    #[test]
    fn test_mid_period() {
        // 2025-01-15 → period ends 2025-01-19: 4 days + 1.
        assert_eq!(days_until_payday(anchor(), 14, 0, date(2025, 1, 15)), 5);
    }

    #[test]
    fn test_last_day_of_period_is_one_plus_delay() {
        assert_eq!(days_until_payday(anchor(), 14, 0, date(2025, 1, 19)), 1);
        assert_eq!(days_until_payday(anchor(), 14, 3, date(2025, 1, 19)), 4);
    }

    #[test]
    fn test_first_day_of_next_period_restarts_countdown() {
        assert_eq!(days_until_payday(anchor(), 14, 3, date(2025, 1, 20)), 17);
    }

    #[test]
    fn test_date_before_anchor() {
        // 2025-01-01 is in [2024-12-23, 2025-01-05].
        assert_eq!(days_until_payday(anchor(), 14, 0, date(2025, 1, 1)), 5);
    }

    #[test]
    fn test_missing_anchor_returns_zero() {
        assert_eq!(days_until_payday(None, 14, 3, date(2025, 1, 15)), 0);
    }

    #[test]
    fn test_invalid_period_length_returns_zero() {
        assert_eq!(days_until_payday(anchor(), 0, 3, date(2025, 1, 15)), 0);
        assert_eq!(days_until_payday(anchor(), -14, 3, date(2025, 1, 15)), 0);
    }

    #[test]
    fn test_day_after_period_end_clamps_to_delay() {
        let period = PayPeriod {
            start_date: date(2025, 1, 6),
            end_date: date(2025, 1, 19),
        };
        assert_eq!(days_until_payday_for_period(&period, 3, date(2025, 1, 20)), 3);
    }

    #[test]
    fn test_long_after_period_end_clamps_to_zero() {
        let period = PayPeriod {
            start_date: date(2025, 1, 6),
            end_date: date(2025, 1, 19),
        };
        assert_eq!(days_until_payday_for_period(&period, 3, date(2025, 3, 1)), 0);
    }
}
