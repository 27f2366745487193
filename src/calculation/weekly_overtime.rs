//! Weekly overtime detection.
//!
//! Hours worked inside one seven-day chunk are split at the weekly threshold:
//! everything up to it is regular time, everything beyond it is overtime.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hours per chunk paid at the regular rate before overtime starts.
pub const WEEKLY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Multiplier applied to the pay rate for overtime hours (1.5).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Regular and overtime portions of one chunk's hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSplit {
    /// Hours up to the weekly threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the weekly threshold (can be zero).
    pub overtime_hours: Decimal,
}

/// Splits a chunk's hours at [`WEEKLY_OVERTIME_THRESHOLD`].
///
/// A chunk of exactly 40 hours has no overtime. `regular_hours +
/// overtime_hours` always equals `hours`.
///
/// # Examples
///
/// ```
/// use paycheck_engine::calculation::split_weekly_overtime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let split = split_weekly_overtime(Decimal::from_str("45").unwrap());
/// assert_eq!(split.regular_hours, Decimal::from_str("40").unwrap());
/// assert_eq!(split.overtime_hours, Decimal::from_str("5").unwrap());
///
/// let split = split_weekly_overtime(Decimal::from_str("40").unwrap());
/// assert_eq!(split.overtime_hours, Decimal::ZERO);
/// ```
pub fn split_weekly_overtime(hours: Decimal) -> OvertimeSplit {
    if hours > WEEKLY_OVERTIME_THRESHOLD {
        OvertimeSplit {
            regular_hours: WEEKLY_OVERTIME_THRESHOLD,
            overtime_hours: hours - WEEKLY_OVERTIME_THRESHOLD,
        }
    } else {
        OvertimeSplit {
            regular_hours: hours,
            overtime_hours: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_under_threshold_is_all_regular() {
        let split = split_weekly_overtime(dec("38.5"));
        assert_eq!(split.regular_hours, dec("38.5"));
        assert_eq!(split.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_threshold_has_no_overtime() {
        let split = split_weekly_overtime(dec("40.0"));
        assert_eq!(split.regular_hours, dec("40"));
        assert_eq!(split.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_overtime() {
        let split = split_weekly_overtime(dec("40.25"));
        assert_eq!(split.regular_hours, dec("40"));
        assert_eq!(split.overtime_hours, dec("0.25"));
    }

    #[test]
    fn test_zero_hours() {
        let split = split_weekly_overtime(Decimal::ZERO);
        assert_eq!(split.regular_hours, Decimal::ZERO);
        assert_eq!(split.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_split_sums_to_input() {
        for raw in ["0", "12", "39.99", "40", "40.01", "60", "168"] {
            let hours = dec(raw);
            let split = split_weekly_overtime(hours);
            assert_eq!(split.regular_hours + split.overtime_hours, hours);
        }
    }

    #[test]
    fn test_overtime_multiplier_value() {
        assert_eq!(OVERTIME_MULTIPLIER, dec("1.5"));
    }
}
