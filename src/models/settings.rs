//! Pay settings model.
//!
//! [`Settings`] is the validated, fully-defaulted configuration every
//! calculation reads. The on-disk shape, where every field is optional, lives
//! in [`crate::config::RawSettings`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PayPeriod;

/// Pay parameters for the timesheet owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Hourly pay rate for time worked.
    pub pay_rate: Decimal,
    /// Hourly rate paid for travel time.
    pub travel_rate: Decimal,
    /// Length of a pay period in days (at least 1).
    pub pay_period_days: u32,
    /// Any date that falls on a pay period boundary.
    pub pay_period_start_date: NaiveDate,
    /// Flat percentage of gross pay withheld, in `[0, 100]`.
    pub withholding_percentage: Decimal,
    /// Days after a period ends until the funds arrive.
    pub payday_delay: u32,
}

impl Settings {
    /// Default hourly pay rate (20.00).
    pub const DEFAULT_PAY_RATE: Decimal = Decimal::from_parts(2000, 0, 0, false, 2);
    /// Default hourly travel rate (15.00).
    pub const DEFAULT_TRAVEL_RATE: Decimal = Decimal::from_parts(1500, 0, 0, false, 2);
    /// Default pay period length in days.
    pub const DEFAULT_PAY_PERIOD_DAYS: u32 = 14;
    /// Default withholding percentage.
    pub const DEFAULT_WITHHOLDING_PERCENTAGE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
    /// Default payday delay in days.
    pub const DEFAULT_PAYDAY_DELAY: u32 = 3;
    /// Highest hourly pay or travel rate accepted.
    pub const MAX_HOURLY_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

    /// Returns the default settings, anchored on `today`.
    ///
    /// # Example
    ///
    /// ```
    /// use paycheck_engine::models::Settings;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    /// let settings = Settings::defaults(today);
    /// assert_eq!(settings.pay_period_days, 14);
    /// assert_eq!(settings.pay_period_start_date, today);
    /// assert!(settings.validate().is_ok());
    /// ```
    pub fn defaults(today: NaiveDate) -> Self {
        Self {
            pay_rate: Self::DEFAULT_PAY_RATE,
            travel_rate: Self::DEFAULT_TRAVEL_RATE,
            pay_period_days: Self::DEFAULT_PAY_PERIOD_DAYS,
            pay_period_start_date: today,
            withholding_percentage: Self::DEFAULT_WITHHOLDING_PERCENTAGE,
            payday_delay: Self::DEFAULT_PAYDAY_DELAY,
        }
    }

    /// Checks every field against its permitted range.
    ///
    /// Returns the first violation as [`EngineError::InvalidSettings`].
    pub fn validate(&self) -> EngineResult<()> {
        if self.pay_rate < Decimal::ZERO {
            return Err(invalid("pay_rate", "must not be negative"));
        }
        if self.pay_rate > Self::MAX_HOURLY_RATE {
            return Err(invalid("pay_rate", "must not exceed 1000000"));
        }
        if self.travel_rate < Decimal::ZERO {
            return Err(invalid("travel_rate", "must not be negative"));
        }
        if self.travel_rate > Self::MAX_HOURLY_RATE {
            return Err(invalid("travel_rate", "must not exceed 1000000"));
        }
        if self.pay_period_days < 1 {
            return Err(invalid("pay_period_days", "must be at least 1"));
        }
        if self.withholding_percentage < Decimal::ZERO
            || self.withholding_percentage > Decimal::ONE_HUNDRED
        {
            return Err(invalid(
                "withholding_percentage",
                "must be between 0 and 100",
            ));
        }
        Ok(())
    }

    /// Returns the period length as the signed day count the calculators take.
    pub fn period_length(&self) -> i64 {
        i64::from(self.pay_period_days)
    }

    /// Returns the period that starts exactly on the configured anchor.
    pub fn anchor_period(&self) -> PayPeriod {
        let end_date = self
            .pay_period_start_date
            .checked_add_days(chrono::Days::new(u64::from(self.pay_period_days.max(1)) - 1))
            .unwrap_or(NaiveDate::MAX);
        PayPeriod {
            start_date: self.pay_period_start_date,
            end_date,
        }
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidSettings {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let settings = Settings::defaults(today());
        assert_eq!(settings.pay_rate, dec("20.00"));
        assert_eq!(settings.travel_rate, dec("15.00"));
        assert_eq!(settings.pay_period_days, 14);
        assert_eq!(settings.pay_period_start_date, today());
        assert_eq!(settings.withholding_percentage, dec("20"));
        assert_eq!(settings.payday_delay, 3);
    }

    #[test]
    fn test_validate_rejects_negative_pay_rate() {
        let mut settings = Settings::defaults(today());
        settings.pay_rate = dec("-1");
        match settings.validate() {
            Err(EngineError::InvalidSettings { field, .. }) => assert_eq!(field, "pay_rate"),
            _ => panic!("Expected InvalidSettings error"),
        }
    }

    #[test]
    fn test_validate_rejects_oversized_rates() {
        let mut settings = Settings::defaults(today());
        settings.pay_rate = Settings::MAX_HOURLY_RATE;
        assert!(settings.validate().is_ok());

        settings.travel_rate = dec("1000000.01");
        match settings.validate() {
            Err(EngineError::InvalidSettings { field, .. }) => assert_eq!(field, "travel_rate"),
            _ => panic!("Expected InvalidSettings error"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_period_length() {
        let mut settings = Settings::defaults(today());
        settings.pay_period_days = 0;
        match settings.validate() {
            Err(EngineError::InvalidSettings { field, .. }) => {
                assert_eq!(field, "pay_period_days")
            }
            _ => panic!("Expected InvalidSettings error"),
        }
    }

    #[test]
    fn test_validate_withholding_bounds() {
        let mut settings = Settings::defaults(today());
        settings.withholding_percentage = dec("100");
        assert!(settings.validate().is_ok());
        settings.withholding_percentage = dec("0");
        assert!(settings.validate().is_ok());
        settings.withholding_percentage = dec("100.01");
        assert!(settings.validate().is_err());
        settings.withholding_percentage = dec("-0.5");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_anchor_period_spans_period_length() {
        let settings = Settings::defaults(today());
        let period = settings.anchor_period();
        assert_eq!(period.start_date, today());
        assert_eq!(
            period.end_date,
            NaiveDate::from_ymd_opt(2025, 1, 19).unwrap()
        );
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::defaults(today());
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"pay_rate\":\"20.00\""));
        assert!(json.contains("\"pay_period_days\":14"));
        assert!(json.contains("\"pay_period_start_date\":\"2025-01-06\""));

        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
