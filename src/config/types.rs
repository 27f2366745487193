//! Configuration types for the settings file.
//!
//! [`RawSettings`] is the on-disk and over-the-wire shape of the settings:
//! every field is optional, and both `snake_case` and the older `camelCase`
//! field names are accepted. It is turned into a validated
//! [`Settings`](crate::models::Settings) either strictly or leniently.

use std::fmt::Display;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::parse_anchor_date;
use crate::error::{EngineError, EngineResult};
use crate::models::Settings;

/// Settings as read from a file or request body, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSettings {
    /// Hourly pay rate.
    #[serde(default, alias = "payRate", skip_serializing_if = "Option::is_none")]
    pub pay_rate: Option<Decimal>,
    /// Hourly travel rate.
    #[serde(default, alias = "travelRate", skip_serializing_if = "Option::is_none")]
    pub travel_rate: Option<Decimal>,
    /// Pay period length in days. Signed so that bad values can be reported.
    #[serde(
        default,
        alias = "payPeriodDays",
        skip_serializing_if = "Option::is_none"
    )]
    pub pay_period_days: Option<i64>,
    /// Pay period anchor as written, parsed on resolution.
    #[serde(
        default,
        alias = "payPeriodStartDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub pay_period_start_date: Option<String>,
    /// Withholding percentage.
    #[serde(
        default,
        alias = "withholdingPercentage",
        skip_serializing_if = "Option::is_none"
    )]
    pub withholding_percentage: Option<Decimal>,
    /// Payday delay in days.
    #[serde(default, alias = "paydayDelay", skip_serializing_if = "Option::is_none")]
    pub payday_delay: Option<i64>,
}

impl RawSettings {
    /// Reads each known field of a YAML mapping on its own.
    ///
    /// A field whose value has the wrong type is logged and left unset, so
    /// one bad entry does not discard the rest of the file. Anything that is
    /// not a mapping reads as all fields unset.
    pub fn from_yaml_lenient(value: &serde_yaml::Value) -> Self {
        Self {
            pay_rate: lenient_field(value, "pay_rate", "payRate"),
            travel_rate: lenient_field(value, "travel_rate", "travelRate"),
            pay_period_days: lenient_field(value, "pay_period_days", "payPeriodDays"),
            pay_period_start_date: lenient_field(
                value,
                "pay_period_start_date",
                "payPeriodStartDate",
            ),
            withholding_percentage: lenient_field(
                value,
                "withholding_percentage",
                "withholdingPercentage",
            ),
            payday_delay: lenient_field(value, "payday_delay", "paydayDelay"),
        }
    }

    /// Applies defaults to missing fields and rejects the first invalid one.
    ///
    /// A missing anchor defaults to `today`. Used when saving settings, where
    /// bad input should be reported back rather than silently replaced.
    ///
    /// # Example
    ///
    /// ```
    /// use paycheck_engine::config::RawSettings;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    /// let raw: RawSettings = serde_json::from_str(r#"{"payRate": 25}"#).unwrap();
    ///
    /// let settings = raw.into_settings(today).unwrap();
    /// assert_eq!(settings.pay_rate, Decimal::from(25));
    /// assert_eq!(settings.pay_period_days, 14);
    ///
    /// let bad: RawSettings = serde_json::from_str(r#"{"payPeriodDays": 0}"#).unwrap();
    /// assert!(bad.into_settings(today).is_err());
    /// ```
    pub fn into_settings(&self, today: NaiveDate) -> EngineResult<Settings> {
        Ok(Settings {
            pay_rate: non_negative_rate("pay_rate", self.pay_rate, Settings::DEFAULT_PAY_RATE)?,
            travel_rate: non_negative_rate(
                "travel_rate",
                self.travel_rate,
                Settings::DEFAULT_TRAVEL_RATE,
            )?,
            pay_period_days: period_days(self.pay_period_days)?,
            pay_period_start_date: anchor_date(self.pay_period_start_date.as_deref(), today)?,
            withholding_percentage: percentage(self.withholding_percentage)?,
            payday_delay: payday_delay(self.payday_delay)?,
        })
    }

    /// Applies defaults to missing fields and replaces invalid ones.
    ///
    /// Never fails. Each rejected field is logged at `warn` and falls back to
    /// its default; an unparseable anchor falls back to `today`.
    pub fn into_settings_or_default(&self, today: NaiveDate) -> Settings {
        let defaults = Settings::defaults(today);
        Settings {
            pay_rate: or_default(
                non_negative_rate("pay_rate", self.pay_rate, defaults.pay_rate),
                defaults.pay_rate,
            ),
            travel_rate: or_default(
                non_negative_rate("travel_rate", self.travel_rate, defaults.travel_rate),
                defaults.travel_rate,
            ),
            pay_period_days: or_default(period_days(self.pay_period_days), defaults.pay_period_days),
            pay_period_start_date: or_default(
                anchor_date(self.pay_period_start_date.as_deref(), today),
                defaults.pay_period_start_date,
            ),
            withholding_percentage: or_default(
                percentage(self.withholding_percentage),
                defaults.withholding_percentage,
            ),
            payday_delay: or_default(payday_delay(self.payday_delay), defaults.payday_delay),
        }
    }
}

impl From<&Settings> for RawSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            pay_rate: Some(settings.pay_rate),
            travel_rate: Some(settings.travel_rate),
            pay_period_days: Some(i64::from(settings.pay_period_days)),
            pay_period_start_date: Some(settings.pay_period_start_date.format("%Y-%m-%d").to_string()),
            withholding_percentage: Some(settings.withholding_percentage),
            payday_delay: Some(i64::from(settings.payday_delay)),
        }
    }
}

fn lenient_field<T: DeserializeOwned>(
    value: &serde_yaml::Value,
    name: &str,
    alias: &str,
) -> Option<T> {
    let field = value.get(name).or_else(|| value.get(alias))?;
    if field.is_null() {
        return None;
    }
    match serde_yaml::from_value(field.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(field = name, error = %err, "Ignoring mistyped setting");
            None
        }
    }
}

fn or_default<T: Display>(result: EngineResult<T>, default: T) -> T {
    result.unwrap_or_else(|err| {
        warn!(error = %err, fallback = %default, "Invalid setting replaced with default");
        default
    })
}

fn non_negative_rate(field: &str, value: Option<Decimal>, default: Decimal) -> EngineResult<Decimal> {
    match value {
        None => Ok(default),
        Some(rate) if rate < Decimal::ZERO => Err(invalid(field, format!("{} is negative", rate))),
        Some(rate) if rate > Settings::MAX_HOURLY_RATE => Err(invalid(
            field,
            format!("{} exceeds {}", rate, Settings::MAX_HOURLY_RATE),
        )),
        Some(rate) => Ok(rate),
    }
}

fn period_days(value: Option<i64>) -> EngineResult<u32> {
    match value {
        None => Ok(Settings::DEFAULT_PAY_PERIOD_DAYS),
        Some(days) if days < 1 => Err(EngineError::InvalidPeriodLength { days }),
        Some(days) => u32::try_from(days)
            .map_err(|_| invalid("pay_period_days", format!("{} is too large", days))),
    }
}

fn anchor_date(value: Option<&str>, today: NaiveDate) -> EngineResult<NaiveDate> {
    match value {
        None => Ok(today),
        Some(raw) => parse_anchor_date(raw),
    }
}

fn percentage(value: Option<Decimal>) -> EngineResult<Decimal> {
    match value {
        None => Ok(Settings::DEFAULT_WITHHOLDING_PERCENTAGE),
        Some(pct) if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED => Err(invalid(
            "withholding_percentage",
            format!("{} is not between 0 and 100", pct),
        )),
        Some(pct) => Ok(pct),
    }
}

fn payday_delay(value: Option<i64>) -> EngineResult<u32> {
    match value {
        None => Ok(Settings::DEFAULT_PAYDAY_DELAY),
        Some(days) => u32::try_from(days)
            .map_err(|_| invalid("payday_delay", format!("{} is out of range", days))),
    }
}

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidSettings {
        field: field.to_string(),
        message,
    }
}
