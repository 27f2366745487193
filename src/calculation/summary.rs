//! Paycheck and dashboard summaries.
//!
//! These functions compose period resolution, aggregation, and withholding
//! into the values the paycheck and dashboard views display.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use crate::calculation::{
    aggregate_detailed, apply_withholding, current_pay_period, days_until_payday,
    period_containing, previous_period, week_totals,
};
use crate::error::EngineResult;
use crate::models::{DailyRecord, DashboardSummary, PayPeriod, PaycheckSummary, Settings};

/// Builds the paycheck estimate for the pay period containing `date`.
///
/// # Errors
///
/// Fails only when the period cannot be represented (dates near the limits
/// of the calendar) or the settings carry a zero period length.
///
/// # Example
///
/// ```
/// use paycheck_engine::calculation::paycheck_summary;
/// use paycheck_engine::models::{DailyRecord, Settings};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let anchor = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let settings = Settings::defaults(anchor);
///
/// let mut records = BTreeMap::new();
/// records.insert(anchor, DailyRecord::new(anchor, Decimal::from(10), Decimal::ZERO).unwrap());
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let summary = paycheck_summary(date, &records, &settings).unwrap();
/// assert_eq!(summary.pay_period.start_date, anchor);
/// assert_eq!(summary.totals.gross_pay, Decimal::from(200));
/// assert_eq!(summary.net_pay, Decimal::from(160));
/// assert_eq!(summary.weeks.len(), 2);
/// ```
pub fn paycheck_summary(
    date: NaiveDate,
    records: &BTreeMap<NaiveDate, DailyRecord>,
    settings: &Settings,
) -> EngineResult<PaycheckSummary> {
    let period = period_containing(date, settings.pay_period_start_date, settings.period_length())?;
    Ok(summarize_period(period, records, settings))
}

/// Builds the paycheck estimate for the period before the one containing `date`.
pub fn previous_paycheck_summary(
    date: NaiveDate,
    records: &BTreeMap<NaiveDate, DailyRecord>,
    settings: &Settings,
) -> EngineResult<PaycheckSummary> {
    let current = period_containing(date, settings.pay_period_start_date, settings.period_length())?;
    let previous = previous_period(current.start_date, settings.period_length())?;
    Ok(summarize_period(previous, records, settings))
}

/// Totals, withholding, and per-chunk breakdown for a resolved period.
pub fn summarize_period(
    period: PayPeriod,
    records: &BTreeMap<NaiveDate, DailyRecord>,
    settings: &Settings,
) -> PaycheckSummary {
    let result = aggregate_detailed(period.start_date, period.end_date, records, settings);
    let withholding = apply_withholding(result.totals.gross_pay, settings.withholding_percentage);

    debug!(
        period_start = %period.start_date,
        period_end = %period.end_date,
        gross_pay = %result.totals.gross_pay,
        net_pay = %withholding.net_pay,
        "Summarised pay period"
    );

    PaycheckSummary {
        pay_period: period,
        totals: result.totals,
        withholdings: withholding.withholdings,
        net_pay: withholding.net_pay,
        weeks: result.weeks,
    }
}

/// Builds the dashboard view for `today`.
///
/// Shows the current and previous Monday-to-Sunday weeks, the current week's
/// net pay, and the payday countdown for the current pay period. A pay period
/// that cannot be resolved is reported as `None` with a zero countdown rather
/// than an error.
pub fn dashboard_summary(
    today: NaiveDate,
    records: &BTreeMap<NaiveDate, DailyRecord>,
    settings: &Settings,
) -> DashboardSummary {
    let current_week = week_totals(today, records, settings);
    let last_week_day = current_week
        .week_start
        .checked_sub_days(Days::new(1))
        .unwrap_or(NaiveDate::MIN);
    let last_week = week_totals(last_week_day, records, settings);

    let current_week_net_pay =
        apply_withholding(current_week.totals.gross_pay, settings.withholding_percentage).net_pay;

    let pay_period = match current_pay_period(settings, today) {
        Ok(period) => Some(period),
        Err(err) => {
            warn!(error = %err, "Current pay period could not be resolved");
            None
        }
    };

    let days_until_payday = days_until_payday(
        Some(settings.pay_period_start_date),
        settings.period_length(),
        settings.payday_delay,
        today,
    );

    DashboardSummary {
        current_week,
        last_week,
        current_week_net_pay,
        pay_period,
        days_until_payday,
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

    fn settings() -> Settings {
        Settings::defaults(date(2025, 1, 6))
    }

    fn insert(records: &mut BTreeMap<NaiveDate, DailyRecord>, d: NaiveDate, hours: &str, travel: &str) {
        records.insert(d, DailyRecord::new(d, dec(hours), dec(travel)).unwrap());
    }

    #[test]
    fn test_paycheck_summary_applies_withholding() {
        let mut records = BTreeMap::new();
        for day in date(2025, 1, 6).iter_days().take(5) {
            insert(&mut records, day, "9", "1");
        }

        let summary = paycheck_summary(date(2025, 1, 10), &records, &settings()).unwrap();

        // 800 regular + 150 overtime + 75 travel
        assert_eq!(summary.totals.gross_pay, dec("1025"));
        assert_eq!(summary.withholdings, dec("205"));
        assert_eq!(summary.net_pay, dec("820"));
        assert_eq!(summary.weeks[0].overtime_hours, dec("5"));
    }

    #[test]
    fn test_previous_paycheck_summary() {
        let mut records = BTreeMap::new();
        insert(&mut records, date(2024, 12, 23), "8", "0");
        insert(&mut records, date(2025, 1, 6), "8", "0");

        let summary = previous_paycheck_summary(date(2025, 1, 15), &records, &settings()).unwrap();

        assert_eq!(summary.pay_period.start_date, date(2024, 12, 23));
        assert_eq!(summary.pay_period.end_date, date(2025, 1, 5));
        assert_eq!(summary.totals.total_hours, dec("8"));
    }

    #[test]
    fn test_paycheck_summary_rejects_zero_period_length() {
        let mut settings = settings();
        settings.pay_period_days = 0;
        assert!(paycheck_summary(date(2025, 1, 15), &BTreeMap::new(), &settings).is_err());
    }

    #[test]
    fn test_dashboard_summary() {
        let mut records = BTreeMap::new();
        insert(&mut records, date(2025, 1, 8), "8", "0"); // last week
        insert(&mut records, date(2025, 1, 13), "10", "0"); // this week
        insert(&mut records, date(2025, 1, 14), "5", "2");

        let dashboard = dashboard_summary(date(2025, 1, 15), &records, &settings());

        assert_eq!(dashboard.current_week.week_start, date(2025, 1, 13));
        assert_eq!(dashboard.current_week.totals.total_hours, dec("15"));
        assert_eq!(dashboard.last_week.week_start, date(2025, 1, 6));
        assert_eq!(dashboard.last_week.totals.total_hours, dec("8"));
        // (300 + 30) × 0.8
        assert_eq!(dashboard.current_week_net_pay, dec("264"));
        assert_eq!(
            dashboard.pay_period,
            Some(PayPeriod {
                start_date: date(2025, 1, 6),
                end_date: date(2025, 1, 19),
            })
        );
        // 4 days left + 1 + 3 day delay
        assert_eq!(dashboard.days_until_payday, 8);
    }

    #[test]
    fn test_dashboard_with_unresolvable_period() {
        let mut settings = settings();
        settings.pay_period_days = 0;

        let dashboard = dashboard_summary(date(2025, 1, 15), &BTreeMap::new(), &settings);

        assert!(dashboard.pay_period.is_none());
        assert_eq!(dashboard.days_until_payday, 0);
        assert_eq!(dashboard.current_week_net_pay, Decimal::ZERO);
    }
}
