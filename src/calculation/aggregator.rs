//! Pay period aggregation.
//!
//! This module sums daily records over a date range into [`PeriodTotals`].
//! The range is split into seven-day chunks anchored to its start, overtime
//! is decided per chunk, and pay is computed once from the summed hours.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::{OVERTIME_MULTIPLIER, partition_into_weeks, split_weekly_overtime};
use crate::models::{ChunkTotals, DailyRecord, PeriodTotals, Settings};

/// Range totals together with the per-chunk breakdown they were built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Hour and pay totals for the whole range.
    pub totals: PeriodTotals,
    /// One entry per seven-day chunk, in date order.
    pub weeks: Vec<ChunkTotals>,
}

/// Aggregates daily records over `range_start..=range_end`.
///
/// Days without a record contribute zero. Records outside the range are
/// ignored. An inverted range (end before start) gives empty totals.
///
/// # Arguments
///
/// * `range_start` - First day of the range (inclusive)
/// * `range_end` - Last day of the range (inclusive)
/// * `records` - Daily records keyed by date
/// * `settings` - Supplies the pay rate and travel rate
///
/// # Returns
///
/// A [`PeriodTotals`] where:
/// - `regular_pay` = regular hours × pay rate
/// - `overtime_pay` = overtime hours × pay rate × 1.5
/// - `travel_pay` = travel hours × travel rate
/// - `gross_pay` = the sum of the three
///
/// # Example
///
/// ```
/// use paycheck_engine::calculation::aggregate;
/// use paycheck_engine::models::{DailyRecord, Settings};
/// use chrono::{Days, NaiveDate};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
/// use std::str::FromStr;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 19).unwrap();
/// let settings = Settings::defaults(start);
///
/// // 9 hours a day, Monday to Friday of the first week: 45 hours.
/// let mut records = BTreeMap::new();
/// for offset in 0..5 {
///     let date = start.checked_add_days(Days::new(offset)).unwrap();
///     records.insert(date, DailyRecord::new(date, Decimal::from(9), Decimal::ZERO).unwrap());
/// }
///
/// let totals = aggregate(start, end, &records, &settings);
/// assert_eq!(totals.regular_hours, Decimal::from(40));
/// assert_eq!(totals.overtime_hours, Decimal::from(5));
/// assert_eq!(totals.overtime_pay, Decimal::from_str("150").unwrap());
/// assert_eq!(totals.gross_pay, Decimal::from_str("950").unwrap());
/// ```
pub fn aggregate(
    range_start: NaiveDate,
    range_end: NaiveDate,
    records: &BTreeMap<NaiveDate, DailyRecord>,
    settings: &Settings,
) -> PeriodTotals {
    aggregate_detailed(range_start, range_end, records, settings).totals
}

/// Same as [`aggregate`], but also returns the per-chunk breakdown.
pub fn aggregate_detailed(
    range_start: NaiveDate,
    range_end: NaiveDate,
    records: &BTreeMap<NaiveDate, DailyRecord>,
    settings: &Settings,
) -> AggregateResult {
    if range_end < range_start {
        debug!(
            range_start = %range_start,
            range_end = %range_end,
            "Inverted range, returning empty totals"
        );
        return AggregateResult::default();
    }

    let mut totals = PeriodTotals::default();
    let mut weeks = Vec::new();

    for chunk in partition_into_weeks(range_start, range_end) {
        let (hours, travel) = records
            .range(chunk.start_date..=chunk.end_date)
            .fold((Decimal::ZERO, Decimal::ZERO), |(hours, travel), (_, record)| {
                (hours + record.hours_worked, travel + record.travel_time)
            });

        let split = split_weekly_overtime(hours);

        totals.total_hours += hours;
        totals.regular_hours += split.regular_hours;
        totals.overtime_hours += split.overtime_hours;
        totals.total_travel += travel;

        weeks.push(ChunkTotals {
            chunk,
            hours,
            travel,
            regular_hours: split.regular_hours,
            overtime_hours: split.overtime_hours,
        });
    }

    totals.regular_pay = totals.regular_hours * settings.pay_rate;
    totals.overtime_pay = totals.overtime_hours * settings.pay_rate * OVERTIME_MULTIPLIER;
    totals.travel_pay = totals.total_travel * settings.travel_rate;
    totals.gross_pay = totals.regular_pay + totals.overtime_pay + totals.travel_pay;

    debug!(
        range_start = %range_start,
        range_end = %range_end,
        chunks = weeks.len(),
        total_hours = %totals.total_hours,
        overtime_hours = %totals.overtime_hours,
        gross_pay = %totals.gross_pay,
        "Aggregated range"
    );

    AggregateResult { totals, weeks }
}
