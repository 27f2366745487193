//! Calculation logic for the paycheck engine.
//!
//! This module contains pay period date arithmetic, seven-day partitioning of
//! date ranges, weekly overtime detection, range aggregation into hour and pay
//! totals, the payday countdown, calendar week totals, flat-percentage
//! withholding, and the paycheck and dashboard summaries built from them.
//!
//! Every function here is pure: the result depends only on the arguments.

mod aggregator;
mod payday;
mod period;
mod summary;
mod week_totals;
mod weekly_overtime;
mod weekly_partition;
mod withholding;

pub use aggregator::{AggregateResult, aggregate, aggregate_detailed};
pub use payday::{days_until_payday, days_until_payday_for_period};
pub use period::{
    current_pay_period, day_of, local_today, next_period, parse_anchor_date, period_containing,
    previous_period, resolve_pay_period,
};
pub use summary::{
    dashboard_summary, paycheck_summary, previous_paycheck_summary, summarize_period,
};
pub use week_totals::{week_containing, week_totals};
pub use weekly_overtime::{
    OVERTIME_MULTIPLIER, OvertimeSplit, WEEKLY_OVERTIME_THRESHOLD, split_weekly_overtime,
};
pub use weekly_partition::{CHUNK_LENGTH_DAYS, WeekChunks, partition_into_weeks};
pub use withholding::apply_withholding;
