//! View-level summaries built on top of [`PeriodTotals`].
//!
//! These are the values the paycheck, weekly, and dashboard views render.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ChunkTotals, PayPeriod, PeriodTotals};

/// Gross pay split into the withheld amount and the take-home amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withholding {
    /// Amount withheld from gross pay.
    pub withholdings: Decimal,
    /// Gross pay minus withholdings.
    pub net_pay: Decimal,
}

/// The paycheck estimate for one pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaycheckSummary {
    /// The pay period being summarised.
    pub pay_period: PayPeriod,
    /// Hour and pay totals for the period.
    pub totals: PeriodTotals,
    /// Amount withheld from gross pay.
    pub withholdings: Decimal,
    /// Estimated take-home pay.
    pub net_pay: Decimal,
    /// Per-chunk regular/overtime split, in order.
    pub weeks: Vec<ChunkTotals>,
}

/// Totals for one Monday-to-Sunday week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// The Monday the week starts on.
    pub week_start: NaiveDate,
    /// The Sunday the week ends on.
    pub week_end: NaiveDate,
    /// Hour and pay totals for the week.
    pub totals: PeriodTotals,
}

/// Everything the dashboard shows at a glance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// The week containing today.
    pub current_week: WeekSummary,
    /// The week before the current one.
    pub last_week: WeekSummary,
    /// Current week gross pay after withholding.
    pub current_week_net_pay: Decimal,
    /// The pay period containing today, when it could be resolved.
    pub pay_period: Option<PayPeriod>,
    /// Days until the current period's funds arrive; 0 when unknown.
    pub days_until_payday: u32,
}
