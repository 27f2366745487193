//! Aggregated hour and pay totals.
//!
//! [`PeriodTotals`] is the derived aggregate for any date range. It is never
//! persisted; it is recomputed from daily records and settings on demand.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WeekChunk;

/// Hour and pay totals for a date range.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::PeriodTotals;
/// use rust_decimal::Decimal;
///
/// let totals = PeriodTotals::default();
/// assert_eq!(totals.gross_pay, Decimal::ZERO);
/// assert!(totals.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Total hours worked (regular plus overtime).
    pub total_hours: Decimal,
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Total travel hours.
    pub total_travel: Decimal,
    /// Regular hours multiplied by the pay rate.
    pub regular_pay: Decimal,
    /// Overtime hours multiplied by 1.5 times the pay rate.
    pub overtime_pay: Decimal,
    /// Travel hours multiplied by the travel rate.
    pub travel_pay: Decimal,
    /// Regular, overtime, and travel pay combined, before withholding.
    pub gross_pay: Decimal,
}

impl PeriodTotals {
    /// Returns true when no hours or travel were recorded in the range.
    pub fn is_empty(&self) -> bool {
        self.total_hours.is_zero() && self.total_travel.is_zero()
    }
}

/// Hour totals for one weekly chunk of a range.
///
/// Overtime is decided per chunk: hours beyond the weekly threshold inside
/// this chunk are overtime, regardless of the rest of the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkTotals {
    /// The days this chunk covers.
    pub chunk: WeekChunk,
    /// Hours worked across the chunk.
    pub hours: Decimal,
    /// Travel hours across the chunk.
    pub travel: Decimal,
    /// Hours up to the weekly threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the weekly threshold.
    pub overtime_hours: Decimal,
}
