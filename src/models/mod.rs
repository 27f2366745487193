//! Core data models for the paycheck engine.
//!
//! This module contains the domain models shared by the calculation core,
//! the storage layer, and the HTTP API.

mod daily_record;
mod pay_period;
mod period_totals;
mod settings;
mod summary;

pub use daily_record::DailyRecord;
pub use pay_period::{PayPeriod, WeekChunk};
pub use period_totals::{ChunkTotals, PeriodTotals};
pub use settings::Settings;
pub use summary::{DashboardSummary, PaycheckSummary, WeekSummary, Withholding};
