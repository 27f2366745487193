//! Storage for daily records and settings.
//!
//! The calculators never touch storage; callers read records and settings
//! through a [`TimesheetStore`] and pass plain values in. Two backends are
//! provided:
//!
//! - [`MemoryStore`] keeps everything in memory (tests and embedding)
//! - [`FileStore`] persists to a data directory (`hours.json` and `settings.yaml`)

mod file;
mod memory;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{DailyRecord, Settings};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Trait defining the interface for timesheet storage operations.
///
/// Reads never fail: a missing record reads as zero hours, and missing or
/// corrupt settings read as the defaults. Writes report failures.
pub trait TimesheetStore: Send + Sync {
    /// Returns the record for `date`, or a zero-valued record if none exists.
    fn get_daily_record(&self, date: NaiveDate) -> DailyRecord;

    /// Returns every stored record, ordered by date.
    fn list_all_daily_records(&self) -> BTreeMap<NaiveDate, DailyRecord>;

    /// Returns complete settings, defaulting the anchor to `today` if unset.
    fn get_settings(&self, today: NaiveDate) -> Settings;

    /// Stores `record`, replacing any existing record for the same date.
    ///
    /// Negative hours or travel time are rejected.
    fn save_daily_record(&self, record: &DailyRecord) -> EngineResult<()>;

    /// Deletes the record for `date`.
    /// Returns true if a record was found and deleted.
    fn delete_daily_record(&self, date: NaiveDate) -> EngineResult<bool>;

    /// Deletes every daily record. Settings are kept.
    /// Returns the number of records deleted.
    fn clear_daily_records(&self) -> EngineResult<usize>;

    /// Replaces the stored settings.
    ///
    /// Settings are validated before they are written.
    fn save_settings(&self, settings: &Settings) -> EngineResult<()>;
}
