//! In-memory timesheet storage.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{DailyRecord, Settings};

use super::TimesheetStore;

/// A [`TimesheetStore`] that keeps records and settings in memory.
///
/// # Example
///
/// ```
/// use paycheck_engine::models::DailyRecord;
/// use paycheck_engine::storage::{MemoryStore, TimesheetStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let store = MemoryStore::new();
/// let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
///
/// assert_eq!(store.get_daily_record(date).hours_worked, Decimal::ZERO);
///
/// let record = DailyRecord::new(date, Decimal::from(8), Decimal::ZERO).unwrap();
/// store.save_daily_record(&record).unwrap();
/// assert_eq!(store.get_daily_record(date), record);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<NaiveDate, DailyRecord>>,
    settings: RwLock<Option<Settings>>,
}

impl MemoryStore {
    /// Creates an empty store with no saved settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records` and `settings`.
    pub fn with_data(records: BTreeMap<NaiveDate, DailyRecord>, settings: Option<Settings>) -> Self {
        Self {
            records: RwLock::new(records),
            settings: RwLock::new(settings),
        }
    }
}

impl TimesheetStore for MemoryStore {
    fn get_daily_record(&self, date: NaiveDate) -> DailyRecord {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyRecord::empty(date))
    }

    fn list_all_daily_records(&self) -> BTreeMap<NaiveDate, DailyRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn get_settings(&self, today: NaiveDate) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| Settings::defaults(today))
    }

    fn save_daily_record(&self, record: &DailyRecord) -> EngineResult<()> {
        record.validate()?;
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.insert(record.date, record.clone());
        debug!(date = %record.date, "Stored daily record");
        Ok(())
    }

    fn delete_daily_record(&self, date: NaiveDate) -> EngineResult<bool> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        Ok(records.remove(&date).is_some())
    }

    fn clear_daily_records(&self) -> EngineResult<usize> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let count = records.len();
        records.clear();
        Ok(count)
    }

    fn save_settings(&self, settings: &Settings) -> EngineResult<()> {
        settings.validate()?;
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = Some(settings.clone());
        Ok(())
    }
}
