//! # File-backed timesheet storage
//!
//! Persists daily records and settings in a data directory:
//!
//! ```text
//! data/
//! ├── hours.json      ← daily records, keyed by ISO date
//! └── settings.yaml   ← pay settings
//! ```
//!
//! ## hours.json
//!
//! ```json
//! {
//!   "2025-01-06": { "hours_worked": "8", "travel_time": "0.5" },
//!   "2025-01-07": { "hoursWorked": 7.5, "travelTime": 0 }
//! }
//! ```
//!
//! Both field spellings are read; the `snake_case` form is written. Each
//! entry is read on its own: one with an unparseable date key, a field of the
//! wrong type, or hours outside `0..=24` is skipped with a warning and the
//! rest of the file still loads. Skipped entries are dropped on the next
//! write.
//!
//! Writes go to a temp file which is then renamed over the target.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SettingsLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{DailyRecord, Settings};

use super::TimesheetStore;

const HOURS_FILE: &str = "hours.json";
const SETTINGS_FILE: &str = "settings.yaml";

/// One day's entry in `hours.json`; the date is the map key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredHours {
    #[serde(alias = "hoursWorked", default)]
    hours_worked: Decimal,
    #[serde(alias = "travelTime", default)]
    travel_time: Decimal,
}

/// A [`TimesheetStore`] backed by files in a data directory.
///
/// # Example
///
/// ```no_run
/// use paycheck_engine::storage::{FileStore, TimesheetStore};
/// use paycheck_engine::calculation::local_today;
///
/// let store = FileStore::new("./data");
/// let settings = store.get_settings(local_today());
/// let records = store.list_all_daily_records();
/// println!("{} records, pay rate {}", records.len(), settings.pay_rate);
/// ```
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
    // Serializes read-modify-write cycles on hours.json.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store rooted at `data_dir`.
    ///
    /// The directory is created on the first write.
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn hours_path(&self) -> PathBuf {
        self.data_dir.join(HOURS_FILE)
    }

    fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    /// Reads `hours.json`, failing only if it is not a JSON object.
    fn read_hours(&self) -> EngineResult<BTreeMap<NaiveDate, DailyRecord>> {
        let path = self.hours_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let stored: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(&content).map_err(|e| EngineError::StorageError {
                message: format!("{}: {}", path.display(), e),
            })?;

        let mut records = BTreeMap::new();
        for (key, value) in stored {
            let Ok(date) = NaiveDate::parse_from_str(&key, "%Y-%m-%d") else {
                warn!(key = %key, "Skipping hours entry with invalid date key");
                continue;
            };
            let entry = match serde_json::from_value::<StoredHours>(value) {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(key = %key, error = %err, "Skipping malformed hours entry");
                    continue;
                }
            };
            match DailyRecord::new(date, entry.hours_worked, entry.travel_time) {
                Ok(record) => {
                    records.insert(date, record);
                }
                Err(err) => warn!(error = %err, "Skipping invalid hours entry"),
            }
        }

        debug!(path = %path.display(), count = records.len(), "Loaded daily records");
        Ok(records)
    }

    fn write_hours(&self, records: &BTreeMap<NaiveDate, DailyRecord>) -> EngineResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| io_error(&self.data_dir, e))?;

        let stored: BTreeMap<String, StoredHours> = records
            .values()
            .map(|record| {
                (
                    record.key(),
                    StoredHours {
                        hours_worked: record.hours_worked,
                        travel_time: record.travel_time,
                    },
                )
            })
            .collect();

        let json = serde_json::to_string_pretty(&stored).map_err(|e| EngineError::StorageError {
            message: format!("could not serialize daily records: {}", e),
        })?;

        let path = self.hours_path();
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(|e| io_error(&temp_path, e))?;
        fs::rename(&temp_path, &path).map_err(|e| io_error(&path, e))?;

        debug!(path = %path.display(), count = records.len(), "Saved daily records");
        Ok(())
    }

    /// Loads the records, applies `update`, and writes them back.
    fn modify_hours<T>(
        &self,
        update: impl FnOnce(&mut BTreeMap<NaiveDate, DailyRecord>) -> T,
    ) -> EngineResult<T> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.read_hours()?;
        let result = update(&mut records);
        self.write_hours(&records)?;
        Ok(result)
    }
}

impl TimesheetStore for FileStore {
    fn get_daily_record(&self, date: NaiveDate) -> DailyRecord {
        self.list_all_daily_records()
            .remove(&date)
            .unwrap_or_else(|| DailyRecord::empty(date))
    }

    fn list_all_daily_records(&self) -> BTreeMap<NaiveDate, DailyRecord> {
        self.read_hours().unwrap_or_else(|err| {
            warn!(error = %err, "Daily records unreadable, treating as empty");
            BTreeMap::new()
        })
    }

    fn get_settings(&self, today: NaiveDate) -> Settings {
        SettingsLoader::load_or_default(self.settings_path(), today)
    }

    fn save_daily_record(&self, record: &DailyRecord) -> EngineResult<()> {
        record.validate()?;
        let record = record.clone();
        self.modify_hours(move |records| {
            records.insert(record.date, record);
        })
    }

    fn delete_daily_record(&self, date: NaiveDate) -> EngineResult<bool> {
        self.modify_hours(|records| records.remove(&date).is_some())
    }

    fn clear_daily_records(&self) -> EngineResult<usize> {
        let count = self.modify_hours(|records| {
            let count = records.len();
            records.clear();
            count
        })?;
        info!(count, "Cleared daily records");
        Ok(count)
    }

    fn save_settings(&self, settings: &Settings) -> EngineResult<()> {
        settings.validate()?;
        SettingsLoader::save(self.settings_path(), settings)
    }
}

fn io_error(path: &Path, err: std::io::Error) -> EngineError {
    EngineError::StorageError {
        message: format!("{}: {}", path.display(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn test_empty_directory_reads_as_empty() {
        let (_dir, store) = setup();
        assert!(store.list_all_daily_records().is_empty());
        assert_eq!(
            store.get_daily_record(date(2025, 1, 6)),
            DailyRecord::empty(date(2025, 1, 6))
        );
    }

    #[test]
    fn test_save_and_reload_records() {
        let (dir, store) = setup();
        let record = DailyRecord::new(date(2025, 1, 6), dec("8.5"), dec("1")).unwrap();
        store.save_daily_record(&record).unwrap();

        let reopened = FileStore::new(dir.path().join("data"));
        assert_eq!(reopened.get_daily_record(date(2025, 1, 6)), record);
    }

    #[test]
    fn test_written_file_uses_iso_keys() {
        let (_dir, store) = setup();
        store
            .save_daily_record(&DailyRecord::new(date(2025, 1, 6), dec("8"), dec("0")).unwrap())
            .unwrap();

        let content = fs::read_to_string(store.hours_path()).unwrap();
        assert!(content.contains("\"2025-01-06\""));
        assert!(content.contains("\"hours_worked\": \"8\""));
    }

    #[test]
    fn test_reads_camel_case_entries_and_skips_bad_ones() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(
            store.hours_path(),
            r#"{
                "2025-01-06": {"hoursWorked": 7.5, "travelTime": 1},
                "2025-01-07": {"hoursWorked": -3, "travelTime": 0},
                "not-a-date": {"hoursWorked": 4, "travelTime": 0}
            }"#,
        )
        .unwrap();

        let records = store.list_all_daily_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[&date(2025, 1, 6)].hours_worked, dec("7.5"));
    }

    #[test]
    fn test_mistyped_entry_does_not_hide_the_others() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(
            store.hours_path(),
            r#"{
                "2025-01-06": {"hours_worked": "8"},
                "2025-01-07": {"hoursWorked": "abc"},
                "2025-01-08": "eight",
                "2025-01-09": {"hours_worked": "30"}
            }"#,
        )
        .unwrap();

        let records = store.list_all_daily_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[&date(2025, 1, 6)].hours_worked, dec("8"));

        // Writing replaces the bad entry and keeps the good one.
        let record = DailyRecord::new(date(2025, 1, 7), dec("6"), dec("0")).unwrap();
        store.save_daily_record(&record).unwrap();

        let records = store.list_all_daily_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[&date(2025, 1, 7)], record);
    }

    #[test]
    fn test_corrupt_file_reads_as_empty_but_refuses_writes() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.hours_path(), "{ this is not json").unwrap();

        assert!(store.list_all_daily_records().is_empty());

        let record = DailyRecord::new(date(2025, 1, 6), dec("8"), dec("0")).unwrap();
        assert!(matches!(
            store.save_daily_record(&record),
            Err(EngineError::StorageError { .. })
        ));
        // The corrupt file is left untouched.
        assert_eq!(
            fs::read_to_string(store.hours_path()).unwrap(),
            "{ this is not json"
        );
    }

    #[test]
    fn test_delete_and_clear() {
        let (_dir, store) = setup();
        for day in date(2025, 1, 6).iter_days().take(4) {
            store
                .save_daily_record(&DailyRecord::new(day, dec("8"), dec("0")).unwrap())
                .unwrap();
        }

        assert!(store.delete_daily_record(date(2025, 1, 8)).unwrap());
        assert!(!store.delete_daily_record(date(2025, 1, 8)).unwrap());
        assert_eq!(store.clear_daily_records().unwrap(), 3);
        assert!(store.list_all_daily_records().is_empty());
    }

    #[test]
    fn test_settings_round_trip() {
        let (_dir, store) = setup();
        let today = date(2025, 3, 10);
        assert_eq!(store.get_settings(today), Settings::defaults(today));

        let mut settings = Settings::defaults(date(2025, 1, 6));
        settings.travel_rate = dec("18.5");
        settings.payday_delay = 1;
        store.save_settings(&settings).unwrap();

        assert_eq!(store.get_settings(today), settings);
        assert!(store.data_dir().join(SETTINGS_FILE).exists());
    }

    #[test]
    fn test_save_settings_rejects_invalid() {
        let (_dir, store) = setup();
        let mut settings = Settings::defaults(date(2025, 1, 6));
        settings.withholding_percentage = dec("150");
        assert!(store.save_settings(&settings).is_err());
        assert!(!store.data_dir().join(SETTINGS_FILE).exists());
    }
}
