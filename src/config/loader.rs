//! Settings file loading.
//!
//! This module provides the [`SettingsLoader`] type for reading and writing
//! the YAML settings file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::Settings;

use super::types::RawSettings;

/// Reads and writes the settings file.
///
/// The file is a flat YAML mapping. Every field is optional:
///
/// ```yaml
/// pay_rate: "20.00"
/// travel_rate: "15.00"
/// pay_period_days: 14
/// pay_period_start_date: "2025-01-06"
/// withholding_percentage: "20"
/// payday_delay: 3
/// ```
///
/// # Example
///
/// ```no_run
/// use paycheck_engine::config::SettingsLoader;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
///
/// // Strict: any problem is an error.
/// let settings = SettingsLoader::load("./config/settings.yaml", today)?;
///
/// // Lenient: always returns complete settings.
/// let settings = SettingsLoader::load_or_default("./data/settings.yaml", today);
/// println!("Pay rate: ${}", settings.pay_rate);
/// # Ok::<(), paycheck_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SettingsLoader;

impl SettingsLoader {
    /// Loads and validates settings from `path`.
    ///
    /// # Returns
    ///
    /// The resolved [`Settings`], or an error if:
    /// - The file does not exist ([`EngineError::ConfigNotFound`])
    /// - The file is not valid YAML for the settings shape ([`EngineError::ConfigParseError`])
    /// - Any field is out of range
    pub fn load<P: AsRef<Path>>(path: P, today: NaiveDate) -> EngineResult<Settings> {
        Self::load_raw(path)?.into_settings(today)
    }

    /// Reads the settings file without applying defaults or validation.
    pub fn load_raw<P: AsRef<Path>>(path: P) -> EngineResult<RawSettings> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        // An empty file is a valid, all-default settings file.
        if content.trim().is_empty() {
            return Ok(RawSettings::default());
        }

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads settings from `path`, never failing.
    ///
    /// A missing file gives the defaults. An unreadable or non-YAML file is
    /// logged and gives the defaults. Otherwise every field is read on its
    /// own: a field with the wrong type or an out-of-range value is replaced
    /// by its default, and a bad anchor by `today`.
    pub fn load_or_default<P: AsRef<Path>>(path: P, today: NaiveDate) -> Settings {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Settings::defaults(today),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Settings file unreadable, using defaults");
                return Settings::defaults(today);
            }
        };
        if content.trim().is_empty() {
            return Settings::defaults(today);
        }

        match serde_yaml::from_str::<serde_yaml::Value>(&content) {
            Ok(value) => RawSettings::from_yaml_lenient(&value).into_settings_or_default(today),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Settings file is not YAML, using defaults");
                Settings::defaults(today)
            }
        }
    }

    /// Writes `settings` to `path`, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(path: P, settings: &Settings) -> EngineResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| storage_error(path, e))?;
        }

        let yaml = serde_yaml::to_string(&RawSettings::from(settings)).map_err(|e| {
            EngineError::StorageError {
                message: format!("could not serialize settings: {}", e),
            }
        })?;

        // Write to a sibling temp file, then rename over the target.
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml).map_err(|e| storage_error(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| storage_error(path, e))?;

        info!(path = %path.display(), "Settings saved");
        Ok(())
    }
}

fn storage_error(path: &Path, err: std::io::Error) -> EngineError {
    EngineError::StorageError {
        message: format!("{}: {}", path.display(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/settings.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = SettingsLoader::load(config_path(), today());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let settings = result.unwrap();
        assert_eq!(settings.pay_rate, dec("20.00"));
        assert_eq!(settings.pay_period_days, 14);
        assert_eq!(
            settings.pay_period_start_date,
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
        );
        assert_eq!(settings.payday_delay, 3);
    }

    #[test]
    fn test_load_missing_file_returns_not_found() {
        let result = SettingsLoader::load("./config/does-not-exist.yaml", today());
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("does-not-exist.yaml"))
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "pay_rate: [not, a, number\n").unwrap();

        let result = SettingsLoader::load(&path, today());
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsLoader::load_or_default(dir.path().join("none.yaml"), today());
        assert_eq!(settings, Settings::defaults(today()));
    }

    #[test]
    fn test_load_or_default_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, ": : :\n\t- nonsense").unwrap();

        assert_eq!(
            SettingsLoader::load_or_default(&path, today()),
            Settings::defaults(today())
        );
    }

    #[test]
    fn test_load_or_default_bad_anchor_uses_today() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "pay_rate: 30\npay_period_start_date: \"undefined\"\n").unwrap();

        let settings = SettingsLoader::load_or_default(&path, today());
        assert_eq!(settings.pay_rate, dec("30"));
        assert_eq!(settings.pay_period_start_date, today());
    }

    #[test]
    fn test_load_or_default_keeps_fields_around_a_mistyped_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(
            &path,
            "pay_rate: abc\ntravel_rate: \"12.50\"\npayPeriodDays: 7\npay_period_start_date: \"2025-01-06\"\npayday_delay: [1, 2]\n",
        )
        .unwrap();

        // The strict path rejects the whole file.
        assert!(matches!(
            SettingsLoader::load(&path, today()),
            Err(EngineError::ConfigParseError { .. })
        ));

        let settings = SettingsLoader::load_or_default(&path, today());
        assert_eq!(settings.pay_rate, Settings::DEFAULT_PAY_RATE);
        assert_eq!(settings.travel_rate, dec("12.50"));
        assert_eq!(settings.pay_period_days, 7);
        assert_eq!(
            settings.pay_period_start_date,
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
        );
        assert_eq!(settings.payday_delay, Settings::DEFAULT_PAYDAY_DELAY);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "").unwrap();

        assert_eq!(
            SettingsLoader::load(&path, today()).unwrap(),
            Settings::defaults(today())
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.yaml");

        let mut settings = Settings::defaults(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        settings.pay_rate = dec("31.25");
        settings.withholding_percentage = dec("17.5");

        SettingsLoader::save(&path, &settings).unwrap();
        let loaded = SettingsLoader::load(&path, today()).unwrap();

        assert_eq!(loaded, settings);
    }
}
