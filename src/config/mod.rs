//! Settings configuration for the paycheck engine.
//!
//! This module loads pay settings from a YAML file and resolves them into a
//! complete, validated [`Settings`](crate::models::Settings) value, applying
//! defaults for anything missing.
//!
//! # Example
//!
//! ```no_run
//! use paycheck_engine::config::SettingsLoader;
//! use paycheck_engine::calculation::local_today;
//!
//! let settings = SettingsLoader::load_or_default("./data/settings.yaml", local_today());
//! println!("Pay period: {} days", settings.pay_period_days);
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::RawSettings;
