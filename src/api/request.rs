//! Request types for the paycheck API.
//!
//! This module defines the query strings and JSON bodies the endpoints accept.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::DailyRecord;

use super::response::{ApiError, ApiErrorResponse};

/// Query string for endpoints that look at a single date.
///
/// `date` defaults to today when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    /// The date to look at, as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
}

/// Query string for `GET /paycheck`.
///
/// `anchor` and `period_days` override the stored settings for a one-off
/// what-if estimate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaycheckQuery {
    /// The date whose pay period is estimated, as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// Pay period anchor to use instead of the stored one.
    #[serde(default)]
    pub anchor: Option<String>,
    /// Pay period length to use instead of the stored one.
    #[serde(default)]
    pub period_days: Option<i64>,
}

impl PaycheckQuery {
    /// Returns true when either pay period override is present.
    pub fn has_overrides(&self) -> bool {
        self.anchor.is_some() || self.period_days.is_some()
    }
}

/// Request body for `PUT /hours/{date}`.
///
/// The date comes from the path, so the body carries only the quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecordRequest {
    /// Hours worked on the day.
    #[serde(alias = "hoursWorked", default)]
    pub hours_worked: Decimal,
    /// Hours spent travelling on the day.
    #[serde(alias = "travelTime", default)]
    pub travel_time: Decimal,
}

impl DailyRecordRequest {
    /// Builds the validated record for `date`.
    pub fn into_record(self, date: NaiveDate) -> EngineResult<DailyRecord> {
        DailyRecord::new(date, self.hours_worked, self.travel_time)
    }
}

/// Parses a `YYYY-MM-DD` path or query value.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ApiErrorResponse> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiErrorResponse::bad_request(ApiError::invalid_date(raw)))
}

/// Parses an optional date, falling back to `today`.
pub fn parse_date_or(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, ApiErrorResponse> {
    raw.map_or(Ok(today), parse_date)
}
