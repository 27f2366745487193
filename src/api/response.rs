//! Response types for the paycheck API.
//!
//! This module defines the error response structures, the mapping from
//! [`EngineError`] to HTTP statuses, and small acknowledgement bodies.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid date error response.
    pub fn invalid_date(value: &str) -> Self {
        Self::with_details(
            "INVALID_DATE",
            format!("Invalid date: '{}'", value),
            "Dates must be written as YYYY-MM-DD",
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidPeriodLength { .. } | EngineError::InvalidAnchorDate { .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "CONFIGURATION_ERROR",
                    error.to_string(),
                    "Check the pay period length and start date settings",
                ))
            }
            EngineError::DateOutOfRange { message } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "DATE_OUT_OF_RANGE",
                    "Date is outside the supported range",
                    message,
                ))
            }
            EngineError::InvalidRecord { date, message } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_RECORD",
                    format!("Invalid record for {}: {}", date, message),
                    "Hours worked and travel time must not be negative",
                ))
            }
            EngineError::InvalidSettings { field, message } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_SETTINGS",
                    format!("Invalid setting '{}': {}", field, message),
                    "The settings contain an out-of-range value",
                ))
            }
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::StorageError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            },
        }
    }
}

/// Body returned by delete endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Number of records removed.
    pub deleted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_date_error() {
        let error = ApiError::invalid_date("2025-02-30");
        assert_eq!(error.code, "INVALID_DATE");
        assert!(error.message.contains("2025-02-30"));
        assert!(error.details.is_some());
    }

    #[test]
    fn test_configuration_errors_are_bad_requests() {
        let api_error: ApiErrorResponse = EngineError::InvalidPeriodLength { days: 0 }.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "CONFIGURATION_ERROR");
        assert!(api_error.error.message.contains("0 days"));
    }

    #[test]
    fn test_invalid_record_to_api_error() {
        let api_error: ApiErrorResponse = EngineError::InvalidRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            message: "hours worked cannot be negative (-1)".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_RECORD");
        assert!(api_error.error.message.contains("2025-01-06"));
    }

    #[test]
    fn test_storage_error_is_server_error() {
        let api_error: ApiErrorResponse = EngineError::StorageError {
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.details.as_deref(), Some("disk full"));
    }
}
