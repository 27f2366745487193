//! HTTP API module for the paycheck engine.
//!
//! This module provides the REST endpoints for recording daily hours,
//! managing pay settings, and reading paycheck, weekly, and dashboard
//! estimates.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DailyRecordRequest, DateQuery, PaycheckQuery};
pub use response::{ApiError, ApiErrorResponse, DeleteResponse};
pub use state::AppState;
