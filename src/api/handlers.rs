//! HTTP request handlers for the paycheck API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::get,
};
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    dashboard_summary, paycheck_summary, previous_paycheck_summary, resolve_pay_period,
    summarize_period, week_totals,
};
use crate::config::RawSettings;
use crate::error::EngineError;
use crate::models::{DailyRecord, DashboardSummary, PaycheckSummary, Settings, WeekSummary};

use super::request::{DailyRecordRequest, DateQuery, PaycheckQuery, parse_date, parse_date_or};
use super::response::{ApiError, ApiErrorResponse, DeleteResponse};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
///
/// | Method | Path                  | Purpose                                   |
/// |--------|-----------------------|-------------------------------------------|
/// | GET    | `/paycheck`           | Estimate for the period containing `date` |
/// | GET    | `/paycheck/previous`  | Estimate for the period before that       |
/// | GET    | `/week`               | Monday-to-Sunday totals around `date`     |
/// | GET    | `/dashboard`          | Current/last week and payday countdown    |
/// | GET    | `/settings`           | Current settings                          |
/// | PUT    | `/settings`           | Replace settings (merged over defaults)   |
/// | GET    | `/hours`              | Every daily record, in date order         |
/// | DELETE | `/hours`              | Delete every daily record                 |
/// | GET    | `/hours/:date`        | One day's record (zero if absent)         |
/// | PUT    | `/hours/:date`        | Store one day's record                    |
/// | DELETE | `/hours/:date`        | Delete one day's record                   |
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/paycheck", get(paycheck_handler))
        .route("/paycheck/previous", get(previous_paycheck_handler))
        .route("/week", get(week_handler))
        .route("/dashboard", get(dashboard_handler))
        .route(
            "/settings",
            get(get_settings_handler).put(put_settings_handler),
        )
        .route(
            "/hours",
            get(list_hours_handler).delete(clear_hours_handler),
        )
        .route(
            "/hours/:date",
            get(get_hours_handler)
                .put(put_hours_handler)
                .delete(delete_hours_handler),
        )
        .with_state(state)
}

/// Handler for GET /paycheck.
///
/// Uses the stored settings unless the query overrides the anchor or the
/// period length. An override anchor that cannot be parsed falls back to
/// today.
async fn paycheck_handler(
    State(state): State<AppState>,
    query: Result<Query<PaycheckQuery>, QueryRejection>,
) -> ApiResult<PaycheckSummary> {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_error(&correlation_id, rejection))?;

    let today = state.today();
    let date = parse_date_or(query.date.as_deref(), today)?;
    info!(correlation_id = %correlation_id, date = %date, "Processing paycheck request");

    let (settings, records) = load_timesheet(&state, today, &correlation_id).await?;

    let start_time = Instant::now();
    let summary = if query.has_overrides() {
        let anchor = query
            .anchor
            .clone()
            .unwrap_or_else(|| settings.pay_period_start_date.to_string());
        let period_days = query.period_days.unwrap_or_else(|| settings.period_length());

        let period = resolve_pay_period(date, Some(anchor.as_str()), period_days, today).ok_or_else(|| {
            let err = if period_days <= 0 {
                EngineError::InvalidPeriodLength { days: period_days }
            } else {
                EngineError::DateOutOfRange {
                    message: format!("no pay period of {} days contains {}", period_days, date),
                }
            };
            engine_error(&correlation_id, err)
        })?;
        summarize_period(period, &records, &settings)
    } else {
        paycheck_summary(date, &records, &settings)
            .map_err(|err| engine_error(&correlation_id, err))?
    };

    info!(
        correlation_id = %correlation_id,
        period_start = %summary.pay_period.start_date,
        period_end = %summary.pay_period.end_date,
        gross_pay = %summary.totals.gross_pay,
        net_pay = %summary.net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Paycheck estimate completed"
    );
    Ok(Json(summary))
}

/// Handler for GET /paycheck/previous.
async fn previous_paycheck_handler(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<PaycheckSummary> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_error(&correlation_id, rejection))?;

    let today = state.today();
    let date = parse_date_or(query.date.as_deref(), today)?;
    info!(correlation_id = %correlation_id, date = %date, "Processing previous paycheck request");

    let (settings, records) = load_timesheet(&state, today, &correlation_id).await?;
    let summary = previous_paycheck_summary(date, &records, &settings)
        .map_err(|err| engine_error(&correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        period_start = %summary.pay_period.start_date,
        gross_pay = %summary.totals.gross_pay,
        "Previous paycheck estimate completed"
    );
    Ok(Json(summary))
}

/// Handler for GET /week.
async fn week_handler(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<WeekSummary> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_error(&correlation_id, rejection))?;

    let today = state.today();
    let date = parse_date_or(query.date.as_deref(), today)?;

    let (settings, records) = load_timesheet(&state, today, &correlation_id).await?;
    let summary = week_totals(date, &records, &settings);

    info!(
        correlation_id = %correlation_id,
        week_start = %summary.week_start,
        total_hours = %summary.totals.total_hours,
        "Week totals completed"
    );
    Ok(Json(summary))
}

/// Handler for GET /dashboard.
///
/// `date` stands in for today when given.
async fn dashboard_handler(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<DashboardSummary> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_error(&correlation_id, rejection))?;

    let today = parse_date_or(query.date.as_deref(), state.today())?;

    let (settings, records) = load_timesheet(&state, today, &correlation_id).await?;
    let summary = dashboard_summary(today, &records, &settings);

    info!(
        correlation_id = %correlation_id,
        today = %today,
        days_until_payday = summary.days_until_payday,
        "Dashboard completed"
    );
    Ok(Json(summary))
}

/// Handler for GET /settings.
async fn get_settings_handler(State(state): State<AppState>) -> ApiResult<Settings> {
    let correlation_id = Uuid::new_v4();
    let today = state.today();
    let settings = state
        .with_store(move |store| store.get_settings(today))
        .await
        .map_err(|err| engine_error(&correlation_id, err))?;
    Ok(Json(settings))
}

/// Handler for PUT /settings.
///
/// Fields missing from the body take their default values.
async fn put_settings_handler(
    State(state): State<AppState>,
    payload: Result<Json<RawSettings>, JsonRejection>,
) -> ApiResult<Settings> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settings update");

    let Json(raw) = payload.map_err(|rejection| json_error(&correlation_id, rejection))?;

    let settings = raw
        .into_settings(state.today())
        .map_err(|err| engine_error(&correlation_id, err))?;
    let saved = settings.clone();
    state
        .with_store(move |store| store.save_settings(&saved))
        .await
        .and_then(|result| result)
        .map_err(|err| engine_error(&correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        pay_period_days = settings.pay_period_days,
        pay_period_start_date = %settings.pay_period_start_date,
        "Settings updated"
    );
    Ok(Json(settings))
}

/// Handler for GET /hours.
async fn list_hours_handler(State(state): State<AppState>) -> ApiResult<Vec<DailyRecord>> {
    let correlation_id = Uuid::new_v4();
    let records = state
        .with_store(|store| store.list_all_daily_records())
        .await
        .map_err(|err| engine_error(&correlation_id, err))?;
    Ok(Json(records.into_values().collect()))
}

/// Handler for DELETE /hours.
async fn clear_hours_handler(State(state): State<AppState>) -> ApiResult<DeleteResponse> {
    let correlation_id = Uuid::new_v4();
    let deleted = state
        .with_store(|store| store.clear_daily_records())
        .await
        .and_then(|result| result)
        .map_err(|err| engine_error(&correlation_id, err))?;

    info!(correlation_id = %correlation_id, deleted, "Cleared all daily records");
    Ok(Json(DeleteResponse { deleted }))
}

/// Handler for GET /hours/:date.
async fn get_hours_handler(
    State(state): State<AppState>,
    Path(raw_date): Path<String>,
) -> ApiResult<DailyRecord> {
    let correlation_id = Uuid::new_v4();
    let date = parse_date(&raw_date)?;
    let record = state
        .with_store(move |store| store.get_daily_record(date))
        .await
        .map_err(|err| engine_error(&correlation_id, err))?;
    Ok(Json(record))
}

/// Handler for PUT /hours/:date.
async fn put_hours_handler(
    State(state): State<AppState>,
    Path(raw_date): Path<String>,
    payload: Result<Json<DailyRecordRequest>, JsonRejection>,
) -> ApiResult<DailyRecord> {
    let correlation_id = Uuid::new_v4();
    let date = parse_date(&raw_date)?;
    let Json(request) = payload.map_err(|rejection| json_error(&correlation_id, rejection))?;

    let record = request
        .into_record(date)
        .map_err(|err| engine_error(&correlation_id, err))?;
    let saved = record.clone();
    state
        .with_store(move |store| store.save_daily_record(&saved))
        .await
        .and_then(|result| result)
        .map_err(|err| engine_error(&correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        date = %date,
        hours_worked = %record.hours_worked,
        travel_time = %record.travel_time,
        "Daily record saved"
    );
    Ok(Json(record))
}

/// Handler for DELETE /hours/:date.
async fn delete_hours_handler(
    State(state): State<AppState>,
    Path(raw_date): Path<String>,
) -> ApiResult<DeleteResponse> {
    let correlation_id = Uuid::new_v4();
    let date = parse_date(&raw_date)?;

    let removed = state
        .with_store(move |store| store.delete_daily_record(date))
        .await
        .and_then(|result| result)
        .map_err(|err| engine_error(&correlation_id, err))?;

    info!(correlation_id = %correlation_id, date = %date, removed, "Daily record deleted");
    Ok(Json(DeleteResponse {
        deleted: usize::from(removed),
    }))
}

/// Reads the settings and every record in one trip to the store.
async fn load_timesheet(
    state: &AppState,
    today: NaiveDate,
    correlation_id: &Uuid,
) -> Result<(Settings, BTreeMap<NaiveDate, DailyRecord>), ApiErrorResponse> {
    state
        .with_store(move |store| (store.get_settings(today), store.list_all_daily_records()))
        .await
        .map_err(|err| engine_error(correlation_id, err))
}

fn engine_error(correlation_id: &Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

fn query_error(correlation_id: &Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Query string rejected");
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

fn json_error(correlation_id: &Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the bad field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}
