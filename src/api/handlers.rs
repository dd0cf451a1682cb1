//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, HoursQuery, SummaryResponse, TruckRecord, TrucksQuery};
use crate::sim::kpi::DailyStats;
use crate::sim::types::HourResult;

/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        scenario: state.scenario.clone(),
        total_hours: state.result.total_hours(),
        kpis: state.result.kpis.clone(),
    })
}

/// `GET /daily` → 200 + `Vec<DailyStats>` JSON
pub async fn get_daily(State(state): State<Arc<AppState>>) -> Json<Vec<DailyStats>> {
    Json(state.result.daily.clone())
}

/// Returns hourly records, optionally filtered by hour range.
///
/// `GET /hours` → 200 + `Vec<HourResult>` JSON
/// `GET /hours?from=N&to=M` → filtered range (inclusive)
/// `GET /hours?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_hours(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HoursQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<HourResult> = state
        .result
        .hours
        .iter()
        .filter(|r| r.hour >= from && r.hour <= to)
        .cloned()
        .collect();

    Ok(Json(records))
}

/// `GET /trucks` → all trucks, `GET /trucks?class=large` → one class only
pub async fn get_trucks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrucksQuery>,
) -> Json<Vec<TruckRecord>> {
    let records = state
        .result
        .trucks
        .iter()
        .filter(|t| query.class.is_none_or(|class| t.class == class))
        .map(TruckRecord::from)
        .collect();
    Json(records)
}
