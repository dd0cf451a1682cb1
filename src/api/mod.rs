//! REST API over a finished depot run.
//!
//! Provides four GET endpoints:
//! - `/summary`: scenario configuration and run KPIs
//! - `/daily`: the per-day table
//! - `/hours`: hourly records with optional range filtering
//! - `/trucks`: the truck population with optional class filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::config::ScenarioConfig;
use crate::sim::runner::RunResult;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the run completes and wrapped in `Arc`; no locks
/// are needed since all data is read-only.
pub struct AppState {
    /// Scenario the run was computed from.
    pub scenario: ScenarioConfig,
    /// Complete run output.
    pub result: RunResult,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/daily", get(handlers::get_daily))
        .route("/hours", get(handlers::get_hours))
        .route("/trucks", get(handlers::get_trucks))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
