//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use depot_sim::api::{AppState, router};

use common::*;

fn build_api_state() -> Arc<AppState> {
    let scenario = baseline_days(2);
    let result = run(scenario.clone());
    Arc::new(AppState { scenario, result })
}

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(build_api_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn summary_reports_run() {
    let (status, json) = get("/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hours"], 48);
    assert_eq!(json["scenario"]["simulation"]["days"], 2);
    assert_eq!(json["scenario"]["grid"]["cap"], "per_truck");
    assert!(json["kpis"]["truck_count"].as_u64().unwrap_or(0) >= 40);
}

#[tokio::test]
async fn daily_rows_match_days() {
    let (status, json) = get("/daily").await;
    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["day"], 1);
}

#[tokio::test]
async fn hours_defaults_to_everything() {
    let (status, json) = get("/hours").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 48);
}

#[tokio::test]
async fn hours_range_is_inclusive() {
    let (status, json) = get("/hours?from=24&to=47").await;
    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 24);
    assert_eq!(rows[0]["hour"], 24);
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let (status, json) = get("/hours?from=30&to=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn trucks_filtered_by_class() {
    let (status, all) = get("/trucks").await;
    assert_eq!(status, StatusCode::OK);
    let (_, small) = get("/trucks?class=small").await;
    let all = all.as_array().unwrap();
    let small = small.as_array().unwrap();
    assert!(small.len() <= all.len());
    assert!(small.iter().all(|t| t["class"] == "small"));
}

#[tokio::test]
async fn unknown_class_is_client_error() {
    let (status, _) = get_raw("/trucks?class=huge").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

async fn get_raw(uri: &str) -> (StatusCode, Vec<u8>) {
    let app = router(build_api_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}
