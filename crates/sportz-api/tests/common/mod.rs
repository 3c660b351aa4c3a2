//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use sportz_core::repository::MatchRepository;
use sportz_test_support::{FailingMatchRepository, FixedClock, InMemoryMatchRepository};
use tower::ServiceExt;

use sportz_api::build_router;
use sportz_api::state::AppState;

/// Timestamp stamped on the first stored match.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// Build the app router over `repo` with the clock fixed at `now`.
pub fn build_test_app(repo: Arc<dyn MatchRepository>, now: DateTime<Utc>) -> Router {
    build_router(AppState::new(Arc::new(FixedClock(now)), repo))
}

/// A fresh in-memory repository shared between the app and the test.
pub fn in_memory_repo() -> Arc<InMemoryMatchRepository> {
    Arc::new(InMemoryMatchRepository::new(epoch()))
}

/// Build the app router over a repository whose every call fails.
pub fn build_failing_app() -> Router {
    build_test_app(Arc::new(FailingMatchRepository), epoch())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a request with a raw body and return the response.
pub async fn send_raw(
    app: Router,
    method: &str,
    uri: &str,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_raw(app, "POST", uri, &serde_json::to_string(body).unwrap()).await
}

/// Send a PATCH request with a JSON body and return the response.
pub async fn patch_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_raw(app, "PATCH", uri, &serde_json::to_string(body).unwrap()).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
