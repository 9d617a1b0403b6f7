#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tracker_api::config::ServerConfig;
use tracker_api::router::build_app_router;
use tracker_api::state::AppState;
use tracker_core::reading::sample_readings;
use tracker_core::{Registry, Session};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        registry_path: None,
        seed_sample_readings: false,
        reading_max_age: chrono::Duration::days(14),
        ws_heartbeat_secs: 30,
    }
}

/// State over the built-in panel with no readings.
pub fn empty_state() -> AppState {
    let registry = Arc::new(Registry::default_panel().unwrap());
    AppState::new(test_config(), Session::new(registry))
}

/// State over the built-in panel seeded with the reference readings.
pub fn seeded_state() -> AppState {
    let registry = Arc::new(Registry::default_panel().unwrap());
    let session = Session::with_readings(registry, sample_readings().unwrap()).unwrap();
    AppState::new(test_config(), session)
}

/// State with every gauge reading comfortably inside its safe zone.
pub fn all_safe_state() -> AppState {
    let registry = Arc::new(Registry::default_panel().unwrap());
    let mut readings = HashMap::new();
    for g in registry.gauges() {
        let value = if g.inverted {
            g.thresholds.safe + 10.0
        } else {
            g.thresholds.safe / 2.0
        };
        readings.insert(
            g.id.clone(),
            tracker_core::Reading::new(value, tracker_core::Trend::Stable, chrono::Utc::now()),
        );
    }
    let session = Session::with_readings(registry, readings).unwrap();
    AppState::new(test_config(), session)
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
