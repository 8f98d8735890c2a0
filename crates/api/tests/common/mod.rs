#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use parkinglot_api::config::{LogFormat, ServerConfig, StoreBackend};
use parkinglot_api::router::build_app_router;
use parkinglot_api::state::AppState;
use parkinglot_core::policy::{PricePropagation, ReassignmentPolicy};
use parkinglot_db::store::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

/// Build a test `ServerConfig` on the in-memory store.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_timeout_ms: 5000,
        store_backend: StoreBackend::Memory,
        database_url: None,
        reassignment_policy: ReassignmentPolicy::ClaimTarget,
        price_propagation: PricePropagation::OpenTickets,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over a fresh [`MemoryStore`].
///
/// Clone the returned router for each request; clones share the store.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_car(app: &Router, plate: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/Car",
        serde_json::json!({
            "manufacture": "Fiat",
            "model": "Uno",
            "plate": plate,
            "color": "White",
        }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

pub async fn create_parking(app: &Router, name: &str, price_per_hour: f64) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/Parking",
        serde_json::json!({ "name": name, "pricePerHour": price_per_hour }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

pub async fn create_vacancy(app: &Router, parking_id: i64, number: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/Vacancy",
        serde_json::json!({ "number": number, "parkingId": parking_id }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

pub async fn open_ticket(app: &Router, car_id: i64, vacancy_id: i64) -> Response {
    post_json(
        app.clone(),
        "/api/Ticket",
        serde_json::json!({ "carId": car_id, "vacancyId": vacancy_id }),
    )
    .await
}

pub async fn vacancy_busy(app: &Router, vacancy_id: i64) -> bool {
    let response = get(app.clone(), &format!("/api/Vacancy/GetVacancy/{vacancy_id}")).await;
    body_json(response).await["busy"].as_bool().unwrap()
}
