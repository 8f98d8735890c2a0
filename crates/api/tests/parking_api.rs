//! HTTP-level integration tests for `/api/Parking`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_car, create_parking, create_vacancy, delete, get, open_ticket, post_json,
    put_json,
};
use parkinglot_core::policy::PricePropagation;

#[tokio::test]
async fn create_and_get_parking() {
    let app = common::build_test_app();
    let response = post_json(
        app.clone(),
        "/api/Parking",
        serde_json::json!({ "name": "Centro", "pricePerHour": 7.5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let json = body_json(get(app, &format!("/api/Parking/GetParking/{id}")).await).await;
    assert_eq!(json["name"], "Centro");
    assert_eq!(json["pricePerHour"], 7.5);
}

#[tokio::test]
async fn zero_price_returns_400_validation() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/Parking",
        serde_json::json!({ "name": "Free", "pricePerHour": 0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["Error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn price_beyond_column_range_returns_400_validation() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/Parking",
        serde_json::json!({ "name": "Gold", "pricePerHour": 1e24 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["Error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn price_change_reprices_open_ticket() {
    let app = common::build_test_app();
    let car_id = create_car(&app, "ABC123").await;
    let parking_id = create_parking(&app, "Centro", 10.0).await;
    let vacancy_id = create_vacancy(&app, parking_id, "A1").await;
    let ticket = body_json(open_ticket(&app, car_id, vacancy_id).await).await;
    let ticket_id = ticket["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        "/api/Parking",
        serde_json::json!({ "id": parking_id, "name": "Centro", "pricePerHour": 12.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, &format!("/api/Ticket/GetTicket/{ticket_id}")).await).await;
    assert_eq!(json["pricePerHourOfParking"], 12.0);
}

#[tokio::test]
async fn snapshot_mode_keeps_ticket_rate() {
    let config = parkinglot_api::config::ServerConfig {
        price_propagation: PricePropagation::Snapshot,
        ..common::test_config()
    };
    let app = common::build_test_app_with(config);
    let car_id = create_car(&app, "ABC123").await;
    let parking_id = create_parking(&app, "Centro", 10.0).await;
    let vacancy_id = create_vacancy(&app, parking_id, "A1").await;
    let ticket = body_json(open_ticket(&app, car_id, vacancy_id).await).await;
    let ticket_id = ticket["id"].as_i64().unwrap();

    put_json(
        app.clone(),
        "/api/Parking",
        serde_json::json!({ "id": parking_id, "name": "Centro", "pricePerHour": 12.0 }),
    )
    .await;

    let json = body_json(get(app, &format!("/api/Ticket/GetTicket/{ticket_id}")).await).await;
    assert_eq!(json["pricePerHourOfParking"], 10.0);
}

#[tokio::test]
async fn parking_with_vacancy_cannot_be_deleted() {
    let app = common::build_test_app();
    let parking_id = create_parking(&app, "Centro", 10.0).await;
    let vacancy_id = create_vacancy(&app, parking_id, "A1").await;

    let response = delete(app.clone(), &format!("/api/Parking?id={parking_id}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete(app.clone(), &format!("/api/Vacancy?id={vacancy_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(app, &format!("/api/Parking?id={parking_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
