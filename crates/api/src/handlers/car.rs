//! Handlers for the `/api/Car` resource.

use axum::extract::State;
use axum::Json;
use parkinglot_core::types::DbId;
use parkinglot_db::models::car::{Car, CreateCar, UpdateCar};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::IdParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/Car
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Car>>> {
    let cars = state.cars.list().await?;
    Ok(Json(cars))
}

/// GET /api/Car/GetCar/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Car>> {
    let car = state.cars.get(id).await?;
    Ok(Json(car))
}

/// POST /api/Car
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCar>,
) -> AppResult<Json<Car>> {
    let car = state.cars.create(&input).await?;
    Ok(Json(car))
}

/// PUT /api/Car
pub async fn update(
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateCar>,
) -> AppResult<Json<Car>> {
    let car = state.cars.update(&input).await?;
    Ok(Json(car))
}

/// DELETE /api/Car?id=
pub async fn delete(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdParams>,
) -> AppResult<Json<MessageResponse>> {
    state.cars.delete(params.id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Car {} removed",
        params.id
    ))))
}
