//! Handlers for the `/api/Parking` resource.

use axum::extract::State;
use axum::Json;
use parkinglot_core::types::DbId;
use parkinglot_db::models::parking::{CreateParking, Parking, UpdateParking};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::IdParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/Parking
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Parking>>> {
    let parkings = state.parkings.list().await?;
    Ok(Json(parkings))
}

/// GET /api/Parking/GetParking/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Parking>> {
    let parking = state.parkings.get(id).await?;
    Ok(Json(parking))
}

/// POST /api/Parking
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateParking>,
) -> AppResult<Json<Parking>> {
    let parking = state.parkings.create(&input).await?;
    Ok(Json(parking))
}

/// PUT /api/Parking
///
/// A new price is applied to the lot's open tickets as well.
pub async fn update(
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateParking>,
) -> AppResult<Json<Parking>> {
    let parking = state.parkings.update(&input).await?;
    Ok(Json(parking))
}

/// DELETE /api/Parking?id=
pub async fn delete(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdParams>,
) -> AppResult<Json<MessageResponse>> {
    state.parkings.delete(params.id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Parking {} removed",
        params.id
    ))))
}
