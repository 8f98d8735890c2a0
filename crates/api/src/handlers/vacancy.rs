//! Handlers for the `/api/Vacancy` resource.

use axum::extract::State;
use axum::Json;
use parkinglot_core::types::DbId;
use parkinglot_db::models::vacancy::{CreateVacancy, UpdateVacancy, Vacancy};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::IdParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/Vacancy
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Vacancy>>> {
    let vacancies = state.vacancies.list().await?;
    Ok(Json(vacancies))
}

/// GET /api/Vacancy/GetVacancy/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Vacancy>> {
    let vacancy = state.vacancies.get(id).await?;
    Ok(Json(vacancy))
}

/// POST /api/Vacancy
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateVacancy>,
) -> AppResult<Json<Vacancy>> {
    let vacancy = state.vacancies.create(&input).await?;
    Ok(Json(vacancy))
}

/// PUT /api/Vacancy
pub async fn update(
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateVacancy>,
) -> AppResult<Json<Vacancy>> {
    let vacancy = state.vacancies.update(&input).await?;
    Ok(Json(vacancy))
}

/// DELETE /api/Vacancy?id=
pub async fn delete(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdParams>,
) -> AppResult<Json<MessageResponse>> {
    state.vacancies.delete(params.id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Vacancy {} removed",
        params.id
    ))))
}
