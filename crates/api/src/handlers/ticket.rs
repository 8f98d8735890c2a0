//! Handlers for the `/api/Ticket` resource.
//!
//! Ticket bodies embed the car, the vacancy and the current `paidValue`.

use axum::extract::State;
use axum::Json;
use parkinglot_core::types::DbId;
use parkinglot_db::models::ticket::{CreateTicket, ProcessTicket, UpdateTicket};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::IdParams;
use crate::response::MessageResponse;
use crate::services::TicketView;
use crate::state::AppState;

/// GET /api/Ticket
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TicketView>>> {
    let tickets = state.tickets.list().await?;
    Ok(Json(tickets))
}

/// GET /api/Ticket/GetTicket/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<TicketView>> {
    let ticket = state.tickets.get(id).await?;
    Ok(Json(ticket))
}

/// POST /api/Ticket
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTicket>,
) -> AppResult<Json<TicketView>> {
    let ticket = state.tickets.open(&input).await?;
    Ok(Json(ticket))
}

/// PUT /api/Ticket
pub async fn update(
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateTicket>,
) -> AppResult<Json<TicketView>> {
    let ticket = state.tickets.reassign(&input).await?;
    Ok(Json(ticket))
}

/// POST /api/Ticket/ProcessedTicket
pub async fn process(
    State(state): State<AppState>,
    AppJson(input): AppJson<ProcessTicket>,
) -> AppResult<Json<TicketView>> {
    let ticket = state.tickets.process(&input).await?;
    Ok(Json(ticket))
}

/// DELETE /api/Ticket?id=
pub async fn delete(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdParams>,
) -> AppResult<Json<MessageResponse>> {
    state.tickets.delete(params.id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Ticket {} removed",
        params.id
    ))))
}
