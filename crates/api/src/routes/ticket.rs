//! Route definitions for the `/api/Ticket` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ticket;
use crate::state::AppState;

/// Routes mounted at `/api/Ticket`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create (open)
/// PUT    /                    -> update (reassign, id in body)
/// DELETE /?id=                -> delete
/// GET    /GetTicket/{id}      -> get_by_id
/// POST   /ProcessedTicket     -> process
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ticket::list)
                .post(ticket::create)
                .put(ticket::update)
                .delete(ticket::delete),
        )
        .route("/GetTicket/{id}", get(ticket::get_by_id))
        .route("/ProcessedTicket", post(ticket::process))
}
