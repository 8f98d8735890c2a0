//! Route definitions for the `/api/Vacancy` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::vacancy;
use crate::state::AppState;

/// Routes mounted at `/api/Vacancy`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// PUT    /                    -> update (relabel only, id in body)
/// DELETE /?id=                -> delete
/// GET    /GetVacancy/{id}     -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(vacancy::list)
                .post(vacancy::create)
                .put(vacancy::update)
                .delete(vacancy::delete),
        )
        .route("/GetVacancy/{id}", get(vacancy::get_by_id))
}
