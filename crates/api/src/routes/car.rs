//! Route definitions for the `/api/Car` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::car;
use crate::state::AppState;

/// Routes mounted at `/api/Car`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// PUT    /                    -> update (id in body)
/// DELETE /?id=                -> delete
/// GET    /GetCar/{id}         -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(car::list)
                .post(car::create)
                .put(car::update)
                .delete(car::delete),
        )
        .route("/GetCar/{id}", get(car::get_by_id))
}
