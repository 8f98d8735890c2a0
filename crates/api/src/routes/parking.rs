//! Route definitions for the `/api/Parking` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::parking;
use crate::state::AppState;

/// Routes mounted at `/api/Parking`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// PUT    /                    -> update (id in body)
/// DELETE /?id=                -> delete
/// GET    /GetParking/{id}     -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(parking::list)
                .post(parking::create)
                .put(parking::update)
                .delete(parking::delete),
        )
        .route("/GetParking/{id}", get(parking::get_by_id))
}
