pub mod car;
pub mod health;
pub mod parking;
pub mod ticket;
pub mod vacancy;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /Car                           list, create, update, delete (?id=)
/// /Car/GetCar/{id}               get
///
/// /Parking                       list, create, update, delete (?id=)
/// /Parking/GetParking/{id}       get
///
/// /Vacancy                       list, create, update, delete (?id=)
/// /Vacancy/GetVacancy/{id}       get
///
/// /Ticket                        list, open, edit, delete (?id=)
/// /Ticket/GetTicket/{id}         get
/// /Ticket/ProcessedTicket        process (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/Car", car::router())
        .nest("/Parking", parking::router())
        .nest("/Vacancy", vacancy::router())
        .nest("/Ticket", ticket::router())
}
