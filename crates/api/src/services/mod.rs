//! Domain services over the [`Store`](parkinglot_db::store::Store).
//!
//! Handlers stay thin: every lookup, rule check and multi-step write lives
//! here. [`TicketLifecycle`] and [`OccupancyManager`] together keep a
//! vacancy's `busy` flag in step with its open ticket.

mod car;
mod occupancy;
mod parking;
mod ticket;
mod vacancy;

#[cfg(test)]
pub(crate) mod test_support;

pub use car::CarService;
pub use occupancy::OccupancyManager;
pub use parking::ParkingService;
pub use ticket::{TicketLifecycle, TicketView};
pub use vacancy::VacancyService;

pub(crate) const CAR: &str = "Car";
pub(crate) const PARKING: &str = "Parking";
pub(crate) const VACANCY: &str = "Vacancy";
pub(crate) const TICKET: &str = "Ticket";
