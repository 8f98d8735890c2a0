//! Repository layer: one zero-sized struct per table with async query methods.

mod car_repo;
mod parking_repo;
mod ticket_repo;
mod vacancy_repo;

pub use car_repo::CarRepo;
pub use parking_repo::ParkingRepo;
pub use ticket_repo::TicketRepo;
pub use vacancy_repo::VacancyRepo;
