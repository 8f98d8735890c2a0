pub mod car;
pub mod parking;
pub mod ticket;
pub mod vacancy;
