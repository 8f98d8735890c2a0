//! Entity rows and request DTOs.
//!
//! Rows derive `FromRow` for the PostgreSQL repositories and `Serialize` for
//! API responses; JSON field names are camelCase.

pub mod car;
pub mod parking;
pub mod ticket;
pub mod vacancy;
