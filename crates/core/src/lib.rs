//! Domain rules for the parking lot backend.
//!
//! Everything in this crate is free of I/O: identifiers, the error taxonomy,
//! fee computation, ticket state rules and the vacancy occupancy rules that
//! the API services apply on top of a store.

pub mod billing;
pub mod error;
pub mod occupancy;
pub mod policy;
pub mod ticket;
pub mod types;
pub mod validation;
