//! Typed store interfaces.
//!
//! One async trait per entity kind, combined into [`Store`]. Services hold an
//! `Arc<dyn Store>` so the API runs unchanged on PostgreSQL ([`PgStore`]) or
//! on the in-process [`MemoryStore`].
//!
//! Vacancy occupancy and ticket processing are exposed as conditional writes
//! (`compare_and_set_busy`, `mark_ticket_processed`) so callers never have to
//! read-check-write those fields.

mod memory;
mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use parkinglot_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;

use crate::models::car::{Car, CreateCar, UpdateCar};
use crate::models::parking::{CreateParking, Parking, UpdateParking};
use crate::models::ticket::{NewTicket, Ticket};
use crate::models::vacancy::{CreateVacancy, UpdateVacancy, Vacancy};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors raised by any store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The call did not complete within the configured store timeout.
    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    /// A uniqueness or referential constraint rejected the write.
    #[error("Constraint violated: {0}")]
    Constraint(String),
}

impl StoreError {
    /// Name of the violated unique/foreign-key constraint, if this error is one.
    pub fn violated_constraint(&self) -> Option<&str> {
        match self {
            StoreError::Constraint(name) => Some(name),
            StoreError::Database(sqlx::Error::Database(db_err)) => {
                match db_err.code().as_deref() {
                    Some(UNIQUE_VIOLATION) | Some(FOREIGN_KEY_VIOLATION) => {
                        Some(db_err.constraint().unwrap_or("unknown"))
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CarStore: Send + Sync {
    async fn list_cars(&self) -> StoreResult<Vec<Car>>;
    async fn find_car(&self, id: DbId) -> StoreResult<Option<Car>>;
    async fn find_car_by_plate(&self, plate: &str) -> StoreResult<Option<Car>>;
    async fn create_car(&self, input: &CreateCar) -> StoreResult<Car>;
    /// Returns `None` if the car does not exist.
    async fn update_car(&self, input: &UpdateCar) -> StoreResult<Option<Car>>;
    /// Returns `true` if a row was removed.
    async fn delete_car(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait ParkingStore: Send + Sync {
    async fn list_parkings(&self) -> StoreResult<Vec<Parking>>;
    async fn find_parking(&self, id: DbId) -> StoreResult<Option<Parking>>;
    async fn create_parking(&self, input: &CreateParking) -> StoreResult<Parking>;
    /// Returns `None` if the parking does not exist.
    async fn update_parking(&self, input: &UpdateParking) -> StoreResult<Option<Parking>>;
    /// Returns `true` if a row was removed.
    async fn delete_parking(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait VacancyStore: Send + Sync {
    async fn list_vacancies(&self) -> StoreResult<Vec<Vacancy>>;
    async fn find_vacancy(&self, id: DbId) -> StoreResult<Option<Vacancy>>;
    async fn count_vacancies_by_parking(&self, parking_id: DbId) -> StoreResult<i64>;
    async fn create_vacancy(&self, input: &CreateVacancy) -> StoreResult<Vacancy>;
    /// Relabel only; returns `None` if the vacancy does not exist.
    async fn update_vacancy_number(&self, input: &UpdateVacancy) -> StoreResult<Option<Vacancy>>;
    /// Set `busy` only if it currently equals `expected`.
    ///
    /// Returns `None` when the vacancy is absent or in the other state.
    async fn compare_and_set_busy(
        &self,
        id: DbId,
        expected: bool,
        busy: bool,
    ) -> StoreResult<Option<Vacancy>>;
    /// Set `busy` unconditionally; returns `None` if the vacancy does not exist.
    async fn set_busy(&self, id: DbId, busy: bool) -> StoreResult<Option<Vacancy>>;
    /// Returns `true` if a row was removed.
    async fn delete_vacancy(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn list_tickets(&self) -> StoreResult<Vec<Ticket>>;
    async fn find_ticket(&self, id: DbId) -> StoreResult<Option<Ticket>>;
    async fn count_tickets_by_car(&self, car_id: DbId) -> StoreResult<i64>;
    async fn count_tickets_by_vacancy(&self, vacancy_id: DbId) -> StoreResult<i64>;
    async fn create_ticket(&self, input: &NewTicket) -> StoreResult<Ticket>;
    /// Returns `None` if the ticket does not exist.
    async fn update_ticket_assignment(
        &self,
        id: DbId,
        entry: Timestamp,
        vacancy_id: DbId,
    ) -> StoreResult<Option<Ticket>>;
    /// Close a pending ticket. Returns `None` if it is absent or already processed.
    async fn mark_ticket_processed(&self, id: DbId, exit: Timestamp)
        -> StoreResult<Option<Ticket>>;
    /// Returns the number of pending tickets repriced.
    async fn reprice_pending_tickets(
        &self,
        parking_id: DbId,
        price_per_hour: Decimal,
    ) -> StoreResult<u64>;
    /// Returns `true` if a row was removed.
    async fn delete_ticket(&self, id: DbId) -> StoreResult<bool>;
}

/// Every capability the API needs from persistence.
#[async_trait]
pub trait Store: CarStore + ParkingStore + VacancyStore + TicketStore {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// Check the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
