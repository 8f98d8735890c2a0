//! [`Store`] backed by PostgreSQL through the `*Repo` query structs.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use parkinglot_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;

use super::{CarStore, ParkingStore, Store, StoreError, StoreResult, TicketStore, VacancyStore};
use crate::models::car::{Car, CreateCar, UpdateCar};
use crate::models::parking::{CreateParking, Parking, UpdateParking};
use crate::models::ticket::{NewTicket, Ticket};
use crate::models::vacancy::{CreateVacancy, UpdateVacancy, Vacancy};
use crate::repositories::{CarRepo, ParkingRepo, TicketRepo, VacancyRepo};
use crate::DbPool;

/// PostgreSQL store. Every query is bounded by `timeout`.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
    timeout: Duration,
}

impl PgStore {
    pub fn new(pool: DbPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn timed<T, F>(&self, fut: F) -> StoreResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "Store call timed out");
                Err(StoreError::Timeout(self.timeout))
            }
        }
    }
}

#[async_trait]
impl CarStore for PgStore {
    async fn list_cars(&self) -> StoreResult<Vec<Car>> {
        self.timed(CarRepo::list(&self.pool)).await
    }

    async fn find_car(&self, id: DbId) -> StoreResult<Option<Car>> {
        self.timed(CarRepo::find_by_id(&self.pool, id)).await
    }

    async fn find_car_by_plate(&self, plate: &str) -> StoreResult<Option<Car>> {
        self.timed(CarRepo::find_by_plate(&self.pool, plate)).await
    }

    async fn create_car(&self, input: &CreateCar) -> StoreResult<Car> {
        self.timed(CarRepo::create(&self.pool, input)).await
    }

    async fn update_car(&self, input: &UpdateCar) -> StoreResult<Option<Car>> {
        self.timed(CarRepo::update(&self.pool, input)).await
    }

    async fn delete_car(&self, id: DbId) -> StoreResult<bool> {
        self.timed(CarRepo::delete(&self.pool, id)).await
    }
}

#[async_trait]
impl ParkingStore for PgStore {
    async fn list_parkings(&self) -> StoreResult<Vec<Parking>> {
        self.timed(ParkingRepo::list(&self.pool)).await
    }

    async fn find_parking(&self, id: DbId) -> StoreResult<Option<Parking>> {
        self.timed(ParkingRepo::find_by_id(&self.pool, id)).await
    }

    async fn create_parking(&self, input: &CreateParking) -> StoreResult<Parking> {
        self.timed(ParkingRepo::create(&self.pool, input)).await
    }

    async fn update_parking(&self, input: &UpdateParking) -> StoreResult<Option<Parking>> {
        self.timed(ParkingRepo::update(&self.pool, input)).await
    }

    async fn delete_parking(&self, id: DbId) -> StoreResult<bool> {
        self.timed(ParkingRepo::delete(&self.pool, id)).await
    }
}

#[async_trait]
impl VacancyStore for PgStore {
    async fn list_vacancies(&self) -> StoreResult<Vec<Vacancy>> {
        self.timed(VacancyRepo::list(&self.pool)).await
    }

    async fn find_vacancy(&self, id: DbId) -> StoreResult<Option<Vacancy>> {
        self.timed(VacancyRepo::find_by_id(&self.pool, id)).await
    }

    async fn count_vacancies_by_parking(&self, parking_id: DbId) -> StoreResult<i64> {
        self.timed(VacancyRepo::count_by_parking(&self.pool, parking_id))
            .await
    }

    async fn create_vacancy(&self, input: &CreateVacancy) -> StoreResult<Vacancy> {
        self.timed(VacancyRepo::create(&self.pool, input)).await
    }

    async fn update_vacancy_number(&self, input: &UpdateVacancy) -> StoreResult<Option<Vacancy>> {
        self.timed(VacancyRepo::update_number(&self.pool, input)).await
    }

    async fn compare_and_set_busy(
        &self,
        id: DbId,
        expected: bool,
        busy: bool,
    ) -> StoreResult<Option<Vacancy>> {
        self.timed(VacancyRepo::compare_and_set_busy(
            &self.pool, id, expected, busy,
        ))
        .await
    }

    async fn set_busy(&self, id: DbId, busy: bool) -> StoreResult<Option<Vacancy>> {
        self.timed(VacancyRepo::set_busy(&self.pool, id, busy)).await
    }

    async fn delete_vacancy(&self, id: DbId) -> StoreResult<bool> {
        self.timed(VacancyRepo::delete(&self.pool, id)).await
    }
}

#[async_trait]
impl TicketStore for PgStore {
    async fn list_tickets(&self) -> StoreResult<Vec<Ticket>> {
        self.timed(TicketRepo::list(&self.pool)).await
    }

    async fn find_ticket(&self, id: DbId) -> StoreResult<Option<Ticket>> {
        self.timed(TicketRepo::find_by_id(&self.pool, id)).await
    }

    async fn count_tickets_by_car(&self, car_id: DbId) -> StoreResult<i64> {
        self.timed(TicketRepo::count_by_car(&self.pool, car_id)).await
    }

    async fn count_tickets_by_vacancy(&self, vacancy_id: DbId) -> StoreResult<i64> {
        self.timed(TicketRepo::count_by_vacancy(&self.pool, vacancy_id))
            .await
    }

    async fn create_ticket(&self, input: &NewTicket) -> StoreResult<Ticket> {
        self.timed(TicketRepo::create(&self.pool, input)).await
    }

    async fn update_ticket_assignment(
        &self,
        id: DbId,
        entry: Timestamp,
        vacancy_id: DbId,
    ) -> StoreResult<Option<Ticket>> {
        self.timed(TicketRepo::update_assignment(
            &self.pool, id, entry, vacancy_id,
        ))
        .await
    }

    async fn mark_ticket_processed(
        &self,
        id: DbId,
        exit: Timestamp,
    ) -> StoreResult<Option<Ticket>> {
        self.timed(TicketRepo::mark_processed(&self.pool, id, exit))
            .await
    }

    async fn reprice_pending_tickets(
        &self,
        parking_id: DbId,
        price_per_hour: Decimal,
    ) -> StoreResult<u64> {
        self.timed(TicketRepo::reprice_pending_by_parking(
            &self.pool,
            parking_id,
            price_per_hour,
        ))
        .await
    }

    async fn delete_ticket(&self, id: DbId) -> StoreResult<bool> {
        self.timed(TicketRepo::delete(&self.pool, id)).await
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.timed(crate::health_check(&self.pool)).await
    }
}
