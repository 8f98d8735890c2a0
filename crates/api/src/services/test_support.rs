//! Fixtures shared by the service unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parkinglot_core::types::{DbId, Timestamp};
use parkinglot_db::models::car::{Car, CreateCar, UpdateCar};
use parkinglot_db::models::parking::{CreateParking, Parking, UpdateParking};
use parkinglot_db::models::ticket::{NewTicket, Ticket};
use parkinglot_db::models::vacancy::{CreateVacancy, UpdateVacancy, Vacancy};
use parkinglot_db::store::{
    CarStore, MemoryStore, ParkingStore, Store, StoreError, StoreResult, TicketStore,
    VacancyStore,
};
use rust_decimal::Decimal;

/// Ids of the rows created by [`seed`].
pub struct Seed {
    pub car_id: DbId,
    pub parking_id: DbId,
    pub vacancy_id: DbId,
}

impl Seed {
    /// Open a ticket on the seeded vacancy directly through the store.
    pub async fn open_ticket(&self, store: &Arc<dyn Store>) -> Ticket {
        store
            .compare_and_set_busy(self.vacancy_id, false, true)
            .await
            .unwrap()
            .unwrap();
        store
            .create_ticket(&NewTicket {
                entry: Utc::now(),
                price_per_hour_of_parking: Decimal::new(1000, 2),
                car_id: self.car_id,
                vacancy_id: self.vacancy_id,
            })
            .await
            .unwrap()
    }
}

pub fn car_input(plate: &str) -> CreateCar {
    CreateCar {
        manufacture: "Fiat".to_string(),
        model: "Uno".to_string(),
        plate: plate.to_string(),
        color: None,
    }
}

/// Car `ABC123`, parking `Centro` at 10.00/h and its free vacancy `A1`.
pub async fn seed(store: &dyn Store) -> Seed {
    let car = store.create_car(&car_input("ABC123")).await.unwrap();
    let parking = store
        .create_parking(&CreateParking {
            name: "Centro".to_string(),
            price_per_hour: Decimal::new(1000, 2),
        })
        .await
        .unwrap();
    let vacancy = store
        .create_vacancy(&CreateVacancy {
            number: "A1".to_string(),
            parking_id: parking.id,
        })
        .await
        .unwrap();

    Seed {
        car_id: car.id,
        parking_id: parking.id,
        vacancy_id: vacancy.id,
    }
}

pub async fn seeded() -> (Arc<dyn Store>, Seed) {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let seed = seed(store.as_ref()).await;
    (store, seed)
}

pub async fn add_vacancy(store: &Arc<dyn Store>, parking_id: DbId, number: &str) -> Vacancy {
    store
        .create_vacancy(&CreateVacancy {
            number: number.to_string(),
            parking_id,
        })
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// FlakyStore
// ---------------------------------------------------------------------------

/// [`MemoryStore`] whose ticket writes can be made to fail on demand.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pub fail_create_ticket: AtomicBool,
    pub fail_update_ticket: AtomicBool,
    pub fail_reprice: AtomicBool,
}

impl FlakyStore {
    fn injected(flag: &AtomicBool) -> StoreResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Timeout(Duration::from_millis(1)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CarStore for FlakyStore {
    async fn list_cars(&self) -> StoreResult<Vec<Car>> {
        self.inner.list_cars().await
    }
    async fn find_car(&self, id: DbId) -> StoreResult<Option<Car>> {
        self.inner.find_car(id).await
    }
    async fn find_car_by_plate(&self, plate: &str) -> StoreResult<Option<Car>> {
        self.inner.find_car_by_plate(plate).await
    }
    async fn create_car(&self, input: &CreateCar) -> StoreResult<Car> {
        self.inner.create_car(input).await
    }
    async fn update_car(&self, input: &UpdateCar) -> StoreResult<Option<Car>> {
        self.inner.update_car(input).await
    }
    async fn delete_car(&self, id: DbId) -> StoreResult<bool> {
        self.inner.delete_car(id).await
    }
}

#[async_trait]
impl ParkingStore for FlakyStore {
    async fn list_parkings(&self) -> StoreResult<Vec<Parking>> {
        self.inner.list_parkings().await
    }
    async fn find_parking(&self, id: DbId) -> StoreResult<Option<Parking>> {
        self.inner.find_parking(id).await
    }
    async fn create_parking(&self, input: &CreateParking) -> StoreResult<Parking> {
        self.inner.create_parking(input).await
    }
    async fn update_parking(&self, input: &UpdateParking) -> StoreResult<Option<Parking>> {
        self.inner.update_parking(input).await
    }
    async fn delete_parking(&self, id: DbId) -> StoreResult<bool> {
        self.inner.delete_parking(id).await
    }
}

#[async_trait]
impl VacancyStore for FlakyStore {
    async fn list_vacancies(&self) -> StoreResult<Vec<Vacancy>> {
        self.inner.list_vacancies().await
    }
    async fn find_vacancy(&self, id: DbId) -> StoreResult<Option<Vacancy>> {
        self.inner.find_vacancy(id).await
    }
    async fn count_vacancies_by_parking(&self, parking_id: DbId) -> StoreResult<i64> {
        self.inner.count_vacancies_by_parking(parking_id).await
    }
    async fn create_vacancy(&self, input: &CreateVacancy) -> StoreResult<Vacancy> {
        self.inner.create_vacancy(input).await
    }
    async fn update_vacancy_number(&self, input: &UpdateVacancy) -> StoreResult<Option<Vacancy>> {
        self.inner.update_vacancy_number(input).await
    }
    async fn compare_and_set_busy(
        &self,
        id: DbId,
        expected: bool,
        busy: bool,
    ) -> StoreResult<Option<Vacancy>> {
        self.inner.compare_and_set_busy(id, expected, busy).await
    }
    async fn set_busy(&self, id: DbId, busy: bool) -> StoreResult<Option<Vacancy>> {
        self.inner.set_busy(id, busy).await
    }
    async fn delete_vacancy(&self, id: DbId) -> StoreResult<bool> {
        self.inner.delete_vacancy(id).await
    }
}

#[async_trait]
impl TicketStore for FlakyStore {
    async fn list_tickets(&self) -> StoreResult<Vec<Ticket>> {
        self.inner.list_tickets().await
    }
    async fn find_ticket(&self, id: DbId) -> StoreResult<Option<Ticket>> {
        self.inner.find_ticket(id).await
    }
    async fn count_tickets_by_car(&self, car_id: DbId) -> StoreResult<i64> {
        self.inner.count_tickets_by_car(car_id).await
    }
    async fn count_tickets_by_vacancy(&self, vacancy_id: DbId) -> StoreResult<i64> {
        self.inner.count_tickets_by_vacancy(vacancy_id).await
    }
    async fn create_ticket(&self, input: &NewTicket) -> StoreResult<Ticket> {
        Self::injected(&self.fail_create_ticket)?;
        self.inner.create_ticket(input).await
    }
    async fn update_ticket_assignment(
        &self,
        id: DbId,
        entry: Timestamp,
        vacancy_id: DbId,
    ) -> StoreResult<Option<Ticket>> {
        Self::injected(&self.fail_update_ticket)?;
        self.inner.update_ticket_assignment(id, entry, vacancy_id).await
    }
    async fn mark_ticket_processed(
        &self,
        id: DbId,
        exit: Timestamp,
    ) -> StoreResult<Option<Ticket>> {
        self.inner.mark_ticket_processed(id, exit).await
    }
    async fn reprice_pending_tickets(
        &self,
        parking_id: DbId,
        price_per_hour: Decimal,
    ) -> StoreResult<u64> {
        Self::injected(&self.fail_reprice)?;
        self.inner.reprice_pending_tickets(parking_id, price_per_hour).await
    }
    async fn delete_ticket(&self, id: DbId) -> StoreResult<bool> {
        self.inner.delete_ticket(id).await
    }
}

#[async_trait]
impl Store for FlakyStore {
    fn backend(&self) -> &'static str {
        "flaky"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }
}
