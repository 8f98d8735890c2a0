//! In-process [`Store`] for local runs and tests.
//!
//! Tables are `BTreeMap`s behind one async mutex, with per-table id sequences
//! like BIGSERIAL. The same constraints the migrations declare are enforced
//! here and reported under the same names, so callers cannot tell the two
//! backends apart by their failures.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parkinglot_core::ticket::TicketStatus;
use parkinglot_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::{CarStore, ParkingStore, Store, StoreError, StoreResult, TicketStore, VacancyStore};
use crate::models::car::{Car, CreateCar, UpdateCar};
use crate::models::parking::{CreateParking, Parking, UpdateParking};
use crate::models::ticket::{NewTicket, Ticket};
use crate::models::vacancy::{CreateVacancy, UpdateVacancy, Vacancy};

struct Table<T> {
    rows: BTreeMap<DbId, T>,
    last_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn get(&self, id: DbId) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

#[derive(Default)]
struct Tables {
    cars: Table<Car>,
    parkings: Table<Parking>,
    vacancies: Table<Vacancy>,
    tickets: Table<Ticket>,
}

impl Tables {
    fn plate_taken(&self, plate: &str, except: Option<DbId>) -> bool {
        self.cars
            .rows
            .values()
            .any(|car| car.plate == plate && Some(car.id) != except)
    }

    fn has_pending_ticket(&self, vacancy_id: DbId, except: Option<DbId>) -> bool {
        self.tickets.rows.values().any(|t| {
            t.vacancy_id == vacancy_id && t.status.is_pending() && Some(t.id) != except
        })
    }

    fn parking_of(&self, vacancy_id: DbId) -> Option<DbId> {
        self.vacancies.rows.get(&vacancy_id).map(|v| v.parking_id)
    }
}

fn violation(constraint: &str) -> StoreError {
    StoreError::Constraint(constraint.to_string())
}

/// Store keeping every table in memory. Cheap to create; one per test.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CarStore for MemoryStore {
    async fn list_cars(&self) -> StoreResult<Vec<Car>> {
        Ok(self.tables.lock().await.cars.all())
    }

    async fn find_car(&self, id: DbId) -> StoreResult<Option<Car>> {
        Ok(self.tables.lock().await.cars.get(id))
    }

    async fn find_car_by_plate(&self, plate: &str) -> StoreResult<Option<Car>> {
        let tables = self.tables.lock().await;
        Ok(tables.cars.rows.values().find(|c| c.plate == plate).cloned())
    }

    async fn create_car(&self, input: &CreateCar) -> StoreResult<Car> {
        let mut tables = self.tables.lock().await;
        if tables.plate_taken(&input.plate, None) {
            return Err(violation("uq_cars_plate"));
        }
        let now = Utc::now();
        let car = Car {
            id: tables.cars.next_id(),
            manufacture: input.manufacture.clone(),
            model: input.model.clone(),
            plate: input.plate.clone(),
            color: input.color.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.cars.rows.insert(car.id, car.clone());
        Ok(car)
    }

    async fn update_car(&self, input: &UpdateCar) -> StoreResult<Option<Car>> {
        let mut tables = self.tables.lock().await;
        if !tables.cars.rows.contains_key(&input.id) {
            return Ok(None);
        }
        if tables.plate_taken(&input.plate, Some(input.id)) {
            return Err(violation("uq_cars_plate"));
        }
        let Some(car) = tables.cars.rows.get_mut(&input.id) else {
            return Ok(None);
        };
        car.manufacture = input.manufacture.clone();
        car.model = input.model.clone();
        car.plate = input.plate.clone();
        car.color = input.color.clone();
        car.updated_at = Utc::now();
        Ok(Some(car.clone()))
    }

    async fn delete_car(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.tickets.rows.values().any(|t| t.car_id == id) {
            return Err(violation("fk_tickets_car"));
        }
        Ok(tables.cars.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl ParkingStore for MemoryStore {
    async fn list_parkings(&self) -> StoreResult<Vec<Parking>> {
        Ok(self.tables.lock().await.parkings.all())
    }

    async fn find_parking(&self, id: DbId) -> StoreResult<Option<Parking>> {
        Ok(self.tables.lock().await.parkings.get(id))
    }

    async fn create_parking(&self, input: &CreateParking) -> StoreResult<Parking> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let parking = Parking {
            id: tables.parkings.next_id(),
            name: input.name.clone(),
            price_per_hour: input.price_per_hour,
            created_at: now,
            updated_at: now,
        };
        tables.parkings.rows.insert(parking.id, parking.clone());
        Ok(parking)
    }

    async fn update_parking(&self, input: &UpdateParking) -> StoreResult<Option<Parking>> {
        let mut tables = self.tables.lock().await;
        let Some(parking) = tables.parkings.rows.get_mut(&input.id) else {
            return Ok(None);
        };
        parking.name = input.name.clone();
        parking.price_per_hour = input.price_per_hour;
        parking.updated_at = Utc::now();
        Ok(Some(parking.clone()))
    }

    async fn delete_parking(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.vacancies.rows.values().any(|v| v.parking_id == id) {
            return Err(violation("fk_vacancies_parking"));
        }
        Ok(tables.parkings.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl VacancyStore for MemoryStore {
    async fn list_vacancies(&self) -> StoreResult<Vec<Vacancy>> {
        Ok(self.tables.lock().await.vacancies.all())
    }

    async fn find_vacancy(&self, id: DbId) -> StoreResult<Option<Vacancy>> {
        Ok(self.tables.lock().await.vacancies.get(id))
    }

    async fn count_vacancies_by_parking(&self, parking_id: DbId) -> StoreResult<i64> {
        let tables = self.tables.lock().await;
        let count = tables
            .vacancies
            .rows
            .values()
            .filter(|v| v.parking_id == parking_id)
            .count();
        Ok(count as i64)
    }

    async fn create_vacancy(&self, input: &CreateVacancy) -> StoreResult<Vacancy> {
        let mut tables = self.tables.lock().await;
        if !tables.parkings.rows.contains_key(&input.parking_id) {
            return Err(violation("fk_vacancies_parking"));
        }
        let now = Utc::now();
        let vacancy = Vacancy {
            id: tables.vacancies.next_id(),
            number: input.number.clone(),
            busy: false,
            parking_id: input.parking_id,
            created_at: now,
            updated_at: now,
        };
        tables.vacancies.rows.insert(vacancy.id, vacancy.clone());
        Ok(vacancy)
    }

    async fn update_vacancy_number(&self, input: &UpdateVacancy) -> StoreResult<Option<Vacancy>> {
        let mut tables = self.tables.lock().await;
        let Some(vacancy) = tables.vacancies.rows.get_mut(&input.id) else {
            return Ok(None);
        };
        vacancy.number = input.number.clone();
        vacancy.updated_at = Utc::now();
        Ok(Some(vacancy.clone()))
    }

    async fn compare_and_set_busy(
        &self,
        id: DbId,
        expected: bool,
        busy: bool,
    ) -> StoreResult<Option<Vacancy>> {
        let mut tables = self.tables.lock().await;
        match tables.vacancies.rows.get_mut(&id) {
            Some(vacancy) if vacancy.busy == expected => {
                vacancy.busy = busy;
                vacancy.updated_at = Utc::now();
                Ok(Some(vacancy.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn set_busy(&self, id: DbId, busy: bool) -> StoreResult<Option<Vacancy>> {
        let mut tables = self.tables.lock().await;
        let Some(vacancy) = tables.vacancies.rows.get_mut(&id) else {
            return Ok(None);
        };
        vacancy.busy = busy;
        vacancy.updated_at = Utc::now();
        Ok(Some(vacancy.clone()))
    }

    async fn delete_vacancy(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.tickets.rows.values().any(|t| t.vacancy_id == id) {
            return Err(violation("fk_tickets_vacancy"));
        }
        Ok(tables.vacancies.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn list_tickets(&self) -> StoreResult<Vec<Ticket>> {
        Ok(self.tables.lock().await.tickets.all())
    }

    async fn find_ticket(&self, id: DbId) -> StoreResult<Option<Ticket>> {
        Ok(self.tables.lock().await.tickets.get(id))
    }

    async fn count_tickets_by_car(&self, car_id: DbId) -> StoreResult<i64> {
        let tables = self.tables.lock().await;
        let count = tables.tickets.rows.values().filter(|t| t.car_id == car_id).count();
        Ok(count as i64)
    }

    async fn count_tickets_by_vacancy(&self, vacancy_id: DbId) -> StoreResult<i64> {
        let tables = self.tables.lock().await;
        let count = tables
            .tickets
            .rows
            .values()
            .filter(|t| t.vacancy_id == vacancy_id)
            .count();
        Ok(count as i64)
    }

    async fn create_ticket(&self, input: &NewTicket) -> StoreResult<Ticket> {
        let mut tables = self.tables.lock().await;
        if !tables.cars.rows.contains_key(&input.car_id) {
            return Err(violation("fk_tickets_car"));
        }
        if !tables.vacancies.rows.contains_key(&input.vacancy_id) {
            return Err(violation("fk_tickets_vacancy"));
        }
        if tables.has_pending_ticket(input.vacancy_id, None) {
            return Err(violation("uq_tickets_pending_vacancy"));
        }
        let now = Utc::now();
        let ticket = Ticket {
            id: tables.tickets.next_id(),
            entry: input.entry,
            exit: None,
            price_per_hour_of_parking: input.price_per_hour_of_parking,
            status: TicketStatus::Pending,
            car_id: input.car_id,
            vacancy_id: input.vacancy_id,
            created_at: now,
            updated_at: now,
        };
        tables.tickets.rows.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn update_ticket_assignment(
        &self,
        id: DbId,
        entry: Timestamp,
        vacancy_id: DbId,
    ) -> StoreResult<Option<Ticket>> {
        let mut tables = self.tables.lock().await;
        let Some(current) = tables.tickets.get(id) else {
            return Ok(None);
        };
        if !tables.vacancies.rows.contains_key(&vacancy_id) {
            return Err(violation("fk_tickets_vacancy"));
        }
        if current.status.is_pending() && tables.has_pending_ticket(vacancy_id, Some(id)) {
            return Err(violation("uq_tickets_pending_vacancy"));
        }
        let Some(ticket) = tables.tickets.rows.get_mut(&id) else {
            return Ok(None);
        };
        ticket.entry = entry;
        ticket.vacancy_id = vacancy_id;
        ticket.updated_at = Utc::now();
        Ok(Some(ticket.clone()))
    }

    async fn mark_ticket_processed(
        &self,
        id: DbId,
        exit: Timestamp,
    ) -> StoreResult<Option<Ticket>> {
        let mut tables = self.tables.lock().await;
        match tables.tickets.rows.get_mut(&id) {
            Some(ticket) if ticket.status.is_pending() => {
                ticket.exit = Some(exit);
                ticket.status = TicketStatus::Processed;
                ticket.updated_at = Utc::now();
                Ok(Some(ticket.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn reprice_pending_tickets(
        &self,
        parking_id: DbId,
        price_per_hour: Decimal,
    ) -> StoreResult<u64> {
        let mut tables = self.tables.lock().await;
        let targets: Vec<DbId> = tables
            .tickets
            .rows
            .values()
            .filter(|t| t.status.is_pending() && tables.parking_of(t.vacancy_id) == Some(parking_id))
            .map(|t| t.id)
            .collect();
        let now = Utc::now();
        for id in &targets {
            if let Some(ticket) = tables.tickets.rows.get_mut(id) {
                ticket.price_per_hour_of_parking = price_per_hour;
                ticket.updated_at = now;
            }
        }
        Ok(targets.len() as u64)
    }

    async fn delete_ticket(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.lock().await.tickets.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
