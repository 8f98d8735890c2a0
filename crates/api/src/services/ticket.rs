//! Ticket lifecycle: open, reassign, process, delete.
//!
//! Every path keeps the invariant that a vacancy is busy exactly when it has
//! one pending ticket. Multi-step writes claim the vacancy first and undo the
//! claim if the ticket write that follows fails.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parkinglot_core::error::CoreError;
use parkinglot_core::occupancy::{ensure_free, plan_reassignment};
use parkinglot_core::policy::ReassignmentPolicy;
use parkinglot_core::ticket::{ensure_deletable, ensure_processable, validate_exit};
use parkinglot_core::types::DbId;
use parkinglot_db::models::car::Car;
use parkinglot_db::models::ticket::{CreateTicket, NewTicket, ProcessTicket, Ticket, UpdateTicket};
use parkinglot_db::models::vacancy::Vacancy;
use parkinglot_db::store::Store;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{OccupancyManager, CAR, PARKING, TICKET, VACANCY};
use crate::error::{AppError, AppResult};

/// A ticket as returned by the API: the row plus its car, its vacancy and
/// the amount owed at read time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub paid_value: Decimal,
    pub car: Option<Car>,
    pub vacancy: Option<Vacancy>,
}

impl TicketView {
    fn new(ticket: Ticket, car: Option<Car>, vacancy: Option<Vacancy>) -> AppResult<Self> {
        let paid_value = ticket.paid_value(Utc::now())?;
        Ok(Self {
            ticket,
            paid_value,
            car,
            vacancy,
        })
    }
}

#[derive(Clone)]
pub struct TicketLifecycle {
    store: Arc<dyn Store>,
    occupancy: OccupancyManager,
    policy: ReassignmentPolicy,
}

impl TicketLifecycle {
    pub fn new(
        store: Arc<dyn Store>,
        occupancy: OccupancyManager,
        policy: ReassignmentPolicy,
    ) -> Self {
        Self {
            store,
            occupancy,
            policy,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<TicketView>> {
        let tickets = self.store.list_tickets().await?;
        let cars: HashMap<DbId, Car> = self
            .store
            .list_cars()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let vacancies: HashMap<DbId, Vacancy> = self
            .store
            .list_vacancies()
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();

        tickets
            .into_iter()
            .map(|ticket| {
                let car = cars.get(&ticket.car_id).cloned();
                let vacancy = vacancies.get(&ticket.vacancy_id).cloned();
                TicketView::new(ticket, car, vacancy)
            })
            .collect()
    }

    pub async fn get(&self, id: DbId) -> AppResult<TicketView> {
        let ticket = self.find(id).await?;
        self.view(ticket).await
    }

    /// Open a pending ticket for a car on a free vacancy.
    ///
    /// The rate is captured from the vacancy's parking at open time.
    pub async fn open(&self, input: &CreateTicket) -> AppResult<TicketView> {
        let car = self
            .store
            .find_car(input.car_id)
            .await?
            .ok_or(AppError::not_found(CAR, input.car_id))?;
        let vacancy = self
            .store
            .find_vacancy(input.vacancy_id)
            .await?
            .ok_or(AppError::not_found(VACANCY, input.vacancy_id))?;
        let parking = self
            .store
            .find_parking(vacancy.parking_id)
            .await?
            .ok_or(AppError::not_found(PARKING, vacancy.parking_id))?;
        ensure_free(vacancy.id, vacancy.busy)?;

        let vacancy = self.occupancy.occupy(vacancy.id).await?;

        let new_ticket = NewTicket {
            entry: Utc::now(),
            price_per_hour_of_parking: parking.price_per_hour,
            car_id: car.id,
            vacancy_id: vacancy.id,
        };
        let ticket = match self.store.create_ticket(&new_ticket).await {
            Ok(ticket) => ticket,
            Err(err) => {
                let err = AppError::from(err);
                self.occupancy.undo_claim(vacancy.id, &err).await;
                return Err(err);
            }
        };

        tracing::info!(
            ticket_id = ticket.id,
            car_id = car.id,
            vacancy_id = vacancy.id,
            price_per_hour = %ticket.price_per_hour_of_parking,
            "Ticket opened",
        );
        TicketView::new(ticket, Some(car), Some(vacancy))
    }

    /// Edit a ticket's entry time and vacancy.
    ///
    /// Moving a pending ticket runs the rewrite inside
    /// [`OccupancyManager::reassign`]. Processed tickets can be edited without
    /// touching occupancy.
    pub async fn reassign(&self, input: &UpdateTicket) -> AppResult<TicketView> {
        let ticket = self.find(input.id).await?;

        if ticket.vacancy_id != input.vacancy_id {
            let target = self
                .store
                .find_vacancy(input.vacancy_id)
                .await?
                .ok_or(AppError::not_found(VACANCY, input.vacancy_id))?;
            ensure_free(target.id, target.busy)?;
        }

        let plan = plan_reassignment(self.policy, ticket.status, ticket.vacancy_id, input.vacancy_id);
        let updated = self
            .occupancy
            .reassign(plan, || async {
                self.store
                    .update_ticket_assignment(input.id, input.entry, input.vacancy_id)
                    .await?
                    .ok_or(AppError::not_found(TICKET, input.id))
            })
            .await?;

        tracing::info!(
            ticket_id = updated.id,
            from_vacancy = ticket.vacancy_id,
            to_vacancy = updated.vacancy_id,
            policy = %self.policy,
            moved = !plan.is_noop(),
            "Ticket updated",
        );
        self.view(updated).await
    }

    /// Check a pending ticket out at `exit` and free its vacancy.
    pub async fn process(&self, input: &ProcessTicket) -> AppResult<TicketView> {
        let ticket = self.find(input.ticket_id).await?;
        ensure_processable(ticket.id, ticket.status)?;
        validate_exit(ticket.entry, input.exit)?;

        // Conditional on the ticket still being pending.
        let processed = self
            .store
            .mark_ticket_processed(ticket.id, input.exit)
            .await?
            .ok_or_else(|| {
                CoreError::Conflict(format!("Ticket {} has already been processed", ticket.id))
            })?;

        self.occupancy.release(processed.vacancy_id).await?;

        let view = self.view(processed).await?;
        tracing::info!(
            ticket_id = view.ticket.id,
            vacancy_id = view.ticket.vacancy_id,
            paid_value = %view.paid_value,
            "Ticket processed",
        );
        Ok(view)
    }

    /// Remove a processed ticket.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let ticket = self.find(id).await?;
        ensure_deletable(ticket.id, ticket.status)?;

        if !self.store.delete_ticket(id).await? {
            return Err(AppError::not_found(TICKET, id));
        }
        tracing::info!(ticket_id = id, "Ticket deleted");
        Ok(())
    }

    async fn find(&self, id: DbId) -> AppResult<Ticket> {
        self.store
            .find_ticket(id)
            .await?
            .ok_or(AppError::not_found(TICKET, id))
    }

    async fn view(&self, ticket: Ticket) -> AppResult<TicketView> {
        let car = self.store.find_car(ticket.car_id).await?;
        let vacancy = self.store.find_vacancy(ticket.vacancy_id).await?;
        TicketView::new(ticket, car, vacancy)
    }
}
