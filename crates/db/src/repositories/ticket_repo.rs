//! Repository for the `tickets` table.

use parkinglot_core::ticket::TicketStatus;
use parkinglot_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::ticket::{NewTicket, Ticket};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, entry, exit, price_per_hour_of_parking, status_id, \
    car_id, vacancy_id, created_at, updated_at";

/// Provides CRUD and lifecycle operations for tickets.
pub struct TicketRepo;

impl TicketRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new pending ticket, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewTicket) -> Result<Ticket, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets (entry, price_per_hour_of_parking, status_id, car_id, vacancy_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(input.entry)
            .bind(input.price_per_hour_of_parking)
            .bind(TicketStatus::Pending.id())
            .bind(input.car_id)
            .bind(input.vacancy_id)
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tickets ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets ORDER BY id");
        sqlx::query_as::<_, Ticket>(&query).fetch_all(pool).await
    }

    /// Count the tickets (any status) issued to a car.
    pub async fn count_by_car(pool: &PgPool, car_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE car_id = $1")
            .bind(car_id)
            .fetch_one(pool)
            .await
    }

    /// Count the tickets (any status) issued for a vacancy.
    pub async fn count_by_vacancy(pool: &PgPool, vacancy_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE vacancy_id = $1")
            .bind(vacancy_id)
            .fetch_one(pool)
            .await
    }

    /// Change a ticket's entry time and vacancy.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_assignment(
        pool: &PgPool,
        id: DbId,
        entry: Timestamp,
        vacancy_id: DbId,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET entry = $2, vacancy_id = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(entry)
            .bind(vacancy_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a ticket by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Close a pending ticket with the given exit time.
    ///
    /// The status check is part of the `WHERE` clause, so of two concurrent
    /// calls only one gets a row back.
    pub async fn mark_processed(
        pool: &PgPool,
        id: DbId,
        exit: Timestamp,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET exit = $2, status_id = $3, updated_at = NOW()
             WHERE id = $1 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(exit)
            .bind(TicketStatus::Processed.id())
            .bind(TicketStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// Apply a new hourly rate to every pending ticket of a parking lot.
    /// Returns the number of tickets repriced.
    pub async fn reprice_pending_by_parking(
        pool: &PgPool,
        parking_id: DbId,
        price_per_hour: Decimal,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tickets SET price_per_hour_of_parking = $2, updated_at = NOW()
             WHERE status_id = $3
               AND vacancy_id IN (SELECT id FROM vacancies WHERE parking_id = $1)",
        )
        .bind(parking_id)
        .bind(price_per_hour)
        .bind(TicketStatus::Pending.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
