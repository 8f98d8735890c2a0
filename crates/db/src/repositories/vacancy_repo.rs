//! Repository for the `vacancies` table.

use parkinglot_core::types::DbId;
use sqlx::PgPool;

use crate::models::vacancy::{CreateVacancy, UpdateVacancy, Vacancy};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, number, busy, parking_id, created_at, updated_at";

/// Provides CRUD and occupancy operations for vacancies.
pub struct VacancyRepo;

impl VacancyRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new vacancy, returning the created row. New vacancies are free.
    pub async fn create(pool: &PgPool, input: &CreateVacancy) -> Result<Vacancy, sqlx::Error> {
        let query = format!(
            "INSERT INTO vacancies (number, busy, parking_id)
             VALUES ($1, FALSE, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vacancy>(&query)
            .bind(&input.number)
            .bind(input.parking_id)
            .fetch_one(pool)
            .await
    }

    /// Find a vacancy by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vacancy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vacancies WHERE id = $1");
        sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all vacancies ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Vacancy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vacancies ORDER BY id");
        sqlx::query_as::<_, Vacancy>(&query).fetch_all(pool).await
    }

    /// Count the vacancies belonging to a parking lot.
    pub async fn count_by_parking(pool: &PgPool, parking_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM vacancies WHERE parking_id = $1")
            .bind(parking_id)
            .fetch_one(pool)
            .await
    }

    /// Relabel a vacancy. `busy` and `parking_id` are left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_number(
        pool: &PgPool,
        input: &UpdateVacancy,
    ) -> Result<Option<Vacancy>, sqlx::Error> {
        let query = format!(
            "UPDATE vacancies SET number = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vacancy>(&query)
            .bind(input.id)
            .bind(&input.number)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a vacancy by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Occupancy ────────────────────────────────────────────────────

    /// Flip `busy` from `expected` to `busy` in a single statement.
    ///
    /// Returns `None` if the vacancy does not exist or its current state is
    /// not `expected`; the caller re-reads to tell the two apart.
    pub async fn compare_and_set_busy(
        pool: &PgPool,
        id: DbId,
        expected: bool,
        busy: bool,
    ) -> Result<Option<Vacancy>, sqlx::Error> {
        let query = format!(
            "UPDATE vacancies SET busy = $3, updated_at = NOW()
             WHERE id = $1 AND busy = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .bind(expected)
            .bind(busy)
            .fetch_optional(pool)
            .await
    }

    /// Unconditionally set `busy`. Returns `None` if the vacancy does not exist.
    pub async fn set_busy(
        pool: &PgPool,
        id: DbId,
        busy: bool,
    ) -> Result<Option<Vacancy>, sqlx::Error> {
        let query = format!(
            "UPDATE vacancies SET busy = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .bind(busy)
            .fetch_optional(pool)
            .await
    }
}
