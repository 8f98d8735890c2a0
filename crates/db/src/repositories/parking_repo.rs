//! Repository for the `parkings` table.

use parkinglot_core::types::DbId;
use sqlx::PgPool;

use crate::models::parking::{CreateParking, Parking, UpdateParking};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, price_per_hour, created_at, updated_at";

/// Provides CRUD operations for parking lots.
pub struct ParkingRepo;

impl ParkingRepo {
    /// Insert a new parking lot, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateParking) -> Result<Parking, sqlx::Error> {
        let query = format!(
            "INSERT INTO parkings (name, price_per_hour)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Parking>(&query)
            .bind(&input.name)
            .bind(input.price_per_hour)
            .fetch_one(pool)
            .await
    }

    /// Find a parking lot by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Parking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parkings WHERE id = $1");
        sqlx::query_as::<_, Parking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all parking lots ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Parking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parkings ORDER BY id");
        sqlx::query_as::<_, Parking>(&query).fetch_all(pool).await
    }

    /// Replace the name and hourly price of a parking lot.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateParking,
    ) -> Result<Option<Parking>, sqlx::Error> {
        let query = format!(
            "UPDATE parkings SET
                name = $2,
                price_per_hour = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Parking>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(input.price_per_hour)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a parking lot by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parkings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
