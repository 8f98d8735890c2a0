//! Repository for the `cars` table.

use parkinglot_core::types::DbId;
use sqlx::PgPool;

use crate::models::car::{Car, CreateCar, UpdateCar};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, manufacture, model, plate, color, created_at, updated_at";

/// Provides CRUD operations for cars.
pub struct CarRepo;

impl CarRepo {
    /// Insert a new car, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCar) -> Result<Car, sqlx::Error> {
        let query = format!(
            "INSERT INTO cars (manufacture, model, plate, color)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(&input.manufacture)
            .bind(&input.model)
            .bind(&input.plate)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a car by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE id = $1");
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a car by its licence plate.
    pub async fn find_by_plate(pool: &PgPool, plate: &str) -> Result<Option<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE plate = $1");
        sqlx::query_as::<_, Car>(&query)
            .bind(plate)
            .fetch_optional(pool)
            .await
    }

    /// List all cars ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars ORDER BY id");
        sqlx::query_as::<_, Car>(&query).fetch_all(pool).await
    }

    /// Replace every mutable field of a car.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, input: &UpdateCar) -> Result<Option<Car>, sqlx::Error> {
        let query = format!(
            "UPDATE cars SET
                manufacture = $2,
                model = $3,
                plate = $4,
                color = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(input.id)
            .bind(&input.manufacture)
            .bind(&input.model)
            .bind(&input.plate)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a car by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
