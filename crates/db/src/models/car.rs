//! Car entity model and DTOs.

use parkinglot_core::types::{DbId, Timestamp};
use parkinglot_core::validation::validate_not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `cars` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: DbId,
    pub manufacture: String,
    pub model: String,
    pub plate: String,
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a car.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCar {
    #[validate(custom(function = "validate_not_blank"))]
    pub manufacture: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub model: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub plate: String,
    pub color: Option<String>,
}

/// DTO for replacing a car record. The id travels in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCar {
    pub id: DbId,
    #[validate(custom(function = "validate_not_blank"))]
    pub manufacture: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub model: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub plate: String,
    pub color: Option<String>,
}
