//! Vacancy (parking space) entity model and DTOs.

use parkinglot_core::types::{DbId, Timestamp};
use parkinglot_core::validation::validate_not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `vacancies` table.
///
/// `busy` is owned by the occupancy rules; the plain update DTO cannot set it.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    pub id: DbId,
    pub number: String,
    pub busy: bool,
    pub parking_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a vacancy. New vacancies always start free.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVacancy {
    #[validate(custom(function = "validate_not_blank"))]
    pub number: String,
    pub parking_id: DbId,
}

/// DTO for relabelling a vacancy. Parking and occupancy are preserved.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVacancy {
    pub id: DbId,
    #[validate(custom(function = "validate_not_blank"))]
    pub number: String,
}
