//! Parking lot entity model and DTOs.

use parkinglot_core::types::{DbId, Timestamp};
use parkinglot_core::validation::{validate_not_blank, validate_positive_price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `parkings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parking {
    pub id: DbId,
    pub name: String,
    pub price_per_hour: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a parking lot.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateParking {
    #[serde(alias = "parkingName")]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_positive_price"))]
    pub price_per_hour: Decimal,
}

/// DTO for replacing a parking lot record. The id travels in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParking {
    pub id: DbId,
    #[serde(alias = "parkingName")]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_positive_price"))]
    pub price_per_hour: Decimal,
}
