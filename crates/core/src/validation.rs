//! Custom field validators used by the input DTOs' `#[derive(Validate)]`.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Largest hourly price a `NUMERIC(12,2)` column holds.
pub const MAX_PRICE_PER_HOUR: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Hourly prices must be strictly positive and fit the price column.
pub fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if !price.is_sign_positive() || price.is_zero() {
        return Err(ValidationError::new("positive_price")
            .with_message("price per hour must be greater than zero".into()));
    }
    if *price > MAX_PRICE_PER_HOUR {
        return Err(ValidationError::new("max_price")
            .with_message("price per hour must not exceed 9999999999.99".into()));
    }
    Ok(())
}

/// Required text fields may not be empty or whitespace only.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("not_blank").with_message("field is required".into()))
    } else {
        Ok(())
    }
}
