//! Reusable field validators
//!
//! Used from `#[validate(custom(function = ...))]` attributes on request
//! payloads. Amounts and percentages are stored with two fractional digits.

use crate::core::money::AMOUNT_SCALE;
use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::ValidationError;

/// Largest accepted catalog price (10 significant digits, 2 of them fractional)
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

fn error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

fn check_scale(value: &Decimal) -> Result<(), ValidationError> {
    if value.normalize().scale() > AMOUNT_SCALE {
        return Err(error(
            "scale",
            format!("at most {} fractional digits allowed (got {})", AMOUNT_SCALE, value),
        ));
    }
    Ok(())
}

/// Validator: price must be non-negative, bounded, with at most 2 decimals
pub fn price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("range", format!("must not be negative (got {})", value)));
    }
    if *value > MAX_PRICE {
        return Err(error(
            "range",
            format!("must not exceed {} (got {})", MAX_PRICE, value),
        ));
    }
    check_scale(value)
}

/// Validator: percentage must lie in [0, 100] with at most 2 decimals
pub fn percent(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        return Err(error(
            "range",
            format!("must be between 0 and 100 (got {})", value),
        ));
    }
    check_scale(value)
}

/// Validator: string must contain something other than whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "must not be blank".to_string()));
    }
    Ok(())
}
