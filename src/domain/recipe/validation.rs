//! Recipe validation utilities

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecipeValidationError {
    #[error("Title cannot be blank")]
    EmptyTitle,

    #[error("Title exceeds maximum length of {0} characters")]
    TitleTooLong(usize),

    #[error("Ensure that there are no more than {0} decimal places in price")]
    PriceTooPrecise(u32),

    #[error("Ensure that there are no more than {0} digits before the decimal point in price")]
    PriceTooLarge(u32),
}

pub const MAX_TITLE_LENGTH: usize = 255;
pub const PRICE_MAX_DIGITS: u32 = 5;
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Validate and trim a recipe title
pub fn validate_title(title: &str) -> Result<String, RecipeValidationError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(RecipeValidationError::EmptyTitle);
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(RecipeValidationError::TitleTooLong(MAX_TITLE_LENGTH));
    }

    Ok(title.to_string())
}

/// Validate a price against a NUMERIC(5, 2) column
pub fn validate_price(price: Decimal) -> Result<Decimal, RecipeValidationError> {
    let normalized = price.normalize();
    let scale = normalized.scale();

    if scale > PRICE_DECIMAL_PLACES {
        return Err(RecipeValidationError::PriceTooPrecise(PRICE_DECIMAL_PLACES));
    }

    let digits = normalized.mantissa().unsigned_abs().to_string().len() as u32;
    let whole_digits = digits.saturating_sub(scale);
    let max_whole_digits = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;

    if whole_digits > max_whole_digits {
        return Err(RecipeValidationError::PriceTooLarge(max_whole_digits));
    }

    let mut rounded = normalized;
    rounded.rescale(PRICE_DECIMAL_PLACES);

    Ok(rounded)
}
