//! Configuration validation errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a controller configuration is rejected at construction time.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("leverage {0} is not a positive whole multiplier")]
    InvalidLeverage(Decimal),

    #[error("levels {0} is not a valid level count")]
    InvalidLevels(Decimal),

    #[error("price_deviation {0} must not be negative")]
    NegativeDeviation(Decimal),

    #[error("price_deviation {price_deviation} over {levels} levels exceeds the decimal range")]
    DeviationOutOfRange {
        price_deviation: Decimal,
        levels: usize,
    },

    #[error("total_amount_quote {0} must be greater than zero")]
    NonPositiveAmount(Decimal),

    #[error("start_price {0} must be greater than zero")]
    NonPositiveStartPrice(Decimal),

    #[error("activation bound {0} must not be negative")]
    NegativeActivationBound(Decimal),

    #[error("malformed controller config: {0}")]
    Malformed(#[from] serde_json::Error),
}
