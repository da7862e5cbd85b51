//! DCA controller configuration

use crate::config::{DcaMode, MarketRegistry, PositionMode, TradeSide};
use crate::error::ValidationError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

pub const DCA_CONTROLLER_NAME: &str = "dca_controller";
pub const GENERIC_CONTROLLER_TYPE: &str = "generic";

/// Raw controller config as read from a JSON document.
///
/// Every field is optional so that a missing required field is reported as a
/// [`ValidationError::MissingField`] instead of a generic parse failure. Unknown fields
/// (for example candle feed settings meant for other controllers) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DcaControllerConfigInput {
    pub id: Option<String>,
    pub controller_name: Option<String>,
    pub controller_type: Option<String>,
    pub connector_name: Option<String>,
    pub trading_pair: Option<String>,
    pub side: Option<TradeSide>,
    pub position_mode: Option<PositionMode>,
    pub leverage: Option<Decimal>,
    pub levels: Option<Decimal>,
    pub price_deviation: Option<Decimal>,
    #[serde(alias = "total_amount")]
    pub total_amount_quote: Option<Decimal>,
    pub take_profit: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    pub start_price: Option<Decimal>,
    /// Seconds
    pub time_limit: Option<u64>,
    pub mode: Option<DcaMode>,
    pub activation_bounds: Option<Vec<Decimal>>,
}

/// Non-fatal findings produced while validating a config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Level count had a fractional part and was truncated toward zero
    FractionalLevels { given: Decimal, used: usize },
    /// Leverage had a fractional part; executors receive the truncated multiplier, at least 1
    FractionalLeverage { given: Decimal, used: u32 },
    /// Deepest buy level would be priced at or below zero
    LadderCrossesZero { deepest_offset: Decimal },
}

/// Validated, immutable DCA controller config
#[derive(Debug, Clone, Serialize)]
pub struct DcaControllerConfig {
    id: String,
    controller_name: String,
    controller_type: String,
    connector_name: String,
    trading_pair: String,
    side: TradeSide,
    position_mode: PositionMode,
    leverage: Decimal,
    levels: usize,
    price_deviation: Decimal,
    total_amount_quote: Decimal,
    take_profit: Option<Decimal>,
    stop_loss: Option<Decimal>,
    start_price: Option<Decimal>,
    time_limit: Option<u64>,
    mode: DcaMode,
    activation_bounds: Option<Vec<Decimal>>,
    #[serde(skip)]
    warnings: Vec<ValidationWarning>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

fn non_empty(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    let value = required(value, field)?;
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value)
}

impl DcaControllerConfigInput {
    /// Validate into an immutable config
    pub fn validate(self) -> Result<DcaControllerConfig, ValidationError> {
        let mut warnings = Vec::new();

        let id = match self.id {
            Some(id) if id.trim().is_empty() => return Err(ValidationError::EmptyField("id")),
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };
        let connector_name = non_empty(self.connector_name, "connector_name")?;
        let trading_pair = non_empty(self.trading_pair, "trading_pair")?;

        let leverage = required(self.leverage, "leverage")?;
        if leverage <= Decimal::ZERO {
            return Err(ValidationError::InvalidLeverage(leverage));
        }
        // executors take a whole multiplier of at least 1
        let whole_leverage = leverage
            .trunc()
            .to_u32()
            .ok_or(ValidationError::InvalidLeverage(leverage))?
            .max(1);
        if leverage.fract() != Decimal::ZERO {
            warnings.push(ValidationWarning::FractionalLeverage {
                given: leverage,
                used: whole_leverage,
            });
        }

        let levels_given = required(self.levels, "levels")?;
        if levels_given.is_sign_negative() && !levels_given.is_zero() {
            return Err(ValidationError::InvalidLevels(levels_given));
        }
        let levels = levels_given
            .trunc()
            .to_usize()
            .ok_or(ValidationError::InvalidLevels(levels_given))?;
        if levels_given.fract() != Decimal::ZERO {
            warnings.push(ValidationWarning::FractionalLevels {
                given: levels_given,
                used: levels,
            });
        }

        let price_deviation = required(self.price_deviation, "price_deviation")?;
        if price_deviation.is_sign_negative() && !price_deviation.is_zero() {
            return Err(ValidationError::NegativeDeviation(price_deviation));
        }

        let total_amount_quote = required(self.total_amount_quote, "total_amount_quote")?;
        if total_amount_quote <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(total_amount_quote));
        }

        if let Some(start_price) = self.start_price {
            if start_price <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveStartPrice(start_price));
            }
        }

        if let Some(bounds) = &self.activation_bounds {
            if let Some(bound) = bounds.iter().find(|b| **b < Decimal::ZERO) {
                return Err(ValidationError::NegativeActivationBound(*bound));
            }
        }

        let side = self.side.unwrap_or_default();
        if levels > 1 {
            // the deepest level factor must be representable for either side
            let deepest_offset = price_deviation
                .checked_mul(Decimal::from(levels - 1))
                .filter(|offset| Decimal::ONE.checked_add(*offset).is_some())
                .ok_or(ValidationError::DeviationOutOfRange {
                    price_deviation,
                    levels,
                })?;
            if side == TradeSide::Buy && deepest_offset >= Decimal::ONE {
                warnings.push(ValidationWarning::LadderCrossesZero { deepest_offset });
            }
        }

        for warning in &warnings {
            warn!(controller_id = %id, trading_pair = %trading_pair, ?warning, "controller config warning");
        }

        Ok(DcaControllerConfig {
            id,
            controller_name: self
                .controller_name
                .unwrap_or_else(|| DCA_CONTROLLER_NAME.to_string()),
            controller_type: self
                .controller_type
                .unwrap_or_else(|| GENERIC_CONTROLLER_TYPE.to_string()),
            connector_name,
            trading_pair,
            side,
            position_mode: self.position_mode.unwrap_or_default(),
            leverage,
            levels,
            price_deviation,
            total_amount_quote,
            take_profit: self.take_profit,
            stop_loss: self.stop_loss,
            start_price: self.start_price,
            time_limit: self.time_limit,
            mode: self.mode.unwrap_or_default(),
            activation_bounds: self.activation_bounds,
            warnings,
        })
    }
}

impl DcaControllerConfig {
    /// Parse and validate a JSON controller config
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str::<DcaControllerConfigInput>(json)?.validate()
    }

    /// Validate an already parsed JSON document
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value::<DcaControllerConfigInput>(value)?.validate()
    }

    /// Register this controller's market with the framework
    pub fn update_markets(&self, markets: MarketRegistry) -> MarketRegistry {
        markets.add_or_update(&self.connector_name, &self.trading_pair)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    pub fn controller_type(&self) -> &str {
        &self.controller_type
    }

    pub fn connector_name(&self) -> &str {
        &self.connector_name
    }

    pub fn trading_pair(&self) -> &str {
        &self.trading_pair
    }

    pub fn side(&self) -> TradeSide {
        self.side
    }

    pub fn position_mode(&self) -> PositionMode {
        self.position_mode
    }

    pub fn leverage(&self) -> Decimal {
        self.leverage
    }

    /// Whole leverage multiplier handed to executors
    pub fn executor_leverage(&self) -> u32 {
        // validated to fit in u32
        self.leverage.trunc().to_u32().unwrap_or(1).max(1)
    }

    /// Level count after truncation
    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn price_deviation(&self) -> Decimal {
        self.price_deviation
    }

    pub fn total_amount_quote(&self) -> Decimal {
        self.total_amount_quote
    }

    pub fn take_profit(&self) -> Option<Decimal> {
        self.take_profit
    }

    pub fn stop_loss(&self) -> Option<Decimal> {
        self.stop_loss
    }

    pub fn start_price(&self) -> Option<Decimal> {
        self.start_price
    }

    pub fn time_limit(&self) -> Option<u64> {
        self.time_limit
    }

    pub fn mode(&self) -> DcaMode {
        self.mode
    }

    pub fn activation_bounds(&self) -> Option<&[Decimal]> {
        self.activation_bounds.as_deref()
    }

    /// Warnings collected during validation
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }
}
