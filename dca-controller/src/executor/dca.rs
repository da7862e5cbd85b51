//! DCA executor configuration

use crate::config::{DcaMode, TradeSide};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DCA_EXECUTOR_TYPE: &str = "dca_executor";

/// Materialized ladder handed to the execution engine.
///
/// `amounts_quote[i]` is the quote budget of the level priced at `prices[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcaExecutorConfig {
    /// Creation time
    pub timestamp: DateTime<Utc>,
    pub connector_name: String,
    pub trading_pair: String,
    pub side: TradeSide,
    pub leverage: u32,
    pub amounts_quote: Vec<Decimal>,
    pub prices: Vec<Decimal>,
    pub take_profit: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    /// Seconds
    pub time_limit: Option<u64>,
    pub mode: DcaMode,
    pub activation_bounds: Option<Vec<Decimal>>,
    /// Set by the engine for partially filled plans, `None` for fresh ones
    pub level_id: Option<String>,
}

impl DcaExecutorConfig {
    /// Number of levels in the ladder
    pub fn levels(&self) -> usize {
        self.prices.len()
    }

    /// Total quote amount across all levels
    pub fn total_amount_quote(&self) -> Decimal {
        self.amounts_quote.iter().copied().sum()
    }
}
