//! Market data provider trait

use crate::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Price and clock source consumed by controllers
pub trait MarketDataProvider: Send + Sync {
    /// Mid price for a trading pair on a connector
    fn get_mid_price(&self, connector_name: &str, trading_pair: &str) -> Result<Decimal>;

    /// Current framework time
    fn time(&self) -> DateTime<Utc>;
}
