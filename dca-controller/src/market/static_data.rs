//! In-memory market data

use crate::market::MarketDataProvider;
use crate::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Fixed mid prices keyed by connector and trading pair, with an optional frozen clock
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    mid_prices: HashMap<String, Decimal>,
    /// `None` follows the wall clock
    now: Option<DateTime<Utc>>,
}

impl StaticMarketData {
    /// Create empty market data following the wall clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Get storage key from connector and trading pair
    fn key(connector_name: &str, trading_pair: &str) -> String {
        format!("{}:{}", connector_name, trading_pair)
    }

    /// Builder-style mid price
    pub fn with_mid_price(mut self, connector_name: &str, trading_pair: &str, price: Decimal) -> Self {
        self.set_mid_price(connector_name, trading_pair, price);
        self
    }

    /// Builder-style frozen clock
    pub fn with_time(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Set or replace a mid price
    pub fn set_mid_price(&mut self, connector_name: &str, trading_pair: &str, price: Decimal) {
        self.mid_prices
            .insert(Self::key(connector_name, trading_pair), price);
    }

    /// Freeze the clock at a given time
    pub fn set_time(&mut self, now: DateTime<Utc>) {
        self.now = Some(now);
    }
}

impl MarketDataProvider for StaticMarketData {
    fn get_mid_price(&self, connector_name: &str, trading_pair: &str) -> Result<Decimal> {
        self.mid_prices
            .get(&Self::key(connector_name, trading_pair))
            .copied()
            .ok_or_else(|| {
                anyhow::anyhow!("No mid price for {} on {}", trading_pair, connector_name)
            })
    }

    fn time(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}
