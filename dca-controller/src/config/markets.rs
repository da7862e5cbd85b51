//! Market registration set shared between controllers

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Connector name -> trading pairs the surrounding framework must subscribe to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRegistry {
    markets: BTreeMap<String, BTreeSet<String>>,
}

impl MarketRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a (connector, trading pair) into the registry. Adding a known pair is a no-op.
    pub fn add_or_update(mut self, connector_name: &str, trading_pair: &str) -> Self {
        self.markets
            .entry(connector_name.to_string())
            .or_default()
            .insert(trading_pair.to_string());
        self
    }

    /// Check if a market is registered
    pub fn contains(&self, connector_name: &str, trading_pair: &str) -> bool {
        self.markets
            .get(connector_name)
            .map(|pairs| pairs.contains(trading_pair))
            .unwrap_or(false)
    }

    /// Trading pairs registered for a connector
    pub fn pairs(&self, connector_name: &str) -> Vec<&str> {
        self.markets
            .get(connector_name)
            .map(|pairs| pairs.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Registered connector names
    pub fn connectors(&self) -> Vec<&str> {
        self.markets.keys().map(String::as_str).collect()
    }

    /// Total number of registered markets
    pub fn len(&self) -> usize {
        self.markets.values().map(|pairs| pairs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}
