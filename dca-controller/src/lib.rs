//! DCA-Controller: decision core for laddered dollar-cost-averaging executors
//!
//! Given the executors currently running for one trading pair, a controller decides whether
//! a new multi-level DCA executor should be launched and computes its price and quote-amount
//! ladder. Placing orders, tracking fills and managing the account belong to the execution
//! engine that consumes the emitted [`ExecutorAction`](executor::ExecutorAction)s.
//!
//! # Features
//!
//! - **Configuration**: validated, immutable controller parameters built from JSON
//! - **Decision Engine**: at most one live executor per controller
//! - **Ladder Builder**: per-level prices and quote amounts around a mid price
//! - **Registry**: controller factories keyed by controller name
//!
//! # Example
//!
//! ```no_run
//! use dca_controller::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = DcaControllerConfig::from_json_str(r#"{
//!         "connector_name": "binance",
//!         "trading_pair": "BTC-USDT",
//!         "leverage": "1",
//!         "levels": "3",
//!         "price_deviation": "0.01",
//!         "total_amount_quote": "300"
//!     }"#)?;
//!     let controller = DcaController::new(config);
//!     let market = StaticMarketData::new().with_mid_price("binance", "BTC-USDT", "100".parse()?);
//!     let actions = controller.determine_executor_actions(&[], &market)?;
//!     assert_eq!(actions.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod executor;
pub mod market;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{
        DcaControllerConfig, DcaControllerConfigInput, DcaMode, MarketRegistry, PositionMode,
        TradeSide, ValidationWarning, DCA_CONTROLLER_NAME,
    };
    pub use crate::controller::{Controller, ControllerRegistry, DcaController, LadderBuilder};
    pub use crate::error::ValidationError;
    pub use crate::executor::{
        DcaExecutorConfig, ExecutorAction, ExecutorInfo, RunnableStatus, DCA_EXECUTOR_TYPE,
    };
    pub use crate::market::{MarketDataProvider, StaticMarketData};

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
