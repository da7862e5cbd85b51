//! Market data module
//!
//! Controllers read mid prices and the clock through [`MarketDataProvider`]; the framework
//! supplies the live implementation.

pub mod provider;
pub mod static_data;

pub use provider::*;
pub use static_data::*;
