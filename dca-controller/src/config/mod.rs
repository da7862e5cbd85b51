//! Configuration module

pub mod controller;
pub mod markets;
pub mod types;

pub use controller::*;
pub use markets::*;
pub use types::*;
