//! Controller module
//!
//! Provides the controller lifecycle trait, the DCA controller with its ladder builder, and
//! the registry that instantiates controllers from config documents.

pub mod base;
pub mod dca;
pub mod ladder;
pub mod registry;

pub use base::*;
pub use dca::*;
pub use ladder::*;
pub use registry::*;
