//! Executor-facing types
//!
//! Snapshots of running executors, the DCA executor config a controller materializes, and
//! the actions handed to the execution engine.

pub mod action;
pub mod dca;
pub mod info;

pub use action::*;
pub use dca::*;
pub use info::*;
