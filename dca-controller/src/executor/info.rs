//! Read-only executor snapshots

use crate::config::TradeSide;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Executor status as reported by the execution engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnableStatus {
    /// Created, not yet placing orders
    NotStarted,
    /// Placing or managing orders
    Running,
    /// Closing out its orders
    ShuttingDown,
    /// Finished
    Terminated,
}

/// Snapshot of one executor owned by the execution engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorInfo {
    /// Executor ID
    pub id: String,
    /// Controller that requested the executor
    pub controller_id: String,
    /// Executor kind (e.g., "dca_executor")
    pub executor_type: String,
    pub connector_name: String,
    pub trading_pair: String,
    pub side: TradeSide,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    pub status: RunnableStatus,
    /// Whether the executor still holds live orders or a position
    pub is_active: bool,
}

/// Executors in the snapshot that are still active
pub fn active_executors(executors: &[ExecutorInfo]) -> impl Iterator<Item = &ExecutorInfo> {
    executors.iter().filter(|executor| executor.is_active)
}
