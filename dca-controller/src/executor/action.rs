//! Actions emitted by controllers

use crate::executor::DcaExecutorConfig;
use serde::{Deserialize, Serialize};

/// Intent for the execution engine. Controllers never mutate executors directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ExecutorAction {
    /// Launch a new DCA executor
    Create {
        controller_id: String,
        executor_config: DcaExecutorConfig,
    },
    /// Stop a running executor
    Stop {
        controller_id: String,
        executor_id: String,
        keep_position: bool,
    },
}

impl ExecutorAction {
    /// Create action for a DCA executor
    pub fn create(controller_id: impl Into<String>, executor_config: DcaExecutorConfig) -> Self {
        Self::Create {
            controller_id: controller_id.into(),
            executor_config,
        }
    }

    /// Controller that emitted the action
    pub fn controller_id(&self) -> &str {
        match self {
            Self::Create { controller_id, .. } | Self::Stop { controller_id, .. } => controller_id,
        }
    }
}
