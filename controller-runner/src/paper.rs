//! Paper execution engine: records executors instead of placing orders

use chrono::{DateTime, Duration, Utc};
use dca_controller::executor::{
    DcaExecutorConfig, ExecutorAction, ExecutorInfo, RunnableStatus, DCA_EXECUTOR_TYPE,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct PaperExecutionEngine {
    executors: Vec<ExecutorInfo>,
    /// Executor id -> ladder it was created with
    configs: HashMap<String, DcaExecutorConfig>,
}

impl PaperExecutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the executors owned by a controller.
    ///
    /// Terminated executors appear in exactly one snapshot and are then dropped together
    /// with their ladder, so the engine only holds live state between ticks.
    pub fn take_snapshot(&mut self, controller_id: &str) -> Vec<ExecutorInfo> {
        let snapshot: Vec<ExecutorInfo> = self
            .executors
            .iter()
            .filter(|e| e.controller_id == controller_id)
            .cloned()
            .collect();

        let configs = &mut self.configs;
        self.executors.retain(|e| {
            let finished = e.controller_id == controller_id && !e.is_active;
            if finished {
                configs.remove(&e.id);
                debug!(executor_id = %e.id, "Pruned terminated paper executor");
            }
            !finished
        });

        snapshot
    }

    /// Executors currently held, live or awaiting their last snapshot
    pub fn tracked_count(&self) -> usize {
        self.executors.len()
    }

    pub fn active_count(&self) -> usize {
        self.executors.iter().filter(|e| e.is_active).count()
    }

    /// Apply controller actions
    pub fn apply(&mut self, actions: Vec<ExecutorAction>) {
        for action in actions {
            match action {
                ExecutorAction::Create {
                    controller_id,
                    executor_config,
                } => {
                    let id = Uuid::new_v4().to_string();
                    info!(
                        executor_id = %id,
                        %controller_id,
                        levels = executor_config.levels(),
                        total_amount_quote = %executor_config.total_amount_quote(),
                        "Paper executor created"
                    );
                    self.executors.push(ExecutorInfo {
                        id: id.clone(),
                        controller_id,
                        executor_type: DCA_EXECUTOR_TYPE.to_string(),
                        connector_name: executor_config.connector_name.clone(),
                        trading_pair: executor_config.trading_pair.clone(),
                        side: executor_config.side,
                        timestamp: executor_config.timestamp,
                        status: RunnableStatus::Running,
                        is_active: true,
                    });
                    self.configs.insert(id, executor_config);
                }
                ExecutorAction::Stop {
                    controller_id,
                    executor_id,
                    keep_position,
                } => match self.executors.iter_mut().find(|e| e.id == executor_id) {
                    Some(executor) => {
                        executor.status = RunnableStatus::Terminated;
                        executor.is_active = false;
                        info!(%executor_id, %controller_id, keep_position, "Paper executor stopped");
                    }
                    None => warn!(%executor_id, %controller_id, "Stop requested for unknown executor"),
                },
            }
        }
    }

    /// Terminate executors whose time limit has elapsed
    pub fn expire(&mut self, now: DateTime<Utc>) {
        for executor in self.executors.iter_mut().filter(|e| e.is_active) {
            let time_limit = self
                .configs
                .get(&executor.id)
                .and_then(|config| config.time_limit)
                .and_then(|secs| i64::try_from(secs).ok())
                .and_then(Duration::try_seconds);
            if let Some(limit) = time_limit {
                if now - executor.timestamp >= limit {
                    executor.status = RunnableStatus::Terminated;
                    executor.is_active = false;
                    info!(executor_id = %executor.id, "Paper executor reached its time limit");
                }
            }
        }
    }

    /// Stop actions for every active executor of a controller
    pub fn stop_all(&self, controller_id: &str) -> Vec<ExecutorAction> {
        self.executors
            .iter()
            .filter(|e| e.controller_id == controller_id && e.is_active)
            .map(|e| ExecutorAction::Stop {
                controller_id: controller_id.to_string(),
                executor_id: e.id.clone(),
                keep_position: true,
            })
            .collect()
    }
}
