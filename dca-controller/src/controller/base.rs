//! Base controller trait

use crate::config::MarketRegistry;
use crate::executor::{ExecutorAction, ExecutorInfo};
use crate::market::MarketDataProvider;
use crate::Result;
use futures::future::BoxFuture;

/// Base trait for all controllers.
///
/// The scheduler drives a controller once per tick: it awaits
/// [`update_processed_data`](Controller::update_processed_data), then calls
/// [`determine_executor_actions`](Controller::determine_executor_actions) with a fresh
/// snapshot of the controller's executors. Ticks of one controller never overlap.
pub trait Controller: Send {
    /// Controller ID, used to tag emitted actions
    fn id(&self) -> &str;

    /// Controller name (e.g., "dca_controller")
    fn name(&self) -> &str;

    /// Merge the markets this controller trades into the shared registry
    fn update_markets(&self, markets: MarketRegistry) -> MarketRegistry;

    /// Prepare derived data before the decision of a tick
    fn update_processed_data(&mut self) -> BoxFuture<'_, Result<()>>;

    /// Decide what the execution engine should do with this snapshot
    fn determine_executor_actions(
        &self,
        executors: &[ExecutorInfo],
        market: &dyn MarketDataProvider,
    ) -> Result<Vec<ExecutorAction>>;
}
