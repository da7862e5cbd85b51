//! One controller tick against the paper engine

use crate::paper::PaperExecutionEngine;
use anyhow::Result;
use dca_controller::controller::Controller;
use dca_controller::market::MarketDataProvider;
use std::future::Future;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Decision completed and this many actions reached the engine
    Applied(usize),
    /// `cancel` resolved first; nothing reached the engine
    Cancelled,
}

/// Expire, snapshot, run the hook and the decision, then apply.
///
/// If `cancel` resolves before the decision finishes the tick is discarded and the engine
/// is left exactly as the snapshot saw it.
pub async fn run_tick<F>(
    controller: &mut dyn Controller,
    market: &dyn MarketDataProvider,
    engine: &mut PaperExecutionEngine,
    cancel: F,
) -> Result<TickOutcome>
where
    F: Future,
{
    engine.expire(market.time());
    let snapshot = engine.take_snapshot(controller.id());

    let decision = async {
        controller.update_processed_data().await?;
        controller.determine_executor_actions(&snapshot, market)
    };

    let actions = tokio::select! {
        biased;
        _ = cancel => {
            info!("Tick cancelled, discarding its actions");
            return Ok(TickOutcome::Cancelled);
        }
        actions = decision => actions?,
    };

    let applied = actions.len();
    engine.apply(actions);
    Ok(TickOutcome::Applied(applied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dca_controller::controller::ControllerRegistry;
    use dca_controller::market::StaticMarketData;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn controller() -> Box<dyn Controller> {
        ControllerRegistry::new()
            .create_controller(json!({
                "id": "dca-1",
                "controller_name": "dca_controller",
                "connector_name": "binance",
                "trading_pair": "BTC-USDT",
                "leverage": "1",
                "levels": "3",
                "price_deviation": "0.01",
                "total_amount_quote": "300"
            }))
            .unwrap()
    }

    fn market() -> StaticMarketData {
        StaticMarketData::new().with_mid_price("binance", "BTC-USDT", Decimal::from(100))
    }

    #[tokio::test]
    async fn test_tick_applies_actions() {
        let mut controller = controller();
        let mut engine = PaperExecutionEngine::new();

        let outcome = run_tick(
            &mut *controller,
            &market(),
            &mut engine,
            std::future::pending::<()>(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, TickOutcome::Applied(1));
        assert_eq!(engine.active_count(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_tick_emits_nothing() {
        let mut controller = controller();
        let mut engine = PaperExecutionEngine::new();

        let outcome = run_tick(&mut *controller, &market(), &mut engine, std::future::ready(()))
            .await
            .unwrap();

        assert_eq!(outcome, TickOutcome::Cancelled);
        assert_eq!(engine.active_count(), 0);
        assert_eq!(engine.tracked_count(), 0);
    }

    #[tokio::test]
    async fn test_second_tick_skips_while_active() {
        let mut controller = controller();
        let mut engine = PaperExecutionEngine::new();
        let market = market();

        for expected in [1, 0] {
            let outcome = run_tick(
                &mut *controller,
                &market,
                &mut engine,
                std::future::pending::<()>(),
            )
            .await
            .unwrap();
            assert_eq!(outcome, TickOutcome::Applied(expected));
        }
        assert_eq!(engine.active_count(), 1);
    }

    #[tokio::test]
    async fn test_decision_error_applies_nothing() {
        let mut controller = controller();
        let mut engine = PaperExecutionEngine::new();

        let err = run_tick(
            &mut *controller,
            &StaticMarketData::new(),
            &mut engine,
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();

        assert!(format!("{:#}", err).contains("BTC-USDT"));
        assert_eq!(engine.tracked_count(), 0);
    }
}
