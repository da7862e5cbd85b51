//! DCA controller: keeps exactly one DCA executor alive per trading pair

use crate::config::{DcaControllerConfig, MarketRegistry};
use crate::controller::{Controller, LadderBuilder};
use crate::executor::{active_executors, ExecutorAction, ExecutorInfo};
use crate::market::MarketDataProvider;
use crate::Result;
use anyhow::Context;
use futures::future::{self, BoxFuture, FutureExt};
use rust_decimal::Decimal;
use tracing::{debug, info, info_span, Span};

/// Controller that launches a single DCA executor whenever none is active
#[derive(Debug)]
pub struct DcaController {
    config: DcaControllerConfig,
    span: Span,
}

impl DcaController {
    /// Create new DCA controller
    pub fn new(config: DcaControllerConfig) -> Self {
        let span = info_span!(
            "dca_controller",
            controller_id = %config.id(),
            connector = %config.connector_name(),
            trading_pair = %config.trading_pair(),
        );
        Self { config, span }
    }

    /// Controller config
    pub fn config(&self) -> &DcaControllerConfig {
        &self.config
    }

    /// Reference price for a new ladder: the configured start price, else the market mid
    fn resolve_mid_price(&self, market: &dyn MarketDataProvider) -> Result<Decimal> {
        match self.config.start_price() {
            Some(start_price) => Ok(start_price),
            None => market
                .get_mid_price(self.config.connector_name(), self.config.trading_pair())
                .with_context(|| {
                    format!(
                        "Failed to fetch mid price for {} on {}",
                        self.config.trading_pair(),
                        self.config.connector_name()
                    )
                }),
        }
    }

    /// Emit one create action when no executor is active and the ladder has levels.
    ///
    /// Never emits while any executor in the snapshot is active, and returns the same
    /// actions for the same snapshot, price and clock.
    pub fn determine_executor_actions(
        &self,
        executors: &[ExecutorInfo],
        market: &dyn MarketDataProvider,
    ) -> Result<Vec<ExecutorAction>> {
        let _guard = self.span.enter();

        let active = active_executors(executors).count();
        if active > 0 {
            debug!(active, "Executor still active, skipping");
            return Ok(Vec::new());
        }

        let levels = self.config.levels();
        if levels == 0 {
            debug!("Zero levels configured, no ladder to create");
            return Ok(Vec::new());
        }

        let mid_price = self.resolve_mid_price(market)?;
        info!(%mid_price, "mid_price");

        let executor_config = LadderBuilder::build(&self.config, mid_price, market.time())
            .with_context(|| format!("Failed to build ladder for {}", self.config.trading_pair()))?;
        info!(amounts_quote = ?executor_config.amounts_quote, "amounts_quote");
        info!(prices = ?executor_config.prices, "prices_to_use");

        Ok(vec![ExecutorAction::create(self.config.id(), executor_config)])
    }
}

impl Controller for DcaController {
    fn id(&self) -> &str {
        self.config.id()
    }

    fn name(&self) -> &str {
        self.config.controller_name()
    }

    fn update_markets(&self, markets: MarketRegistry) -> MarketRegistry {
        self.config.update_markets(markets)
    }

    fn update_processed_data(&mut self) -> BoxFuture<'_, Result<()>> {
        // no derived data for a plain DCA ladder
        future::ready(Ok(())).boxed()
    }

    fn determine_executor_actions(
        &self,
        executors: &[ExecutorInfo],
        market: &dyn MarketDataProvider,
    ) -> Result<Vec<ExecutorAction>> {
        DcaController::determine_executor_actions(self, executors, market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DcaControllerConfigInput, TradeSide};
    use crate::executor::RunnableStatus;
    use crate::market::StaticMarketData;
    use chrono::{TimeZone, Utc};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn controller(levels: &str, start_price: Option<&str>) -> DcaController {
        let config = DcaControllerConfigInput {
            id: Some("dca-btc".to_string()),
            connector_name: Some("binance".to_string()),
            trading_pair: Some("BTC-USDT".to_string()),
            side: Some(TradeSide::Buy),
            leverage: Some(dec("1")),
            levels: Some(dec(levels)),
            price_deviation: Some(dec("0.01")),
            total_amount_quote: Some(dec("300")),
            start_price: start_price.map(dec),
            ..Default::default()
        }
        .validate()
        .unwrap();
        DcaController::new(config)
    }

    fn market() -> StaticMarketData {
        StaticMarketData::new()
            .with_mid_price("binance", "BTC-USDT", dec("100"))
            .with_time(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
    }

    fn executor(is_active: bool) -> ExecutorInfo {
        ExecutorInfo {
            id: "exec-1".to_string(),
            controller_id: "dca-btc".to_string(),
            executor_type: "dca_executor".to_string(),
            connector_name: "binance".to_string(),
            trading_pair: "BTC-USDT".to_string(),
            side: TradeSide::Buy,
            timestamp: Utc::now(),
            status: if is_active {
                RunnableStatus::Running
            } else {
                RunnableStatus::Terminated
            },
            is_active,
        }
    }

    #[test]
    fn test_creates_when_idle() {
        let actions = controller("3", None)
            .determine_executor_actions(&[], &market())
            .unwrap();

        assert_eq!(actions.len(), 1);
        match &actions[0] {
            ExecutorAction::Create {
                controller_id,
                executor_config,
            } => {
                assert_eq!(controller_id, "dca-btc");
                assert_eq!(executor_config.prices[0], dec("100"));
                assert_eq!(executor_config.levels(), 3);
            }
            other => panic!("Expected create action, got {:?}", other),
        }
    }

    #[test]
    fn test_skips_while_active() {
        let actions = controller("3", None)
            .determine_executor_actions(&[executor(false), executor(true)], &market())
            .unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_terminated_executors_do_not_block() {
        let actions = controller("3", None)
            .determine_executor_actions(&[executor(false)], &market())
            .unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_zero_levels_emits_nothing() {
        let actions = controller("0", None)
            .determine_executor_actions(&[], &StaticMarketData::new())
            .unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_start_price_overrides_market() {
        let actions = controller("2", Some("80"))
            .determine_executor_actions(&[], &StaticMarketData::new())
            .unwrap();

        match &actions[0] {
            ExecutorAction::Create { executor_config, .. } => {
                assert_eq!(executor_config.prices, vec![dec("80"), dec("79.2")]);
            }
            other => panic!("Expected create action, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_mid_price_propagates() {
        let err = controller("3", None)
            .determine_executor_actions(&[], &StaticMarketData::new())
            .unwrap_err();
        assert!(err.to_string().contains("BTC-USDT"));
    }

    #[test]
    fn test_ladder_overflow_propagates() {
        let config = DcaControllerConfigInput {
            id: Some("dca-big".to_string()),
            connector_name: Some("binance".to_string()),
            trading_pair: Some("BTC-USDT".to_string()),
            side: Some(TradeSide::Sell),
            leverage: Some(dec("1")),
            levels: Some(dec("2")),
            price_deviation: Some(dec("1000000000")),
            total_amount_quote: Some(dec("100")),
            ..Default::default()
        }
        .validate()
        .unwrap();
        let market = StaticMarketData::new().with_mid_price(
            "binance",
            "BTC-USDT",
            dec("100000000000000000000"),
        );

        let err = DcaController::new(config)
            .determine_executor_actions(&[], &market)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to build ladder for BTC-USDT"));
    }

    #[tokio::test]
    async fn test_update_processed_data_is_noop() {
        let mut controller = controller("3", None);
        controller.update_processed_data().await.unwrap();

        let actions = controller.determine_executor_actions(&[], &market()).unwrap();
        assert_eq!(actions.len(), 1);
    }
}
