//! DCA ladder construction

use crate::config::{DcaControllerConfig, TradeSide};
use crate::executor::DcaExecutorConfig;
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Builds the per-level prices and quote amounts of a DCA executor
pub struct LadderBuilder;

impl LadderBuilder {
    /// Build a fresh executor config around `mid_price`.
    ///
    /// Callers must not pass a config with zero levels. Fails when a level price does not
    /// fit in a `Decimal`.
    pub fn build(
        config: &DcaControllerConfig,
        mid_price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<DcaExecutorConfig> {
        let levels = config.levels();
        let prices = Self::prices(config.side(), mid_price, config.price_deviation(), levels)
            .with_context(|| format!("Cannot build {} level ladder at {}", levels, mid_price))?;

        Ok(DcaExecutorConfig {
            timestamp,
            connector_name: config.connector_name().to_string(),
            trading_pair: config.trading_pair().to_string(),
            side: config.side(),
            leverage: config.executor_leverage(),
            amounts_quote: Self::amounts(config.total_amount_quote(), levels),
            prices,
            take_profit: config.take_profit(),
            stop_loss: config.stop_loss(),
            time_limit: config.time_limit(),
            mode: config.mode(),
            activation_bounds: config.activation_bounds().map(|bounds| bounds.to_vec()),
            level_id: None,
        })
    }

    /// Level prices stepping away from `mid_price` by `deviation` per level.
    ///
    /// Buy ladders step down, sell ladders step up. Level 0 is priced at `mid_price`.
    pub fn prices(
        side: TradeSide,
        mid_price: Decimal,
        deviation: Decimal,
        levels: usize,
    ) -> Result<Vec<Decimal>> {
        (0..levels)
            .map(|i| {
                let factor = deviation
                    .checked_mul(Decimal::from(i))
                    .and_then(|offset| match side {
                        TradeSide::Buy => Decimal::ONE.checked_sub(offset),
                        TradeSide::Sell => Decimal::ONE.checked_add(offset),
                    })
                    .ok_or_else(|| anyhow::anyhow!("Price offset overflowed at level {}", i))?;
                mid_price
                    .checked_mul(factor)
                    .ok_or_else(|| anyhow::anyhow!("Price overflowed at level {}", i))
            })
            .collect()
    }

    /// Equal split of `total` across `levels`; the last level takes the rounding remainder
    /// so the amounts always sum to `total`.
    pub fn amounts(total: Decimal, levels: usize) -> Vec<Decimal> {
        if levels == 0 {
            return Vec::new();
        }

        let share = total / Decimal::from(levels);
        let mut amounts = vec![share; levels - 1];
        let allocated: Decimal = amounts.iter().copied().sum();
        amounts.push(total - allocated);
        amounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DcaControllerConfigInput, DcaMode};
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn decs(values: &[&str]) -> Vec<Decimal> {
        values.iter().map(|s| dec(s)).collect()
    }

    fn config(side: TradeSide, levels: &str, deviation: &str, total: &str) -> DcaControllerConfig {
        DcaControllerConfigInput {
            id: Some("dca-test".to_string()),
            connector_name: Some("binance".to_string()),
            trading_pair: Some("BTC-USDT".to_string()),
            side: Some(side),
            leverage: Some(dec("3")),
            levels: Some(dec(levels)),
            price_deviation: Some(dec(deviation)),
            total_amount_quote: Some(dec(total)),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_buy_ladder_steps_down() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let executor =
            LadderBuilder::build(&config(TradeSide::Buy, "3", "0.01", "300"), dec("100"), ts)
                .unwrap();

        assert_eq!(executor.prices, decs(&["100", "99", "98"]));
        assert_eq!(executor.amounts_quote, decs(&["100", "100", "100"]));
        assert_eq!(executor.timestamp, ts);
        assert_eq!(executor.leverage, 3);
        assert_eq!(executor.mode, DcaMode::Maker);
        assert!(executor.level_id.is_none());
    }

    #[test]
    fn test_sell_ladder_steps_up() {
        let executor =
            LadderBuilder::build(&config(TradeSide::Sell, "2", "0.05", "100"), dec("50"), Utc::now())
                .unwrap();

        assert_eq!(executor.prices, decs(&["50", "52.5"]));
        assert_eq!(executor.amounts_quote, decs(&["50", "50"]));
    }

    #[test]
    fn test_first_level_is_mid_price() {
        let prices =
            LadderBuilder::prices(TradeSide::Buy, dec("27123.45"), dec("0.0125"), 4).unwrap();
        assert_eq!(prices[0], dec("27123.45"));
    }

    #[test]
    fn test_prices_strictly_monotonic() {
        let buys =
            LadderBuilder::prices(TradeSide::Buy, dec("1.2345"), dec("0.003"), 10).unwrap();
        assert!(buys.windows(2).all(|w| w[1] < w[0]));

        let sells =
            LadderBuilder::prices(TradeSide::Sell, dec("1.2345"), dec("0.003"), 10).unwrap();
        assert!(sells.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_zero_deviation_is_flat() {
        let prices = LadderBuilder::prices(TradeSide::Sell, dec("10"), Decimal::ZERO, 3).unwrap();
        assert_eq!(prices, decs(&["10", "10", "10"]));
    }

    #[test]
    fn test_amounts_sum_exactly_to_total() {
        for levels in 1..=12 {
            let amounts = LadderBuilder::amounts(dec("100"), levels);
            assert_eq!(amounts.len(), levels);
            assert_eq!(amounts.iter().copied().sum::<Decimal>(), dec("100"));
        }
    }

    #[test]
    fn test_uneven_split_remainder_on_last_level() {
        let amounts = LadderBuilder::amounts(dec("100"), 3);
        assert_eq!(amounts[0], amounts[1]);
        assert!((amounts[2] - amounts[0]).abs() < dec("0.000000000000000000001"));
    }

    #[test]
    fn test_no_levels_no_amounts() {
        assert!(LadderBuilder::amounts(dec("100"), 0).is_empty());
        assert!(LadderBuilder::prices(TradeSide::Buy, dec("100"), dec("0.01"), 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_oversized_ladder_is_error() {
        let config = config(TradeSide::Sell, "2", "1000000000", "100");
        let result = LadderBuilder::build(&config, dec("100000000000000000000"), Utc::now());

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("level 1"));
    }
}
