use anyhow::Result;
use dca_controller::config::MarketRegistry;
use dca_controller::controller::ControllerRegistry;
use dca_controller::market::StaticMarketData;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod paper;
mod tick;

use config::RunnerConfig;
use paper::PaperExecutionEngine;
use tick::{run_tick, TickOutcome};

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = RunnerConfig::from_env()?;
    init_tracing(config.json_logs);

    tracing::info!("Starting controller runner...");

    let registry = ControllerRegistry::new();
    let mut controller = registry.create_controller(config.load_controller_config()?)?;
    info!(controller_id = %controller.id(), name = %controller.name(), "Controller created");

    let markets = controller.update_markets(MarketRegistry::new());
    let mut market = StaticMarketData::new();
    match config.paper_mid_price {
        Some(mid_price) => {
            for connector in markets.connectors() {
                for pair in markets.pairs(connector) {
                    market.set_mid_price(connector, pair, mid_price);
                    info!(%connector, %pair, %mid_price, "Paper market registered");
                }
            }
        }
        None => warn!("PAPER_MID_PRICE not set, ticks rely on the controller's start_price"),
    }

    let mut engine = PaperExecutionEngine::new();
    let mut interval = tokio::time::interval(config.tick_interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut ticks: u64 = 0;
    loop {
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "Tick limit reached");
            break;
        }

        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
            _ = interval.tick() => {}
        }
        ticks += 1;

        // a cancelled tick emits nothing
        match run_tick(&mut *controller, &market, &mut engine, &mut shutdown).await {
            Ok(TickOutcome::Applied(actions)) => {
                info!(tick = ticks, actions, "Tick complete");
            }
            Ok(TickOutcome::Cancelled) => {
                info!(tick = ticks, "Shutdown requested, discarding tick");
                break;
            }
            Err(e) => error!(tick = ticks, "Tick failed: {:#}", e),
        }
    }

    let stops = engine.stop_all(controller.id());
    engine.apply(stops);
    info!(active = engine.active_count(), "Controller runner stopped");

    Ok(())
}
