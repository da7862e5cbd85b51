use anyhow::Context;
use dotenv::dotenv;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;

pub struct RunnerConfig {
    pub controller_config: PathBuf,
    pub tick_interval: Duration,
    pub max_ticks: Option<u64>,
    pub paper_mid_price: Option<Decimal>,
    pub json_logs: bool,
}

impl RunnerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        let tick_secs = std::env::var("TICK_INTERVAL_SECS")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u64>()
            .context("TICK_INTERVAL_SECS must be a whole number of seconds")?;
        if tick_secs == 0 {
            anyhow::bail!("TICK_INTERVAL_SECS must be at least 1");
        }

        Ok(RunnerConfig {
            controller_config: std::env::var("CONTROLLER_CONFIG")
                .context("CONTROLLER_CONFIG must point to a controller JSON file")?
                .into(),
            tick_interval: Duration::from_secs(tick_secs),
            max_ticks: std::env::var("MAX_TICKS")
                .ok()
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("MAX_TICKS must be a whole number")?,
            paper_mid_price: std::env::var("PAPER_MID_PRICE")
                .ok()
                .map(|v| v.parse::<Decimal>())
                .transpose()
                .context("PAPER_MID_PRICE must be a decimal")?,
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    /// Read the controller config document
    pub fn load_controller_config(&self) -> Result<serde_json::Value, anyhow::Error> {
        let raw = std::fs::read_to_string(&self.controller_config).with_context(|| {
            format!("Failed to read {}", self.controller_config.display())
        })?;
        serde_json::from_str(&raw)
            .with_context(|| format!("{} is not valid JSON", self.controller_config.display()))
    }
}
