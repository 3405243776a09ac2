// Runtime settings: built-in defaults, then an optional lobx.toml, then LOBX_* env vars.

use std::time::Duration;

use ::config::builder::{ConfigBuilder, DefaultState};
use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::market_data::adapters::{coinbase, gemini};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Quantity estimated when `--qty` is not given
    pub default_qty: f64,
    /// Label printed in the report
    pub base_asset: String,
    pub cooldown_ms: u64,
    pub fetch_timeout_ms: u64,
    /// Used when RUST_LOG is unset
    pub log_filter: String,
    pub coinbase_url: String,
    pub gemini_url: String,
    /// Prometheus listener, only with the `metrics-exporter` feature
    pub metrics_port: u16,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("lobx").required(false))
            .add_source(Environment::with_prefix("LOBX").try_parsing(true))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    // Defaults only, no file or environment
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("default_qty", 10.0)?
            .set_default("base_asset", "BTC")?
            .set_default("cooldown_ms", 2_000)?
            .set_default("fetch_timeout_ms", 10_000)?
            .set_default("log_filter", "info")?
            .set_default("coinbase_url", coinbase::DEFAULT_URL)?
            .set_default("gemini_url", gemini::DEFAULT_URL)?
            .set_default("metrics_port", 9000)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !(self.default_qty.is_finite() && self.default_qty > 0.0) {
            return Err(ConfigError::Message(format!(
                "invalid quantity {}: default_qty must be a positive, finite number",
                self.default_qty
            )));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Message("fetch_timeout_ms must be non-zero".into()));
        }
        Ok(self)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
