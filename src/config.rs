//! Configuration types for stock-sim

use crate::price::GbmParams;
use crate::signal::{QuantityPolicy, TradingRule};
use crate::telemetry::LogFormat;
use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Largest accepted per-tick drift magnitude
pub const MAX_DRIFT: f64 = 0.1;
/// Largest accepted per-tick volatility
pub const MAX_VOLATILITY: f64 = 0.5;

/// Invalid configuration value
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid config value for {field}: {reason}")]
pub struct ConfigError {
    pub field: &'static str,
    pub reason: String,
}

impl ConfigError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub synthetic: SyntheticConfig,
    #[serde(default)]
    pub historical: HistoricalConfig,
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Synthetic price generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// Price at tick 0
    #[serde(default = "default_initial_price")]
    pub initial_price: f64,

    /// Per-tick drift of log-returns
    #[serde(default = "default_drift")]
    pub drift: f64,

    /// Per-tick volatility of log-returns
    #[serde(default = "default_volatility")]
    pub volatility: f64,

    /// RNG seed, entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Stop after this many points, unbounded when unset
    #[serde(default)]
    pub max_points: Option<usize>,

    /// Chance of a volatility shock per tick
    #[serde(default = "default_shock_probability")]
    pub shock_probability: f64,

    /// How long a shock distorts the quote (milliseconds)
    #[serde(default = "default_shock_duration_ms")]
    pub shock_duration_ms: u64,
}

fn default_initial_price() -> f64 {
    100.0
}
fn default_drift() -> f64 {
    0.0002
}
fn default_volatility() -> f64 {
    0.01
}
fn default_shock_probability() -> f64 {
    0.05
}
fn default_shock_duration_ms() -> u64 {
    1000
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            initial_price: default_initial_price(),
            drift: default_drift(),
            volatility: default_volatility(),
            seed: None,
            max_points: None,
            shock_probability: default_shock_probability(),
            shock_duration_ms: default_shock_duration_ms(),
        }
    }
}

impl SyntheticConfig {
    pub fn params(&self) -> GbmParams {
        GbmParams::new(self.drift, self.volatility)
    }

    pub fn shock_duration(&self) -> Duration {
        Duration::from_millis(self.shock_duration_ms)
    }
}

/// Historical CSV replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalConfig {
    /// Directory holding `<TICKER>_full.csv` files and `tickers.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Header of the closing-price column
    #[serde(default = "default_close_column")]
    pub close_column: String,

    /// Maximum number of rows replayed
    #[serde(default = "default_max_points")]
    pub max_points: usize,

    /// Ticker used when none is given on the command line
    #[serde(default = "default_ticker")]
    pub default_ticker: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_close_column() -> String {
    "Close".to_string()
}
fn default_max_points() -> usize {
    500
}
fn default_ticker() -> String {
    "SPY".to_string()
}

impl Default for HistoricalConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            close_column: default_close_column(),
            max_points: default_max_points(),
            default_ticker: default_ticker(),
        }
    }
}

/// Starting balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Cash given to the manual trader, the bot and the baseline
    #[serde(default = "default_initial_cash")]
    pub initial_cash: Decimal,
}

fn default_initial_cash() -> Decimal {
    dec!(10000)
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            initial_cash: default_initial_cash(),
        }
    }
}

/// Rule-based bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Trade automatically every tick
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub rule: TradingRule,

    #[serde(default)]
    pub quantity: QuantityPolicy,
}

fn default_true() -> bool {
    true
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rule: TradingRule::default(),
            quantity: QuantityPolicy::default(),
        }
    }
}

/// Tick timing and display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Ticks per second
    #[serde(default = "default_speed")]
    pub speed: u32,

    /// Notice lifetime (milliseconds)
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,

    /// Trades shown in recent-trade views
    #[serde(default = "default_recent_trades")]
    pub recent_trades: usize,
}

fn default_speed() -> u32 {
    1
}
fn default_notice_ttl_ms() -> u64 {
    3000
}
fn default_recent_trades() -> usize {
    10
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            notice_ttl_ms: default_notice_ttl_ms(),
            recent_trades: default_recent_trades(),
        }
    }
}

impl PlaybackConfig {
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}

/// Simulated trading calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Date of tick 0
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Default filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Publish account gauges through the `metrics` facade
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let synthetic = &self.synthetic;
        if !(synthetic.initial_price.is_finite() && synthetic.initial_price > 0.0) {
            return Err(ConfigError::new("synthetic.initial_price", "must be positive"));
        }
        validate_params(synthetic.drift, synthetic.volatility)?;
        if !(0.0..=1.0).contains(&synthetic.shock_probability) {
            return Err(ConfigError::new(
                "synthetic.shock_probability",
                "must be within [0, 1]",
            ));
        }
        if synthetic.max_points == Some(0) {
            return Err(ConfigError::new("synthetic.max_points", "must be at least 1"));
        }

        if self.historical.max_points == 0 {
            return Err(ConfigError::new("historical.max_points", "must be at least 1"));
        }
        if self.historical.close_column.trim().is_empty() {
            return Err(ConfigError::new("historical.close_column", "must not be empty"));
        }

        if self.account.initial_cash <= Decimal::ZERO {
            return Err(ConfigError::new("account.initial_cash", "must be positive"));
        }

        match self.bot.rule {
            TradingRule::Crossover {
                short_window,
                long_window,
            } => {
                if short_window == 0 {
                    return Err(ConfigError::new("bot.rule.short_window", "must be at least 1"));
                }
                if short_window >= long_window {
                    return Err(ConfigError::new(
                        "bot.rule.long_window",
                        format!("must exceed short_window ({short_window})"),
                    ));
                }
            }
            TradingRule::PriceVsSma { window } => {
                if window == 0 {
                    return Err(ConfigError::new("bot.rule.window", "must be at least 1"));
                }
            }
        }

        match self.bot.quantity {
            QuantityPolicy::Fixed { shares: 0 } => {
                return Err(ConfigError::new("bot.quantity.shares", "must be at least 1"));
            }
            QuantityPolicy::Fraction { buy, sell } => {
                let in_range = |f: Decimal| f > Decimal::ZERO && f <= Decimal::ONE;
                if !in_range(buy) {
                    return Err(ConfigError::new("bot.quantity.buy", "must be within (0, 1]"));
                }
                if !in_range(sell) {
                    return Err(ConfigError::new("bot.quantity.sell", "must be within (0, 1]"));
                }
            }
            _ => {}
        }

        if self.playback.speed == 0 {
            return Err(ConfigError::new("playback.speed", "must be at least 1"));
        }

        Ok(())
    }
}

/// Bounds shared by config loading and runtime parameter changes
pub fn validate_params(drift: f64, volatility: f64) -> Result<(), ConfigError> {
    if !(drift.is_finite() && drift.abs() <= MAX_DRIFT) {
        return Err(ConfigError::new(
            "synthetic.drift",
            format!("must be within [-{MAX_DRIFT}, {MAX_DRIFT}]"),
        ));
    }
    if !(volatility.is_finite() && (0.0..=MAX_VOLATILITY).contains(&volatility)) {
        return Err(ConfigError::new(
            "synthetic.volatility",
            format!("must be within [0, {MAX_VOLATILITY}]"),
        ));
    }
    Ok(())
}
