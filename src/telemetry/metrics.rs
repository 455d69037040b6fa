//! Account and price gauges
//!
//! Published through the `metrics` facade; without an installed recorder the
//! calls are no-ops.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Gauge metric types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeMetric {
    /// Manual trader net worth
    ManualNetWorth,
    /// Bot net worth
    BotNetWorth,
    /// Buy-and-hold baseline net worth
    BaselineNetWorth,
    /// Last quoted price
    LastPrice,
    /// Current tick index
    Tick,
}

impl GaugeMetric {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ManualNetWorth => "stocksim_manual_net_worth_usd",
            Self::BotNetWorth => "stocksim_bot_net_worth_usd",
            Self::BaselineNetWorth => "stocksim_baseline_net_worth_usd",
            Self::LastPrice => "stocksim_last_price_usd",
            Self::Tick => "stocksim_tick",
        }
    }
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    ::metrics::gauge!(metric.name()).set(value);
    tracing::trace!(metric = metric.name(), value, "Setting gauge");
}

/// Set a gauge from a decimal amount
pub fn set_decimal_gauge(metric: GaugeMetric, value: Decimal) {
    if let Some(value) = value.to_f64() {
        set_gauge(metric, value);
    }
}
