//! Price generation module
//!
//! Synthetic GBM prices, historical CSV replay, instrument discovery and the
//! quote-level volatility shock overlay.

mod feed;
mod gbm;
mod historical;
mod random;
mod shock;
mod tickers;
mod types;

pub use feed::PriceFeed;
pub use gbm::{GbmGenerator, GbmParams, NormalSampler, PRICE_CEILING, PRICE_FLOOR};
pub use historical::{parse_close_prices, HistoricalLoader, LoadError};
pub use random::{ScriptedUniform, SeededUniform, UniformSource};
pub use shock::{ShockKind, ShockOverlay, VolatilityShock};
pub use tickers::TickerDirectory;
pub use types::{DataMode, PricePoint, PRICE_DECIMALS};

use async_trait::async_trait;

/// Source of a fixed closing-price series for a ticker
///
/// Failures are reported as an empty series; callers treat that as "not ready".
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_closes(&self, ticker: &str) -> Vec<PricePoint>;
}
