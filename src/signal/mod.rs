//! Signal generation module
//!
//! Moving-average trading rules and bot order sizing

mod evaluator;
mod rules;
mod sizing;
mod sma;
mod types;

pub use evaluator::RuleEvaluator;
pub use rules::TradingRule;
pub use sizing::{max_affordable, QuantityPolicy};
pub use sma::{simple_moving_average, sma_series};
pub use types::{Action, BotView, TradeSignal};
