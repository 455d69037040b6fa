//! Trading rules
//!
//! A rule only reads price history and proposes a direction. Affordability and
//! sizing are applied by the evaluator.

use super::sma::simple_moving_average;
use super::Action;
use crate::price::PricePoint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Rule the bot trades on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradingRule {
    /// Buy when the short SMA is above the long SMA, sell when below
    Crossover {
        short_window: usize,
        long_window: usize,
    },
    /// Buy when price is above the SMA of the last `window` prices, sell when below
    PriceVsSma { window: usize },
}

impl Default for TradingRule {
    fn default() -> Self {
        Self::Crossover {
            short_window: 5,
            long_window: 20,
        }
    }
}

impl TradingRule {
    /// Points of history needed before the rule can act
    pub fn warmup(&self) -> usize {
        match *self {
            Self::Crossover { long_window, .. } => long_window,
            Self::PriceVsSma { window } => window + 1,
        }
    }

    /// Direction suggested by the rule, before any sizing
    ///
    /// `history` ends with the current tick's stored price; `current_price` is
    /// the quote trades would execute at.
    pub fn direction(&self, history: &[PricePoint], current_price: Decimal) -> Action {
        if history.len() < self.warmup() {
            return Action::Hold;
        }

        let ordering = match *self {
            Self::Crossover {
                short_window,
                long_window,
            } => {
                let (Some(short), Some(long)) = (
                    simple_moving_average(history, short_window),
                    simple_moving_average(history, long_window),
                ) else {
                    return Action::Hold;
                };
                short.cmp(&long)
            }
            Self::PriceVsSma { window } => {
                let Some(sma) = simple_moving_average(history, window) else {
                    return Action::Hold;
                };
                current_price.cmp(&sma)
            }
        };

        match ordering {
            Ordering::Greater => Action::Buy,
            Ordering::Less => Action::Sell,
            Ordering::Equal => Action::Hold,
        }
    }

    /// Short label for reports
    pub fn describe(&self) -> String {
        match *self {
            Self::Crossover {
                short_window,
                long_window,
            } => format!("SMA crossover ({short_window}/{long_window})"),
            Self::PriceVsSma { window } => format!("Price vs SMA ({window})"),
        }
    }
}
