//! Bot order sizing
//!
//! Converts a rule's direction into a share count for the bot account.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How many shares the bot trades per signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum QuantityPolicy {
    /// Fixed share count, capped by what is affordable or held
    Fixed { shares: u64 },
    /// Fraction of cash on buys and of held shares on sells, each in (0, 1]
    Fraction { buy: Decimal, sell: Decimal },
    /// Everything affordable on buys, the whole position on sells
    Max,
}

impl Default for QuantityPolicy {
    fn default() -> Self {
        Self::Fixed { shares: 1 }
    }
}

impl QuantityPolicy {
    /// Shares to buy with `cash` at `price`
    pub fn buy_quantity(&self, cash: Decimal, price: Decimal) -> u64 {
        let affordable = max_affordable(cash, price);
        match *self {
            Self::Fixed { shares } => shares.min(affordable),
            Self::Fraction { buy, .. } => max_affordable(cash * buy, price).min(affordable),
            Self::Max => affordable,
        }
    }

    /// Shares to sell out of `held`
    pub fn sell_quantity(&self, held: u64) -> u64 {
        match *self {
            Self::Fixed { shares } => shares.min(held),
            Self::Fraction { sell, .. } => (Decimal::from(held) * sell)
                .floor()
                .to_u64()
                .unwrap_or(0)
                .min(held),
            Self::Max => held,
        }
    }
}

/// Whole shares `cash` can buy at `price`
pub fn max_affordable(cash: Decimal, price: Decimal) -> u64 {
    if price <= Decimal::ZERO || cash <= Decimal::ZERO {
        return 0;
    }
    (cash / price).floor().to_u64().unwrap_or(0)
}
