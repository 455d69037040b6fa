//! Portfolio types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Who placed a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trader {
    /// The human player
    Manual,
    /// The rule-based bot
    Bot,
}

impl fmt::Display for Trader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "You"),
            Self::Bot => write!(f, "Bot"),
        }
    }
}

/// An executed trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Unique trade identifier
    pub id: Uuid,
    /// Account that traded
    pub trader: Trader,
    /// Buy or sell
    pub side: TradeSide,
    /// Shares filled, always positive
    pub shares: u64,
    /// Execution price
    pub price: Decimal,
    /// Tick of execution
    pub time: u64,
}

impl TradeRecord {
    pub fn new(trader: Trader, side: TradeSide, shares: u64, price: Decimal, time: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            trader,
            side,
            shares,
            price,
            time,
        }
    }

    /// Cash moved by the trade
    pub fn notional(&self) -> Decimal {
        Decimal::from(self.shares) * self.price
    }
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ ${:.2}",
            self.trader, self.side, self.shares, self.price
        )
    }
}

/// Reasons a trade is refused; account state is left unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeRejected {
    /// Zero shares requested
    #[error("Quantity must be at least 1 share")]
    ZeroQuantity,
    /// Buy costs more than the available cash
    #[error("Insufficient cash: {shares} shares cost ${required:.2}, available ${available:.2}")]
    InsufficientCash {
        shares: u64,
        required: Decimal,
        available: Decimal,
    },
    /// Sell with an empty position
    #[error("No shares to sell")]
    NoSharesHeld,
    /// Price is zero or negative
    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),
    /// Notional value does not fit in a decimal
    #[error("Order too large: {shares} shares at ${price:.2}")]
    OrderTooLarge { shares: u64, price: Decimal },
}
