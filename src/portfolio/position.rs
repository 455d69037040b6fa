//! Position tracking

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Open holding of the session's instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Shares held, always positive
    pub shares: u64,
    /// Cost-basis weighted average price of open lots
    pub avg_price: Decimal,
}

impl Position {
    /// Open a position from a first buy
    pub fn open(shares: u64, price: Decimal) -> Self {
        Self {
            shares,
            avg_price: price,
        }
    }

    /// Add a buy lot, re-weighting the average price
    pub fn add(&mut self, shares: u64, price: Decimal) {
        let total = self.shares + shares;
        let cost = self.cost_basis() + Decimal::from(shares) * price;
        self.avg_price = cost / Decimal::from(total);
        self.shares = total;
    }

    /// Remove shares, returning `None` when the position is closed
    ///
    /// `shares` must not exceed the held amount.
    pub fn reduce(mut self, shares: u64) -> Option<Self> {
        self.shares = self.shares.saturating_sub(shares);
        (self.shares > 0).then_some(self)
    }

    /// Total paid for the open shares
    pub fn cost_basis(&self) -> Decimal {
        Decimal::from(self.shares) * self.avg_price
    }

    /// Mark-to-market value
    pub fn market_value(&self, price: Decimal) -> Decimal {
        Decimal::from(self.shares) * price
    }

    pub fn unrealized_pnl(&self, price: Decimal) -> Decimal {
        (price - self.avg_price) * Decimal::from(self.shares)
    }
}
