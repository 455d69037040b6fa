//! Cash and share bookkeeping for one trader

use super::{Position, TradeRecord, TradeRejected, TradeSide, Trader};
use crate::signal::{max_affordable, BotView};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A trading account holding cash and at most one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Owner of the account
    pub trader: Trader,
    /// Cash on hand, never negative
    pub cash: Decimal,
    /// Open position, `None` when flat
    pub position: Option<Position>,
    /// Cash at session start
    pub initial_cash: Decimal,
}

impl Account {
    /// Create a flat account with `initial_cash`
    pub fn new(trader: Trader, initial_cash: Decimal) -> Self {
        Self {
            trader,
            cash: initial_cash,
            position: None,
            initial_cash,
        }
    }

    /// Shares held
    pub fn shares(&self) -> u64 {
        self.position.map_or(0, |p| p.shares)
    }

    /// Average entry price of the open position
    pub fn avg_price(&self) -> Option<Decimal> {
        self.position.map(|p| p.avg_price)
    }

    /// Apply a trade at `price`
    ///
    /// Buys must be fully affordable. Sells are clamped to the shares held.
    /// On rejection the account is unchanged.
    pub fn apply_trade(
        &mut self,
        side: TradeSide,
        quantity: u64,
        price: Decimal,
        time: u64,
    ) -> Result<TradeRecord, TradeRejected> {
        if price <= Decimal::ZERO {
            return Err(TradeRejected::InvalidPrice(price));
        }
        if quantity == 0 {
            return Err(TradeRejected::ZeroQuantity);
        }

        match side {
            TradeSide::Buy => self.buy(quantity, price, time),
            TradeSide::Sell => self.sell(quantity, price, time),
        }
    }

    /// Buy every share the cash allows
    pub fn buy_all(&mut self, price: Decimal, time: u64) -> Result<TradeRecord, TradeRejected> {
        if price <= Decimal::ZERO {
            return Err(TradeRejected::InvalidPrice(price));
        }
        match max_affordable(self.cash, price) {
            0 => Err(TradeRejected::InsufficientCash {
                shares: 1,
                required: price,
                available: self.cash,
            }),
            quantity => self.apply_trade(TradeSide::Buy, quantity, price, time),
        }
    }

    /// Sell the whole position
    pub fn sell_all(&mut self, price: Decimal, time: u64) -> Result<TradeRecord, TradeRejected> {
        match self.shares() {
            0 => Err(TradeRejected::NoSharesHeld),
            quantity => self.apply_trade(TradeSide::Sell, quantity, price, time),
        }
    }

    fn buy(&mut self, quantity: u64, price: Decimal, time: u64) -> Result<TradeRecord, TradeRejected> {
        let cost = notional(quantity, price)?;
        if cost > self.cash {
            return Err(TradeRejected::InsufficientCash {
                shares: quantity,
                required: cost,
                available: self.cash,
            });
        }

        self.cash -= cost;
        match self.position.as_mut() {
            Some(position) => position.add(quantity, price),
            None => self.position = Some(Position::open(quantity, price)),
        }

        Ok(TradeRecord::new(self.trader, TradeSide::Buy, quantity, price, time))
    }

    fn sell(&mut self, quantity: u64, price: Decimal, time: u64) -> Result<TradeRecord, TradeRejected> {
        let Some(position) = self.position else {
            return Err(TradeRejected::NoSharesHeld);
        };

        let filled = quantity.min(position.shares);
        let proceeds = notional(filled, price)?;
        self.cash = self
            .cash
            .checked_add(proceeds)
            .ok_or(TradeRejected::OrderTooLarge {
                shares: filled,
                price,
            })?;
        self.position = position.reduce(filled);

        Ok(TradeRecord::new(self.trader, TradeSide::Sell, filled, price, time))
    }

    /// Cash plus mark-to-market value of held shares
    pub fn net_worth(&self, price: Decimal) -> Decimal {
        self.cash + self.position.map_or(Decimal::ZERO, |p| p.market_value(price))
    }

    /// Net worth minus initial cash
    pub fn pnl(&self, price: Decimal) -> Decimal {
        self.net_worth(price) - self.initial_cash
    }

    /// P&L as a percentage of initial cash
    pub fn gain_pct(&self, price: Decimal) -> Decimal {
        gain_pct(self.initial_cash, self.net_worth(price))
    }

    pub fn unrealized_pnl(&self, price: Decimal) -> Decimal {
        self.position
            .map_or(Decimal::ZERO, |p| p.unrealized_pnl(price))
    }

    /// Read-only view handed to the rule evaluator
    pub fn view(&self) -> BotView {
        BotView {
            cash: self.cash,
            shares: self.shares(),
        }
    }
}

fn notional(shares: u64, price: Decimal) -> Result<Decimal, TradeRejected> {
    Decimal::from(shares)
        .checked_mul(price)
        .ok_or(TradeRejected::OrderTooLarge { shares, price })
}

/// Percentage change from `initial` to `current`, zero when `initial` is zero
pub fn gain_pct(initial: Decimal, current: Decimal) -> Decimal {
    if initial.is_zero() {
        return Decimal::ZERO;
    }
    (current - initial) / initial * dec!(100)
}
