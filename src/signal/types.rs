//! Signal types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Action proposed by the trading rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

/// Evaluator output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSignal {
    /// What to do this tick
    pub action: Action,
    /// Number of shares, zero for `Hold`
    pub quantity: u64,
}

impl TradeSignal {
    /// Do nothing this tick
    pub fn hold() -> Self {
        Self {
            action: Action::Hold,
            quantity: 0,
        }
    }

    pub fn buy(quantity: u64) -> Self {
        Self::sized(Action::Buy, quantity)
    }

    pub fn sell(quantity: u64) -> Self {
        Self::sized(Action::Sell, quantity)
    }

    // A zero-share order is no order
    fn sized(action: Action, quantity: u64) -> Self {
        if quantity == 0 {
            Self::hold()
        } else {
            Self { action, quantity }
        }
    }

    pub fn is_hold(&self) -> bool {
        self.action == Action::Hold
    }
}

/// Read-only view of the bot account passed to the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotView {
    /// Available cash
    pub cash: Decimal,
    /// Shares currently held
    pub shares: u64,
}
