//! Buy-and-hold reference account

use super::account::gain_pct;
use crate::signal::max_affordable;
use rust_decimal::Decimal;
use serde::Serialize;

/// Buys once at the first price and never trades again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuyAndHold {
    /// Shares bought at the first price
    pub shares: u64,
    /// Cash left over after the purchase
    pub cash: Decimal,
    /// Price of the purchase
    pub entry_price: Decimal,
    pub initial_cash: Decimal,
}

impl BuyAndHold {
    /// Spend `initial_cash` on whole shares at `first_price`
    pub fn initialize(initial_cash: Decimal, first_price: Decimal) -> Self {
        let shares = max_affordable(initial_cash, first_price);
        Self {
            shares,
            cash: initial_cash - Decimal::from(shares) * first_price,
            entry_price: first_price,
            initial_cash,
        }
    }

    pub fn net_worth(&self, price: Decimal) -> Decimal {
        self.cash + Decimal::from(self.shares) * price
    }

    pub fn pnl(&self, price: Decimal) -> Decimal {
        self.net_worth(price) - self.initial_cash
    }

    pub fn gain_pct(&self, price: Decimal) -> Decimal {
        gain_pct(self.initial_cash, self.net_worth(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_baseline_spends_initial_cash() {
        let baseline = BuyAndHold::initialize(dec!(10000), dec!(100));
        assert_eq!(baseline.shares, 100);
        assert_eq!(baseline.cash, dec!(0));
        assert_eq!(baseline.net_worth(dec!(120)), dec!(12000));
        assert_eq!(baseline.gain_pct(dec!(120)), dec!(20));
    }

    #[test]
    fn test_baseline_keeps_leftover_cash() {
        let baseline = BuyAndHold::initialize(dec!(10000), dec!(300));
        assert_eq!(baseline.shares, 33);
        assert_eq!(baseline.cash, dec!(100));
        assert_eq!(baseline.pnl(dec!(300)), dec!(0));
    }
}
