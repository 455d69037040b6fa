//! Bot decision making

use super::sizing::max_affordable;
use super::{Action, BotView, QuantityPolicy, TradeSignal, TradingRule};
use crate::price::PricePoint;
use rust_decimal::Decimal;

/// Combines a trading rule with a sizing policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleEvaluator {
    rule: TradingRule,
    policy: QuantityPolicy,
}

impl RuleEvaluator {
    pub fn new(rule: TradingRule, policy: QuantityPolicy) -> Self {
        Self { rule, policy }
    }

    pub fn rule(&self) -> TradingRule {
        self.rule
    }

    pub fn policy(&self) -> QuantityPolicy {
        self.policy
    }

    /// Decide the bot's action for the latest tick
    ///
    /// `history` holds the stored series up to and including the current tick.
    /// Never mutates anything; the caller applies the resulting trade.
    pub fn evaluate(
        &self,
        history: &[PricePoint],
        current_price: Decimal,
        bot: &BotView,
    ) -> TradeSignal {
        match self.rule.direction(history, current_price) {
            Action::Buy if max_affordable(bot.cash, current_price) >= 1 => {
                TradeSignal::buy(self.policy.buy_quantity(bot.cash, current_price))
            }
            Action::Sell if bot.shares > 0 => {
                TradeSignal::sell(self.policy.sell_quantity(bot.shares))
            }
            _ => TradeSignal::hold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ramp(len: usize, start: i64, step: i64) -> Vec<PricePoint> {
        (0..len)
            .map(|i| PricePoint::new(i as u64, Decimal::from(start + step * i as i64)))
            .collect()
    }

    fn flat_bot() -> BotView {
        BotView {
            cash: dec!(10000),
            shares: 0,
        }
    }

    #[test]
    fn test_never_trades_before_long_window() {
        let evaluator = RuleEvaluator::default();
        let history = ramp(60, 100, 1);
        let bot = BotView {
            cash: dec!(10000),
            shares: 5,
        };

        for t in 0..19 {
            let signal = evaluator.evaluate(&history[..=t], history[t].price, &bot);
            assert!(signal.is_hold(), "tick {t} traded");
        }
        let signal = evaluator.evaluate(&history[..20], history[19].price, &bot);
        assert_eq!(signal, TradeSignal::buy(1));
    }

    #[test]
    fn test_buy_requires_one_affordable_share() {
        let evaluator = RuleEvaluator::default();
        let history = ramp(25, 100, 1);
        let broke = BotView {
            cash: dec!(50),
            shares: 0,
        };
        assert!(evaluator.evaluate(&history, dec!(124), &broke).is_hold());
    }

    #[test]
    fn test_sell_requires_shares() {
        let evaluator = RuleEvaluator::default();
        let history = ramp(25, 200, -1);

        assert!(evaluator.evaluate(&history, dec!(176), &flat_bot()).is_hold());

        let holder = BotView {
            cash: dec!(0),
            shares: 7,
        };
        assert_eq!(
            evaluator.evaluate(&history, dec!(176), &holder),
            TradeSignal::sell(1)
        );
    }

    #[test]
    fn test_max_policy_sizes_whole_account() {
        let evaluator = RuleEvaluator::new(TradingRule::default(), QuantityPolicy::Max);
        let history = ramp(25, 100, 1);
        assert_eq!(
            evaluator.evaluate(&history, dec!(125), &flat_bot()),
            TradeSignal::buy(80)
        );
    }

    #[test]
    fn test_fraction_rounding_to_zero_holds() {
        let evaluator = RuleEvaluator::new(
            TradingRule::default(),
            QuantityPolicy::Fraction {
                buy: dec!(0.01),
                sell: dec!(0.1),
            },
        );
        let history = ramp(25, 100, 1);
        let bot = BotView {
            cash: dec!(1000),
            shares: 0,
        };
        // 1% of 1000 buys nothing at 125
        assert!(evaluator.evaluate(&history, dec!(125), &bot).is_hold());
    }
}
