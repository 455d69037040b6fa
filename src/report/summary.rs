//! End-of-run performance summary

use crate::portfolio::{gain_pct, Trader};
use crate::price::DataMode;
use crate::session::{PerformancePoint, Session};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Results for one account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountResult {
    /// Final net worth
    pub net_worth: Decimal,
    /// Net worth minus initial cash
    pub pnl: Decimal,
    /// P&L as a percentage of initial cash
    pub gain_pct: Decimal,
    /// Largest peak-to-trough net worth decline (percentage)
    pub max_drawdown_pct: Decimal,
    /// Trades placed
    pub trades: usize,
}

impl AccountResult {
    fn from_series(initial_cash: Decimal, series: &[Decimal], trades: usize) -> Self {
        let net_worth = series.last().copied().unwrap_or(initial_cash);
        Self {
            net_worth,
            pnl: net_worth - initial_cash,
            gain_pct: gain_pct(initial_cash, net_worth),
            max_drawdown_pct: max_drawdown_pct(series),
            trades,
        }
    }
}

/// Summary of a session's performance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceSummary {
    pub mode: Option<DataMode>,
    pub ticker: Option<String>,
    /// Points processed
    pub ticks: usize,
    pub first_price: Decimal,
    pub last_price: Decimal,
    /// Bot rule description
    pub rule: String,
    pub manual: AccountResult,
    pub bot: AccountResult,
    pub baseline: AccountResult,
}

impl PerformanceSummary {
    /// Summarize `session`, `None` before any price was processed
    pub fn from_session(session: &Session) -> Option<Self> {
        let prices = session.prices();
        let first_price = prices.first()?.price;
        let last_price = prices.last()?.price;

        let initial_cash = session.config().account.initial_cash;
        let history = session.performance().points();
        let series = |pick: fn(&PerformancePoint) -> Decimal| -> Vec<Decimal> {
            history.iter().map(pick).collect()
        };
        let trades = session.trades();

        Some(Self {
            mode: session.mode(),
            ticker: session.ticker().map(str::to_string),
            ticks: prices.len(),
            first_price,
            last_price,
            rule: session.evaluator().rule().describe(),
            manual: AccountResult::from_series(
                initial_cash,
                &series(|p| p.manual),
                trades.count_for(Trader::Manual),
            ),
            bot: AccountResult::from_series(
                initial_cash,
                &series(|p| p.bot),
                trades.count_for(Trader::Bot),
            ),
            baseline: AccountResult::from_series(initial_cash, &series(|p| p.baseline), 1),
        })
    }

    /// Format summary as a table
    pub fn format_table(&self) -> String {
        let source = match (&self.mode, &self.ticker) {
            (Some(DataMode::Historical), Some(ticker)) => format!("historical ({ticker})"),
            (Some(mode), _) => mode.to_string(),
            (None, _) => "-".to_string(),
        };

        format!(
            r#"
══════════════════════════════════════════════════════
               SIMULATION RESULTS
══════════════════════════════════════════════════════

MARKET
───────────────────────────────────────────────────────
Source:           {}
Ticks:            {}
Price:            {:.2} -> {:.2}
Bot Rule:         {}

PERFORMANCE                Net Worth        P&L     Gain    Max DD
───────────────────────────────────────────────────────
{}
{}
{}
══════════════════════════════════════════════════════
"#,
            source,
            self.ticks,
            self.first_price,
            self.last_price,
            self.rule,
            format_row("You", &self.manual),
            format_row("Bot", &self.bot),
            format_row("Buy & Hold", &self.baseline),
        )
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn format_row(label: &str, result: &AccountResult) -> String {
    format!(
        "{:<12} {:>12.2} {:>+10.2} {:>+7.2}% {:>7.2}%  ({} trades)",
        label, result.net_worth, result.pnl, result.gain_pct, result.max_drawdown_pct, result.trades
    )
}

/// Largest decline from a running peak, as a percentage of that peak
pub fn max_drawdown_pct(series: &[Decimal]) -> Decimal {
    let mut peak = Decimal::ZERO;
    let mut worst = Decimal::ZERO;
    for value in series {
        peak = peak.max(*value);
        if peak > Decimal::ZERO {
            worst = worst.max((peak - *value) / peak * dec!(100));
        }
    }
    worst
}
