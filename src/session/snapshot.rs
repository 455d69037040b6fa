//! Serializable views of a session for renderers

use super::notices::NoticeKind;
use super::state::SessionPhase;
use crate::analytics::{CalendarPosition, MarketSentiment};
use crate::portfolio::{Account, TradeRecord};
use crate::price::{DataMode, GbmParams, ShockKind};
use rust_decimal::Decimal;
use serde::Serialize;

/// Account figures marked at one price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    pub cash: Decimal,
    pub shares: u64,
    pub avg_price: Option<Decimal>,
    pub net_worth: Decimal,
    pub pnl: Decimal,
    pub gain_pct: Decimal,
    pub unrealized_pnl: Decimal,
}

impl AccountSnapshot {
    pub fn new(account: &Account, price: Decimal) -> Self {
        Self {
            cash: account.cash,
            shares: account.shares(),
            avg_price: account.avg_price(),
            net_worth: account.net_worth(price),
            pnl: account.pnl(price),
            gain_pct: account.gain_pct(price),
            unrealized_pnl: account.unrealized_pnl(price),
        }
    }
}

/// A visible notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeView {
    pub kind: NoticeKind,
    pub message: String,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub mode: Option<DataMode>,
    pub ticker: Option<String>,
    /// Most recently processed tick
    pub tick: Option<u64>,
    /// Stored price at that tick
    pub price: Option<Decimal>,
    /// Price shown to traders
    pub quote: Option<Decimal>,
    /// Active shock, if any
    pub shock: Option<ShockKind>,
    pub manual: AccountSnapshot,
    pub bot: AccountSnapshot,
    pub baseline_net_worth: Option<Decimal>,
    pub bot_enabled: bool,
    pub recent_trades: Vec<TradeRecord>,
    pub notices: Vec<NoticeView>,
    /// Generator parameters, absent in historical mode
    pub params: Option<GbmParams>,
    pub sentiment: Option<MarketSentiment>,
    pub calendar: Option<CalendarPosition>,
    /// Ticks per second
    pub speed: u32,
}
