//! Portfolio module
//!
//! Accounts, positions, the buy-and-hold baseline and the trade log

mod account;
mod baseline;
mod log;
mod position;
mod types;

pub use account::{gain_pct, Account};
pub use baseline::BuyAndHold;
pub use log::TradeLog;
pub use position::Position;
pub use types::{TradeRecord, TradeRejected, TradeSide, Trader};
