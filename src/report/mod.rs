//! Reporting module
//!
//! Performance summaries rendered as tables or JSON

mod summary;

pub use summary::{max_drawdown_pct, AccountResult, PerformanceSummary};
