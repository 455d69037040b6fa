//! Append-only trade history

use super::{TradeRecord, Trader};

/// Every trade applied during a session, oldest first
#[derive(Debug, Clone, Default)]
pub struct TradeLog {
    records: Vec<TradeRecord>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: TradeRecord) {
        self.records.push(record);
    }

    /// The last `n` trades, oldest first
    pub fn recent(&self, n: usize) -> &[TradeRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn all(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Number of trades placed by `trader`
    pub fn count_for(&self, trader: Trader) -> usize {
        self.records.iter().filter(|r| r.trader == trader).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
