//! Net-worth history

use rust_decimal::Decimal;
use serde::Serialize;

/// Net worth of every account at one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformancePoint {
    pub tick: u64,
    pub manual: Decimal,
    pub bot: Decimal,
    pub baseline: Decimal,
}

/// Append-only per-tick performance series
#[derive(Debug, Clone, Default)]
pub struct PerformanceHistory {
    points: Vec<PerformancePoint>,
}

impl PerformanceHistory {
    pub fn record(&mut self, point: PerformancePoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[PerformancePoint] {
        &self.points
    }

    pub fn last(&self) -> Option<&PerformancePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
