//! Stock dashboard metrics over a trailing window

use super::calendar::{TICKS_PER_QUARTER, TICKS_PER_YEAR};
use crate::portfolio::gain_pct;
use crate::price::PricePoint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shares outstanding of the simulated company
pub const SHARES_OUTSTANDING: u64 = 1_000_000;

/// Trailing window the dashboard summarizes
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum TimeFrame {
    /// Last 63 ticks
    #[serde(rename = "1Q")]
    #[value(name = "1q")]
    Quarter,
    /// Last 252 ticks
    #[serde(rename = "1Y")]
    #[value(name = "1y")]
    Year,
    /// Last 1260 ticks
    #[serde(rename = "5Y")]
    #[value(name = "5y")]
    FiveYears,
    /// Whole series
    #[default]
    #[serde(rename = "ALL")]
    All,
}

impl TimeFrame {
    /// Number of trailing points, `None` for the whole series
    pub fn points(&self) -> Option<usize> {
        match self {
            Self::Quarter => Some(TICKS_PER_QUARTER as usize),
            Self::Year => Some(TICKS_PER_YEAR as usize),
            Self::FiveYears => Some(5 * TICKS_PER_YEAR as usize),
            Self::All => None,
        }
    }

    /// Trailing slice of `points` covered by this frame
    pub fn slice<'a>(&self, points: &'a [PricePoint]) -> &'a [PricePoint] {
        match self.points() {
            Some(n) => &points[points.len().saturating_sub(n)..],
            None => points,
        }
    }
}

/// Headline metrics for the simulated stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockDashboard {
    pub time_frame: TimeFrame,
    pub starting_price: Decimal,
    pub current_price: Decimal,
    /// Percentage change from start to current
    pub change_pct: Decimal,
    pub shares_outstanding: u64,
    pub market_cap: Decimal,
    /// Highest price in the window
    pub all_time_high: Decimal,
    /// Lowest price in the window
    pub all_time_low: Decimal,
}

impl StockDashboard {
    /// Compute the dashboard, `None` for an empty series
    pub fn compute(points: &[PricePoint], time_frame: TimeFrame) -> Option<Self> {
        let window = time_frame.slice(points);
        let first = window.first()?.price;
        let last = window.last()?.price;
        let high = window.iter().map(|p| p.price).max()?;
        let low = window.iter().map(|p| p.price).min()?;

        Some(Self {
            time_frame,
            starting_price: first,
            current_price: last,
            change_pct: gain_pct(first, last),
            shares_outstanding: SHARES_OUTSTANDING,
            market_cap: last * Decimal::from(SHARES_OUTSTANDING),
            all_time_high: high,
            all_time_low: low,
        })
    }
}
