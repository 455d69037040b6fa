//! Simulated trading calendar
//!
//! Ticks are trading days: 252 per year, 63 per quarter, stretched onto
//! calendar days from a configurable start date.

use crate::price::PricePoint;
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Trading days per quarter
pub const TICKS_PER_QUARTER: u64 = 63;
/// Trading days per year
pub const TICKS_PER_YEAR: u64 = 252;
const CALENDAR_DAYS_PER_YEAR: u64 = 365;

/// Where a tick falls on the simulated calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarPosition {
    pub date: NaiveDate,
    /// `YYYY Qn`
    pub quarter: String,
    /// 1-based trading day within the quarter
    pub day_in_quarter: u64,
    pub days_until_quarter_end: u64,
}

/// Closing price at the end of a simulated quarter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarterSummary {
    pub label: String,
    pub tick: u64,
    pub price: Decimal,
}

/// Maps ticks to dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimCalendar {
    start: NaiveDate,
}

impl SimCalendar {
    pub fn new(start: NaiveDate) -> Self {
        Self { start }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Calendar date of `tick`: start + round(tick * 365 / 252) days
    pub fn date_for(&self, tick: u64) -> NaiveDate {
        let scaled = tick.saturating_mul(CALENDAR_DAYS_PER_YEAR);
        let days = (scaled + TICKS_PER_YEAR / 2) / TICKS_PER_YEAR;
        self.start
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX)
    }

    /// `YYYY Qn` label for the date of `tick`
    pub fn quarter_label(&self, tick: u64) -> String {
        let date = self.date_for(tick);
        format!("{} Q{}", date.year(), date.month0() / 3 + 1)
    }

    pub fn position(&self, tick: u64) -> CalendarPosition {
        let day_in_quarter = tick % TICKS_PER_QUARTER + 1;
        CalendarPosition {
            date: self.date_for(tick),
            quarter: self.quarter_label(tick),
            day_in_quarter,
            days_until_quarter_end: TICKS_PER_QUARTER - day_in_quarter,
        }
    }

    /// One entry per completed quarter, at ticks 62, 125, ...
    pub fn quarterly_summaries(&self, points: &[PricePoint]) -> Vec<QuarterSummary> {
        points
            .iter()
            .skip(TICKS_PER_QUARTER as usize - 1)
            .step_by(TICKS_PER_QUARTER as usize)
            .map(|point| QuarterSummary {
                label: self.quarter_label(point.time),
                tick: point.time,
                price: point.price,
            })
            .collect()
    }
}

impl Default for SimCalendar {
    fn default() -> Self {
        Self::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default())
    }
}
