//! Market analytics
//!
//! Dashboard metrics, the simulated calendar and sentiment readings derived
//! from a session's price series and generator parameters.

mod calendar;
mod dashboard;
mod sentiment;

pub use calendar::{
    CalendarPosition, QuarterSummary, SimCalendar, TICKS_PER_QUARTER, TICKS_PER_YEAR,
};
pub use dashboard::{StockDashboard, TimeFrame, SHARES_OUTSTANDING};
pub use sentiment::{MarketSentiment, Sentiment};
