//! stock-sim: Educational stock trading simulator
//!
//! This library provides the core components for:
//! - Synthetic GBM prices and historical CSV replay
//! - Volatility shocks applied to quoted prices
//! - Moving-average trading rules for an automated bot
//! - Portfolio bookkeeping against a buy-and-hold baseline
//! - A session state machine driven by a fixed-interval tick scheduler
//! - Dashboard, calendar and sentiment analytics
//! - Performance reports and a command-line front end

pub mod analytics;
pub mod cli;
pub mod config;
pub mod portfolio;
pub mod price;
pub mod report;
pub mod scheduler;
pub mod session;
pub mod signal;
pub mod telemetry;
