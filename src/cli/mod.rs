//! CLI interface for stock-sim
//!
//! Provides subcommands for:
//! - `run`: Timer-driven playback with the manual trader idle and the bot live
//! - `backtest`: Step a whole series immediately and report
//! - `tickers`: List instruments available for historical mode
//! - `config`: Show the effective configuration

mod backtest;
mod run;
mod tickers;

pub use backtest::{step_session, BacktestArgs, BacktestReport};
pub use run::RunArgs;
pub use tickers::TickersArgs;

use crate::config::Config;
use crate::price::{DataMode, HistoricalLoader};
use crate::session::{load_historical, Session, SessionPhase, SharedSession};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "stock-sim")]
#[command(about = "Educational stock trading simulator with a rule-based bot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a session tick by tick
    Run(RunArgs),
    /// Run a whole session without the timer
    Backtest(BacktestArgs),
    /// List available tickers
    Tickers(TickersArgs),
    /// Show configuration
    Config,
}

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Build a session and bring it to `Ready`
///
/// Historical sessions are loaded from the configured data directory; a
/// ticker without usable data is an error here, since nothing can be played.
pub async fn prepare_session(
    config: &Config,
    mode: DataMode,
    ticker: Option<&str>,
) -> anyhow::Result<SharedSession> {
    let session: SharedSession = Arc::new(RwLock::new(Session::new(config.clone())));

    let phase = match mode {
        DataMode::Synthetic => session.write().await.select_mode(DataMode::Synthetic, None),
        DataMode::Historical => {
            let ticker = ticker.unwrap_or(config.historical.default_ticker.as_str());
            let loader = HistoricalLoader::from_config(&config.historical);
            let phase = load_historical(&session, &loader, ticker).await?;
            if phase == SessionPhase::Loading {
                anyhow::bail!(
                    "No price data for {} (expected {})",
                    ticker,
                    loader.path_for(ticker).display()
                );
            }
            phase
        }
    };

    tracing::info!(%mode, %phase, "Session prepared");
    Ok(session)
}
