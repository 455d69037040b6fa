//! Backtest command implementation

use super::{prepare_session, OutputFormat};
use crate::analytics::{QuarterSummary, StockDashboard, TimeFrame};
use crate::config::Config;
use crate::price::DataMode;
use crate::report::PerformanceSummary;
use crate::session::{Session, TickOutcome};
use clap::Args;
use serde::Serialize;

/// Default synthetic length: one simulated year
const DEFAULT_SYNTHETIC_TICKS: usize = 252;

#[derive(Args, Debug)]
pub struct BacktestArgs {
    /// Price source
    #[arg(long, value_enum, default_value_t = DataMode::Synthetic)]
    pub mode: DataMode,

    /// Ticker for historical mode (defaults to `historical.default_ticker`)
    #[arg(long)]
    pub ticker: Option<String>,

    /// Ticks to simulate after the first price (synthetic default 252, historical: whole series)
    #[arg(long)]
    pub ticks: Option<usize>,

    /// RNG seed for synthetic prices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dashboard window
    #[arg(long, value_enum, default_value_t = TimeFrame::All)]
    pub time_frame: TimeFrame,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Everything the backtest reports
#[derive(Debug, Serialize)]
pub struct BacktestReport {
    pub summary: PerformanceSummary,
    pub dashboard: Option<StockDashboard>,
    pub quarters: Vec<QuarterSummary>,
}

impl BacktestArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut config = config.clone();
        if let Some(seed) = self.seed {
            config.synthetic.seed = Some(seed);
        }

        let session = prepare_session(&config, self.mode, self.ticker.as_deref()).await?;
        let mut guard = session.write().await;
        let stepped = step_session(&mut guard, self.mode, self.ticks)?;
        tracing::info!(stepped, "Backtest complete");

        let Some(summary) = PerformanceSummary::from_session(&guard) else {
            anyhow::bail!("Session has no prices");
        };
        let report = BacktestReport {
            summary,
            dashboard: guard.dashboard(self.time_frame),
            quarters: guard.quarterly_summaries(),
        };

        match self.format {
            OutputFormat::Table => println!("{}", format_report(&report)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        Ok(())
    }
}

/// Process the series without the timer, returning the number of ticks stepped
pub fn step_session(
    session: &mut Session,
    mode: DataMode,
    ticks: Option<usize>,
) -> anyhow::Result<usize> {
    let now = std::time::Instant::now();
    match mode {
        DataMode::Synthetic => {
            let ticks = ticks.unwrap_or(DEFAULT_SYNTHETIC_TICKS);
            Ok(session.advance(ticks, now)?)
        }
        DataMode::Historical => {
            session.start()?;
            let mut stepped = 0;
            while ticks.map_or(true, |limit| stepped < limit) {
                match session.tick(now)? {
                    TickOutcome::Advanced(_) => stepped += 1,
                    TickOutcome::Finished => break,
                }
            }
            Ok(stepped)
        }
    }
}

fn format_report(report: &BacktestReport) -> String {
    let mut out = report.summary.format_table();

    if let Some(dashboard) = &report.dashboard {
        out.push_str(&format!(
            r#"
STOCK DASHBOARD ({:?})
───────────────────────────────────────────────────────
Starting Price:   {:.2}
Current Price:    {:.2}
% Change:         {:+.2}%
Shares:           {}
Market Cap:       {:.2}
All-Time High:    {:.2}
All-Time Low:     {:.2}
"#,
            dashboard.time_frame,
            dashboard.starting_price,
            dashboard.current_price,
            dashboard.change_pct,
            dashboard.shares_outstanding,
            dashboard.market_cap,
            dashboard.all_time_high,
            dashboard.all_time_low,
        ));
    }

    if !report.quarters.is_empty() {
        out.push_str("\nQUARTERLY SUMMARY\n───────────────────────────────────────────────────────\n");
        for quarter in &report.quarters {
            out.push_str(&format!("{:<10} tick {:>5}   ${:.2}\n", quarter.label, quarter.tick, quarter.price));
        }
    }
    out
}
