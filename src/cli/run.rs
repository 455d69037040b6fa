//! Run command implementation

use super::{prepare_session, OutputFormat};
use crate::config::Config;
use crate::price::DataMode;
use crate::report::PerformanceSummary;
use crate::scheduler::{PlaybackController, TickScheduler};
use crate::session::{AdvancePreset, TickOutcome};
use clap::Args;
use tokio::sync::mpsc;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Price source
    #[arg(long, value_enum, default_value_t = DataMode::Synthetic)]
    pub mode: DataMode,

    /// Ticker for historical mode (defaults to `historical.default_ticker`)
    #[arg(long)]
    pub ticker: Option<String>,

    /// Ticks per second
    #[arg(long)]
    pub speed: Option<u32>,

    /// Stop after this many ticks
    #[arg(long)]
    pub ticks: Option<usize>,

    /// RNG seed for synthetic prices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Jump ahead before playback starts (synthetic mode)
    #[arg(long, value_enum)]
    pub advance: Option<AdvancePreset>,

    /// Disable the trading bot
    #[arg(long)]
    pub no_bot: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl RunArgs {
    /// Config with command-line overrides applied
    pub fn effective_config(&self, config: &Config) -> anyhow::Result<Config> {
        let mut config = config.clone();
        if let Some(seed) = self.seed {
            config.synthetic.seed = Some(seed);
        }
        if let Some(speed) = self.speed {
            config.playback.speed = speed;
        }
        if self.no_bot {
            config.bot.enabled = false;
        }
        config.validate()?;
        Ok(config)
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let config = self.effective_config(config)?;
        let session = prepare_session(&config, self.mode, self.ticker.as_deref()).await?;

        if let Some(preset) = self.advance {
            let processed = session
                .write()
                .await
                .advance(preset.ticks(), tokio::time::Instant::now().into_std())?;
            tracing::info!(processed, "Advanced before playback");
        }

        let (tx, mut rx) = mpsc::channel(64);
        let mut controller =
            PlaybackController::new(session.clone(), TickScheduler::with_events(tx));
        controller.play().await?;
        tracing::info!(
            mode = %self.mode,
            speed = config.playback.speed,
            limit = self.ticks,
            "Playback running, Ctrl-C to stop"
        );

        let mut played = 0usize;
        loop {
            tokio::select! {
                Some(outcome) = rx.recv() => {
                    let TickOutcome::Advanced(report) = outcome else {
                        tracing::info!("Price series finished");
                        break;
                    };
                    played += 1;
                    if let Some(shock) = report.shock {
                        tracing::info!(tick = report.point.time, quote = %report.quote, "{}", shock.kind.message());
                    }
                    if self.ticks.is_some_and(|limit| played >= limit) {
                        controller.pause().await?;
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    if let Err(e) = controller.pause().await {
                        tracing::debug!(error = %e, "Session already stopped");
                    }
                    break;
                }
            }
        }

        let guard = session.read().await;
        match PerformanceSummary::from_session(&guard) {
            Some(summary) => match self.format {
                OutputFormat::Table => println!("{}", summary.format_table()),
                OutputFormat::Json => println!("{}", summary.to_json()?),
            },
            None => println!("No prices were played"),
        }
        Ok(())
    }
}
