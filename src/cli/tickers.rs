//! Tickers command implementation

use crate::config::Config;
use crate::price::TickerDirectory;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TickersArgs {
    /// Data directory (defaults to `historical.data_dir`)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl TickersArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let data_dir = self
            .data_dir
            .clone()
            .unwrap_or_else(|| config.historical.data_dir.clone());
        let tickers = TickerDirectory::new(data_dir.clone()).list().await;

        if tickers.is_empty() {
            println!("No tickers found in {}", data_dir.display());
        } else {
            for ticker in tickers {
                println!("{ticker}");
            }
        }
        Ok(())
    }
}
