//! Instrument directory

use super::LoadError;
use std::collections::BTreeSet;
use std::path::PathBuf;

const INDEX_FILE: &str = "tickers.json";
const PRICE_FILE_SUFFIX: &str = "_full.csv";

/// Lists the tickers available for historical mode
#[derive(Debug, Clone)]
pub struct TickerDirectory {
    data_dir: PathBuf,
}

impl TickerDirectory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Sorted, de-duplicated ticker symbols
    ///
    /// Reads `tickers.json` and falls back to scanning for `*_full.csv` files.
    pub async fn list(&self) -> Vec<String> {
        match self.read_index().await {
            Ok(tickers) => return normalize(tickers),
            Err(e) => tracing::debug!(error = %e, "Ticker index unavailable, scanning data dir"),
        }

        match self.scan().await {
            Ok(tickers) => normalize(tickers),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list tickers");
                Vec::new()
            }
        }
    }

    /// Read the JSON index file
    pub async fn read_index(&self) -> Result<Vec<String>, LoadError> {
        let path = self.data_dir.join(INDEX_FILE);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
        serde_json::from_str(&text).map_err(|source| LoadError::TickerIndex { path, source })
    }

    /// Collect tickers from `<TICKER>_full.csv` file names
    pub async fn scan(&self) -> Result<Vec<String>, LoadError> {
        let io_err = |source| LoadError::Io {
            path: self.data_dir.clone(),
            source,
        };
        let mut entries = tokio::fs::read_dir(&self.data_dir).await.map_err(io_err)?;

        let mut tickers = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let name = entry.file_name();
            if let Some(ticker) = name.to_str().and_then(|n| n.strip_suffix(PRICE_FILE_SUFFIX)) {
                tickers.push(ticker.to_string());
            }
        }
        Ok(tickers)
    }
}

fn normalize(tickers: Vec<String>) -> Vec<String> {
    tickers
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
