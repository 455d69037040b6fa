//! Historical closing prices from flat CSV files
//!
//! One file per instrument, `<data_dir>/<TICKER>_full.csv`, with a header row.
//! Only the close column is read; row order defines tick order.

use super::{PricePoint, PriceSource};
use crate::config::HistoricalConfig;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading price or instrument files
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Header has no close column
    #[error("No column named {column:?} in {path}")]
    MissingColumn { path: PathBuf, column: String },
    /// File has no header row
    #[error("{0} is empty")]
    Empty(PathBuf),
    /// Instrument index is not a JSON array of symbols
    #[error("Invalid ticker index {path}: {source}")]
    TickerIndex {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads closing prices for a ticker from the data directory
#[derive(Debug, Clone)]
pub struct HistoricalLoader {
    data_dir: PathBuf,
    close_column: String,
    max_points: usize,
}

impl HistoricalLoader {
    /// Create a loader reading from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>, close_column: impl Into<String>, max_points: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            close_column: close_column.into(),
            max_points,
        }
    }

    /// Create a loader from the `[historical]` config table
    pub fn from_config(config: &HistoricalConfig) -> Self {
        Self::new(
            config.data_dir.clone(),
            config.close_column.clone(),
            config.max_points,
        )
    }

    /// Path of the CSV file for `ticker`
    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{ticker}_full.csv"))
    }

    /// Read and parse the file for `ticker`
    pub async fn load(&self, ticker: &str) -> Result<Vec<PricePoint>, LoadError> {
        let path = self.path_for(ticker);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;

        let points = parse_close_prices(&text, &self.close_column, self.max_points, &path)?;
        tracing::info!(
            ticker,
            points = points.len(),
            path = %path.display(),
            "Loaded historical prices"
        );
        Ok(points)
    }
}

#[async_trait]
impl PriceSource for HistoricalLoader {
    async fn fetch_closes(&self, ticker: &str) -> Vec<PricePoint> {
        match self.load(ticker).await {
            Ok(points) => points,
            Err(e) => {
                tracing::warn!(ticker, error = %e, "Historical prices unavailable");
                Vec::new()
            }
        }
    }
}

/// Parse the close column out of CSV text
///
/// Rows with a missing, non-numeric or non-positive close are dropped. Ticks
/// are numbered over the rows that survive, and at most `max_points` are kept.
pub fn parse_close_prices(
    text: &str,
    close_column: &str,
    max_points: usize,
    path: &Path,
) -> Result<Vec<PricePoint>, LoadError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or_else(|| LoadError::Empty(path.to_path_buf()))?;
    let column = split_row(header)
        .position(|name| name.eq_ignore_ascii_case(close_column))
        .ok_or_else(|| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: close_column.to_string(),
        })?;

    let mut points = Vec::new();
    let mut dropped = 0usize;
    for line in lines {
        if points.len() >= max_points {
            break;
        }
        match split_row(line).nth(column).and_then(parse_price) {
            Some(price) => points.push(PricePoint::new(points.len() as u64, price)),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, path = %path.display(), "Dropped malformed price rows");
    }
    Ok(points)
}

fn split_row(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|field| field.trim().trim_matches('"'))
}

fn parse_price(field: &str) -> Option<Decimal> {
    let value: f64 = field.parse().ok()?;
    PricePoint::from_f64(0, value).map(|point| point.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn parse(text: &str, max_points: usize) -> Result<Vec<PricePoint>, LoadError> {
        parse_close_prices(text, "Close", max_points, Path::new("test.csv"))
    }

    #[test]
    fn test_parses_close_column_by_header() {
        let csv = "Date,Open,High,Low,Close,Volume\n\
                   2020-01-02,1,2,0.5,100.5,10\n\
                   2020-01-03,1,2,0.5,101.25,10\n";
        let points = parse(csv, 500).unwrap();

        assert_eq!(
            points,
            vec![
                PricePoint::new(0, dec!(100.5)),
                PricePoint::new(1, dec!(101.25)),
            ]
        );
    }

    #[test]
    fn test_drops_malformed_rows() {
        // yfinance exports carry extra ticker/date rows under the header
        let csv = "Price,Close\n\
                   Ticker,AAPL\n\
                   Date,\n\
                   2020-01-02,75.08\n\
                   2020-01-03,abc\n\
                   2020-01-06,-1\n\
                   2020-01-07,\"74.95\"\n";
        let points = parse(csv, 500).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0], PricePoint::new(0, dec!(75.08)));
        assert_eq!(points[1], PricePoint::new(1, dec!(74.95)));
    }

    #[test]
    fn test_truncates_to_max_points() {
        let mut csv = String::from("Date,Close\n");
        for i in 0..20 {
            csv.push_str(&format!("d{i},{}\n", 10 + i));
        }
        let points = parse(&csv, 5).unwrap();

        assert_eq!(points.len(), 5);
        assert_eq!(points[4], PricePoint::new(4, dec!(14)));
    }

    #[test]
    fn test_header_match_is_case_insensitive() {
        let points = parse("date,close\nx,3\n", 500).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_missing_close_column_is_an_error() {
        let err = parse("Date,Open\nx,1\n", 500).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));
    }

    #[test]
    fn test_empty_text_is_an_error() {
        let err = parse("\n\n", 500).unwrap_err();
        assert!(matches!(err, LoadError::Empty(_)));
    }

    #[tokio::test]
    async fn test_loader_reads_ticker_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("SPY_full.csv")).unwrap();
        writeln!(file, "Date,Close").unwrap();
        writeln!(file, "2020-01-02,320.5").unwrap();
        writeln!(file, "2020-01-03,318.0").unwrap();

        let loader = HistoricalLoader::new(dir.path(), "Close", 500);
        let points = loader.load("SPY").await.unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[1].price, dec!(318));
    }

    #[tokio::test]
    async fn test_unreachable_source_yields_empty_series() {
        let dir = tempfile::tempdir().unwrap();
        let loader = HistoricalLoader::new(dir.path(), "Close", 500);

        assert!(matches!(
            loader.load("MISSING").await,
            Err(LoadError::Io { .. })
        ));
        assert!(loader.fetch_closes("MISSING").await.is_empty());
    }
}
