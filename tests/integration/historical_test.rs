//! Historical replay integration tests

use rust_decimal_macros::dec;
use std::path::Path;
use stock_sim::cli::{prepare_session, step_session};
use stock_sim::config::Config;
use stock_sim::price::{DataMode, TickerDirectory};
use stock_sim::report::PerformanceSummary;
use stock_sim::session::SessionPhase;

fn write_csv(dir: &Path, ticker: &str, closes: &[&str]) {
    let mut text = String::from("Date,Open,High,Low,Close,Volume\n");
    for (i, close) in closes.iter().enumerate() {
        text.push_str(&format!("2024-01-{:02},1,1,1,{},100\n", i + 1, close));
    }
    std::fs::write(dir.join(format!("{ticker}_full.csv")), text).unwrap();
}

fn config_for(dir: &Path) -> Config {
    let mut config = Config::default();
    config.historical.data_dir = dir.to_path_buf();
    config
}

#[tokio::test]
async fn test_historical_replay_runs_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let closes: Vec<String> = (0..30).map(|i| format!("{}.50", 100 + i)).collect();
    let closes: Vec<&str> = closes.iter().map(String::as_str).collect();
    write_csv(dir.path(), "ACME", &closes);

    let session = prepare_session(&config_for(dir.path()), DataMode::Historical, Some("ACME"))
        .await
        .unwrap();
    let mut guard = session.write().await;
    assert_eq!(guard.phase(), SessionPhase::Ready);

    // Tick 0 was processed on load
    let stepped = step_session(&mut guard, DataMode::Historical, None).unwrap();
    assert_eq!(stepped, 29);
    assert_eq!(guard.phase(), SessionPhase::Paused);
    assert_eq!(guard.prices().len(), 30);
    assert_eq!(guard.prices()[29].price, dec!(129.50));

    let summary = PerformanceSummary::from_session(&guard).unwrap();
    assert_eq!(summary.first_price, dec!(100.50));
    assert_eq!(summary.ticker.as_deref(), Some("ACME"));
    assert!(summary.baseline.pnl > dec!(0));
}

#[tokio::test]
async fn test_malformed_rows_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "GAPS", &["10", "", "abc", "12", "-3", "13"]);

    let session = prepare_session(&config_for(dir.path()), DataMode::Historical, Some("GAPS"))
        .await
        .unwrap();
    let mut guard = session.write().await;
    step_session(&mut guard, DataMode::Historical, None).unwrap();

    let prices: Vec<_> = guard.prices().iter().map(|p| (p.time, p.price)).collect();
    assert_eq!(prices, vec![(0, dec!(10)), (1, dec!(12)), (2, dec!(13))]);
}

#[tokio::test]
async fn test_advance_rejected_in_historical_mode() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "SPY", &["400", "401", "402"]);

    let session = prepare_session(&config_for(dir.path()), DataMode::Historical, None)
        .await
        .unwrap();
    let err = session
        .write()
        .await
        .advance(5, std::time::Instant::now())
        .unwrap_err();
    assert!(err.to_string().contains("Advance"));
    assert_eq!(session.read().await.current_tick(), Some(0));
}

#[tokio::test]
async fn test_missing_ticker_fails_to_prepare() {
    let dir = tempfile::tempdir().unwrap();
    let Err(err) = prepare_session(&config_for(dir.path()), DataMode::Historical, Some("ZZZ")).await
    else {
        panic!("expected missing data error");
    };
    assert!(err.to_string().contains("ZZZ"));
}

#[tokio::test]
async fn test_ticker_listing_scans_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "MSFT", &["1"]);
    write_csv(dir.path(), "AAPL", &["1"]);
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let tickers = TickerDirectory::new(dir.path()).list().await;
    assert_eq!(tickers, vec!["AAPL".to_string(), "MSFT".to_string()]);
}
