//! End-to-end integration tests

use rust_decimal_macros::dec;
use std::time::Instant;
use stock_sim::config::Config;
use stock_sim::portfolio::Trader;
use stock_sim::price::DataMode;
use stock_sim::report::PerformanceSummary;
use stock_sim::session::{Session, SessionPhase, TickOutcome};
use stock_sim::signal::{QuantityPolicy, TradingRule};

#[test]
fn test_config_example_loads() {
    let config = Config::parse(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_file_roundtrip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
            [account]
            initial_cash = 5000

            [bot]
            rule = { kind = "crossover", short_window = 3, long_window = 8 }
            quantity = { mode = "fraction", buy = 0.5, sell = 1.0 }
        "#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.account.initial_cash, dec!(5000));
    assert_eq!(
        config.bot.rule,
        TradingRule::Crossover {
            short_window: 3,
            long_window: 8
        }
    );
    assert!(matches!(config.bot.quantity, QuantityPolicy::Fraction { .. }));
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[playback]\nspeed = 0\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("playback.speed"));
}

#[test]
fn test_seeded_synthetic_sessions_are_reproducible() {
    let run = || {
        let mut config = Config::default();
        config.synthetic.seed = Some(2024);
        let mut session = Session::new(config);
        session.select_mode(DataMode::Synthetic, None);
        session.advance(300, Instant::now()).unwrap();
        (
            session.prices().to_vec(),
            session.trades().all().iter().map(|t| (t.time, t.side, t.shares)).collect::<Vec<_>>(),
        )
    };

    assert_eq!(run(), run());
}

#[test]
fn test_full_synthetic_year() {
    let mut config = Config::default();
    config.synthetic.seed = Some(99);
    config.bot.quantity = QuantityPolicy::Max;
    let mut session = Session::new(config);
    session.select_mode(DataMode::Synthetic, None);

    let now = Instant::now();
    session.manual_buy(20, now).unwrap();
    session.start().unwrap();
    for _ in 0..252 {
        assert!(matches!(session.tick(now).unwrap(), TickOutcome::Advanced(_)));
    }
    session.pause().unwrap();

    assert_eq!(session.phase(), SessionPhase::Paused);
    assert_eq!(session.current_tick(), Some(252));
    assert_eq!(session.performance().len(), 253);
    for trade in session.trades().all() {
        if trade.trader == Trader::Bot {
            assert!(trade.time >= 19);
        }
    }

    // Accounts never go negative
    assert!(session.manual().cash >= dec!(0));
    assert!(session.bot().cash >= dec!(0));

    let summary = PerformanceSummary::from_session(&session).unwrap();
    assert_eq!(summary.ticks, 253);
    assert_eq!(summary.manual.trades, 1);
    assert_eq!(session.quarterly_summaries().len(), 4);
}
