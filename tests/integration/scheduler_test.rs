//! Timed playback integration tests

use std::time::Duration;
use stock_sim::cli::prepare_session;
use stock_sim::config::Config;
use stock_sim::price::DataMode;
use stock_sim::scheduler::{PlaybackController, TickScheduler};
use stock_sim::session::{SessionError, SessionPhase, TickOutcome};
use tokio::sync::mpsc;

fn capped_config(points: usize) -> Config {
    let mut config = Config::default();
    config.synthetic.seed = Some(5);
    config.synthetic.max_points = Some(points);
    config.playback.speed = 4;
    config
}

#[tokio::test(start_paused = true)]
async fn test_playback_emits_every_tick_then_finishes() {
    let session = prepare_session(&capped_config(10), DataMode::Synthetic, None)
        .await
        .unwrap();
    let (tx, mut rx) = mpsc::channel(32);
    let mut controller = PlaybackController::new(session.clone(), TickScheduler::with_events(tx));

    tokio_test::assert_ok!(controller.play().await);
    controller.wait().await;

    let mut advanced = 0;
    let mut finished = false;
    while let Ok(outcome) = rx.try_recv() {
        match outcome {
            TickOutcome::Advanced(report) => {
                advanced += 1;
                assert_eq!(report.point.time, advanced);
            }
            TickOutcome::Finished => finished = true,
        }
    }
    assert_eq!(advanced, 9);
    assert!(finished);

    let guard = session.read().await;
    assert_eq!(guard.phase(), SessionPhase::Paused);
    assert_eq!(guard.performance().len(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_play_after_series_end_is_rejected() {
    let session = prepare_session(&capped_config(2), DataMode::Synthetic, None)
        .await
        .unwrap();
    let mut controller = PlaybackController::new(session, TickScheduler::new());

    controller.play().await.unwrap();
    controller.wait().await;

    let err = controller.play().await.unwrap_err();
    assert_eq!(err, SessionError::SeriesFinished);
    assert!(!controller.is_playing());
}

#[tokio::test(start_paused = true)]
async fn test_mode_switch_stops_playback() {
    let session = prepare_session(&capped_config(1000), DataMode::Synthetic, None)
        .await
        .unwrap();
    let mut controller = PlaybackController::new(session.clone(), TickScheduler::new());

    controller.play().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let phase = controller.select_mode(DataMode::Synthetic, None).await;
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(phase, SessionPhase::Ready);
    assert!(!controller.is_playing());
    assert_eq!(session.read().await.current_tick(), Some(0));
}
