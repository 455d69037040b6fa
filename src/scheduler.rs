//! Fixed-interval tick loop
//!
//! At most one tick task exists per scheduler. The loop re-reads the session
//! speed before every sleep and exits on its own once the session stops
//! running.

use crate::price::DataMode;
use crate::session::{SessionError, SessionPhase, SharedSession, TickOutcome};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Owns the single repeating tick task
#[derive(Default)]
pub struct TickScheduler {
    handle: Option<JoinHandle<()>>,
    events: Option<mpsc::Sender<TickOutcome>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduler that forwards every tick outcome to `events`
    pub fn with_events(events: mpsc::Sender<TickOutcome>) -> Self {
        Self {
            handle: None,
            events: Some(events),
        }
    }

    /// Spawn the tick loop, aborting any loop already running
    pub fn start(&mut self, session: SharedSession) {
        self.stop();
        let events = self.events.clone();
        self.handle = Some(tokio::spawn(run_tick_loop(session, events)));
    }

    /// Abort the tick loop
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// A tick loop is outstanding
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the tick loop to end by itself
    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "Tick loop failed");
                }
            }
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_tick_loop(session: SharedSession, events: Option<mpsc::Sender<TickOutcome>>) {
    loop {
        let interval = session.read().await.tick_interval();
        tokio::time::sleep(interval).await;

        let now = tokio::time::Instant::now().into_std();
        let result = session.write().await.tick(now);

        let finished = match result {
            Ok(outcome) => {
                let finished = outcome == TickOutcome::Finished;
                if let Some(tx) = &events {
                    if tx.send(outcome).await.is_err() {
                        tracing::debug!("Tick event receiver dropped");
                    }
                }
                finished
            }
            Err(e) => {
                tracing::debug!(error = %e, "Session not running, tick loop exiting");
                true
            }
        };

        if finished {
            break;
        }
    }
}

/// Play/pause/reset controls over a shared session
pub struct PlaybackController {
    session: SharedSession,
    scheduler: TickScheduler,
}

impl PlaybackController {
    pub fn new(session: SharedSession, scheduler: TickScheduler) -> Self {
        Self { session, scheduler }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Stop playback and choose a new data mode
    pub async fn select_mode(&mut self, mode: DataMode, ticker: Option<String>) -> SessionPhase {
        self.scheduler.stop();
        self.session.write().await.select_mode(mode, ticker)
    }

    /// Start or resume ticking
    pub async fn play(&mut self) -> Result<(), SessionError> {
        self.session.write().await.start()?;
        self.scheduler.start(self.session.clone());
        Ok(())
    }

    /// Stop ticking, keeping state
    pub async fn pause(&mut self) -> Result<(), SessionError> {
        self.scheduler.stop();
        self.session.write().await.pause()
    }

    /// Stop ticking and discard state
    pub async fn reset(&mut self) {
        self.scheduler.stop();
        self.session.write().await.reset();
    }

    /// Change ticks per second; applies from the next interval
    pub async fn set_speed(&mut self, speed: u32) -> Result<(), SessionError> {
        self.session.write().await.set_speed(speed)
    }

    /// Jump ahead `ticks` points, synthetic mode only
    pub async fn advance(&mut self, ticks: usize) -> Result<usize, SessionError> {
        let now = tokio::time::Instant::now().into_std();
        self.session.write().await.advance(ticks, now)
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Wait until playback stops by itself
    pub async fn wait(&mut self) {
        self.scheduler.join().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::Session;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::RwLock;

    fn ready_session(max_points: Option<usize>) -> SharedSession {
        let mut config = Config::default();
        config.synthetic.seed = Some(11);
        config.synthetic.max_points = max_points;
        let mut session = Session::new(config);
        session.select_mode(DataMode::Synthetic, None);
        Arc::new(RwLock::new(session))
    }

    async fn tick_of(session: &SharedSession) -> u64 {
        session.read().await.current_tick().unwrap_or_default()
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_interval() {
        let session = ready_session(None);
        let mut controller = PlaybackController::new(session.clone(), TickScheduler::new());

        controller.play().await.unwrap();
        tokio::time::sleep(Duration::from_millis(3500)).await;

        assert_eq!(tick_of(&session).await, 3);
        assert!(controller.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_single_loop() {
        let session = ready_session(None);
        session.write().await.start().unwrap();
        let mut scheduler = TickScheduler::new();

        scheduler.start(session.clone());
        scheduler.start(session.clone());
        tokio::time::sleep(Duration::from_millis(2500)).await;

        // Two loops would have produced four ticks
        assert_eq!(tick_of(&session).await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_ticks() {
        let session = ready_session(None);
        let mut controller = PlaybackController::new(session.clone(), TickScheduler::new());

        controller.play().await.unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        controller.pause().await.unwrap();
        tokio::time::sleep(Duration::from_millis(5000)).await;

        assert_eq!(tick_of(&session).await, 2);
        assert!(!controller.is_playing());
        assert_eq!(session.read().await.phase(), SessionPhase::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_change_applies_to_next_interval() {
        let session = ready_session(None);
        let mut controller = PlaybackController::new(session.clone(), TickScheduler::new());

        controller.play().await.unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(tick_of(&session).await, 1);

        // The 1000 ms sleep already in progress finishes at 2000 ms, then 100 ms per tick
        controller.set_speed(10).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1050)).await;
        assert_eq!(tick_of(&session).await, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_ends_with_series() {
        let session = ready_session(Some(3));
        let (tx, mut rx) = mpsc::channel(16);
        let mut controller = PlaybackController::new(session.clone(), TickScheduler::with_events(tx));

        controller.play().await.unwrap();
        controller.wait().await;

        let mut outcomes = Vec::new();
        while let Ok(outcome) = rx.try_recv() {
            outcomes.push(outcome);
        }
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes.last(), Some(&TickOutcome::Finished));
        assert_eq!(session.read().await.phase(), SessionPhase::Paused);
        assert!(!controller.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_stops_loop_and_clears_session() {
        let session = ready_session(None);
        let mut controller = PlaybackController::new(session.clone(), TickScheduler::new());

        controller.play().await.unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        controller.reset().await;
        tokio::time::sleep(Duration::from_millis(3000)).await;

        let guard = session.read().await;
        assert_eq!(guard.phase(), SessionPhase::Uninitialized);
        assert!(guard.prices().is_empty());
    }
}
