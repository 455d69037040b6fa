//! Asynchronous historical loading

use super::{SessionError, SessionPhase, SharedSession};
use crate::price::{DataMode, PriceSource};

/// Switch `session` to historical mode for `ticker` and load its series
///
/// The session lock is not held during the fetch, so the session reports
/// `Loading` meanwhile. When the session was reset or switched to another
/// instrument before the fetch resolved, the result is discarded.
pub async fn load_historical(
    session: &SharedSession,
    source: &dyn PriceSource,
    ticker: &str,
) -> Result<SessionPhase, SessionError> {
    session
        .write()
        .await
        .select_mode(DataMode::Historical, Some(ticker.to_string()));

    let points = source.fetch_closes(ticker).await;

    let mut guard = session.write().await;
    let current = guard.phase() == SessionPhase::Loading
        && guard.mode() == Some(DataMode::Historical)
        && guard.ticker() == Some(ticker);
    if !current {
        tracing::debug!(ticker, "Discarding stale historical load");
        return Ok(guard.phase());
    }
    guard.finish_loading(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::price::PricePoint;
    use crate::session::Session;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    struct FixedSource(Vec<PricePoint>);

    #[async_trait]
    impl PriceSource for FixedSource {
        async fn fetch_closes(&self, _ticker: &str) -> Vec<PricePoint> {
            self.0.clone()
        }
    }

    fn shared() -> SharedSession {
        Arc::new(RwLock::new(Session::new(Config::default())))
    }

    #[tokio::test]
    async fn test_load_makes_session_ready() {
        let session = shared();
        let source = FixedSource(vec![
            PricePoint::new(0, dec!(100)),
            PricePoint::new(1, dec!(101)),
        ]);

        let phase = load_historical(&session, &source, "SPY").await.unwrap();
        assert_eq!(phase, SessionPhase::Ready);

        let guard = session.read().await;
        assert_eq!(guard.ticker(), Some("SPY"));
        assert_eq!(guard.current_tick(), Some(0));
    }

    #[tokio::test]
    async fn test_empty_source_stays_loading() {
        let session = shared();
        let phase = load_historical(&session, &FixedSource(Vec::new()), "NOPE")
            .await
            .unwrap();
        assert_eq!(phase, SessionPhase::Loading);
        assert!(session.read().await.prices().is_empty());
    }
}
