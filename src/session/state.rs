//! Session lifecycle types

use crate::config::ConfigError;
use crate::portfolio::TradeRejected;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Lifecycle phase of a session
///
/// `Uninitialized -> Loading -> Ready -> Running <-> Paused`, and any phase
/// back to `Uninitialized` on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No mode chosen
    Uninitialized,
    /// Waiting for the price series
    Loading,
    /// First price processed, playback not started
    Ready,
    /// Tick loop active
    Running,
    /// Tick loop stopped, state kept
    Paused,
}

impl SessionPhase {
    /// A current price exists and trades can be placed
    pub fn has_price(&self) -> bool {
        matches!(self, Self::Ready | Self::Running | Self::Paused)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// Session errors; the session is unchanged when one is returned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Action not allowed in the current phase
    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },
    /// Finite series already fully played
    #[error("Price series finished")]
    SeriesFinished,
    /// Action only exists for generated prices
    #[error("{0} is only available in synthetic mode")]
    SyntheticOnly(&'static str),
    /// Drift or volatility out of range
    #[error(transparent)]
    InvalidParams(#[from] ConfigError),
    /// Zero ticks per second
    #[error("Speed must be at least 1 tick per second")]
    InvalidSpeed,
    /// Trade refused by the portfolio
    #[error(transparent)]
    Trade(#[from] TradeRejected),
}
