//! Transient volatility shocks
//!
//! A shock distorts the quoted price for a short wall-clock window. The stored
//! price series is never touched.

use super::UniformSource;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Maximum relative size of a shock
const MAX_SHOCK: f64 = 0.5;

/// Direction of a shock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShockKind {
    Spike,
    Crash,
}

impl ShockKind {
    /// Human-readable notice text
    pub fn message(&self) -> &'static str {
        match self {
            Self::Spike => "Volatility spike!",
            Self::Crash => "Volatility crash!",
        }
    }
}

/// An active shock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityShock {
    pub kind: ShockKind,
    /// Factor applied to the canonical price
    pub multiplier: f64,
    pub expires_at: Instant,
}

/// Rolls for shocks each tick and applies the active one to quotes
pub struct ShockOverlay {
    probability: f64,
    duration: Duration,
    source: Box<dyn UniformSource>,
    active: Option<VolatilityShock>,
}

impl ShockOverlay {
    /// Create an overlay firing with `probability` per tick for `duration`
    pub fn new(probability: f64, duration: Duration, source: Box<dyn UniformSource>) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            duration,
            source,
            active: None,
        }
    }

    /// Per-tick firing probability
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Roll for a new shock at `now`
    ///
    /// Returns the shock when one fires. A new shock replaces any active one.
    pub fn roll(&mut self, now: Instant) -> Option<VolatilityShock> {
        self.expire(now);

        if self.probability <= 0.0 || self.source.next_uniform() >= self.probability {
            return None;
        }

        let kind = if self.source.next_uniform() < 0.5 {
            ShockKind::Spike
        } else {
            ShockKind::Crash
        };
        let magnitude = self.source.next_uniform() * MAX_SHOCK;
        let multiplier = match kind {
            ShockKind::Spike => 1.0 + magnitude,
            ShockKind::Crash => 1.0 - magnitude,
        };

        let shock = VolatilityShock {
            kind,
            multiplier,
            expires_at: now + self.duration,
        };
        self.active = Some(shock);
        Some(shock)
    }

    /// The shock in effect at `now`, if any
    pub fn active(&self, now: Instant) -> Option<VolatilityShock> {
        self.active.filter(|shock| now < shock.expires_at)
    }

    /// Price shown to traders at `now`
    pub fn quote(&self, price: Decimal, now: Instant) -> Decimal {
        let Some(shock) = self.active(now) else {
            return price;
        };
        match Decimal::try_from(shock.multiplier) {
            Ok(multiplier) => (price * multiplier).round_dp(super::PRICE_DECIMALS),
            Err(_) => price,
        }
    }

    /// Drop any active shock
    pub fn clear(&mut self) {
        self.active = None;
    }

    fn expire(&mut self, now: Instant) {
        if self.active.is_some_and(|shock| now >= shock.expires_at) {
            self.active = None;
        }
    }
}
