//! Geometric Brownian motion price generator
//!
//! Discretized GBM with one Box-Muller shock per step:
//! P(t+1) = P(t) * exp((mu - 0.5*sigma^2) + sigma*z), z ~ N(0, 1)

use super::{PricePoint, UniformSource};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Lowest price the generator will produce
pub const PRICE_FLOOR: f64 = 0.01;

/// Highest price the generator will produce, keeps decimal bookkeeping in range
pub const PRICE_CEILING: f64 = 1.0e12;

/// Per-tick drift and volatility of the log-return process
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GbmParams {
    /// Expected per-tick log-return
    pub drift: f64,
    /// Per-tick standard deviation of log-returns
    pub volatility: f64,
}

impl GbmParams {
    pub fn new(drift: f64, volatility: f64) -> Self {
        Self { drift, volatility }
    }

    /// Multiplicative step for a standard normal shock `z`
    pub fn step_factor(&self, z: f64) -> f64 {
        let sigma = self.volatility;
        ((self.drift - 0.5 * sigma * sigma) + sigma * z).exp()
    }
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            drift: 0.0002,
            volatility: 0.01,
        }
    }
}

/// Standard normal sampler using the Box-Muller transform
pub struct NormalSampler {
    source: Box<dyn UniformSource>,
}

impl NormalSampler {
    pub fn new(source: Box<dyn UniformSource>) -> Self {
        Self { source }
    }

    /// Draw one standard normal sample
    pub fn sample(&mut self) -> f64 {
        let u1 = self.nonzero_uniform();
        let u2 = self.nonzero_uniform();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    // ln(0) is undefined, redraw exact zeros
    fn nonzero_uniform(&mut self) -> f64 {
        loop {
            let u = self.source.next_uniform();
            if u != 0.0 {
                return u;
            }
        }
    }
}

/// Synthetic price generator
pub struct GbmGenerator {
    sampler: NormalSampler,
    params: GbmParams,
    last_price: f64,
}

impl GbmGenerator {
    /// Create a generator starting at `initial_price`
    pub fn new(initial_price: f64, params: GbmParams, source: Box<dyn UniformSource>) -> Self {
        Self {
            sampler: NormalSampler::new(source),
            params,
            last_price: initial_price.clamp(PRICE_FLOOR, PRICE_CEILING),
        }
    }

    /// Current drift and volatility
    pub fn params(&self) -> GbmParams {
        self.params
    }

    /// Replace drift and volatility; applies from the next generated price
    pub fn set_params(&mut self, params: GbmParams) {
        self.params = params;
    }

    /// Most recently generated price (the initial price before any step)
    pub fn last_price(&self) -> f64 {
        self.last_price
    }

    /// Advance one step and return the new price
    pub fn next_price(&mut self) -> f64 {
        let z = self.sampler.sample();
        let factor = self.params.step_factor(z);
        let next = self.last_price * factor;
        self.last_price = if next.is_finite() {
            next.clamp(PRICE_FLOOR, PRICE_CEILING)
        } else {
            PRICE_CEILING
        };
        self.last_price
    }

    /// Generate `count` points: the current price at tick 0, then `count - 1` steps
    pub fn generate(&mut self, count: usize) -> Vec<PricePoint> {
        let mut points = Vec::with_capacity(count);
        for time in 0..count as u64 {
            let price = if time == 0 {
                self.last_price
            } else {
                self.next_price()
            };
            if let Some(point) = PricePoint::from_f64(time, price) {
                points.push(point);
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::{ScriptedUniform, SeededUniform};

    fn seeded(seed: u64) -> Box<dyn UniformSource> {
        Box::new(SeededUniform::from_seed(seed))
    }

    #[test]
    fn test_zero_drift_zero_volatility_is_flat() {
        let mut generator = GbmGenerator::new(100.0, GbmParams::new(0.0, 0.0), seeded(7));
        let points = generator.generate(50);

        assert_eq!(points.len(), 50);
        for pair in points.windows(2) {
            assert_eq!(pair[0].price, pair[1].price);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let params = GbmParams::new(0.0002, 0.02);
        let a = GbmGenerator::new(100.0, params, seeded(42)).generate(200);
        let b = GbmGenerator::new(100.0, params, seeded(42)).generate(200);
        let c = GbmGenerator::new(100.0, params, seeded(43)).generate(200);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_box_muller_matches_closed_form() {
        // u1 = e^-2 gives sqrt(4) = 2, u2 = 0.5 gives cos(pi) = -1
        let source = ScriptedUniform::new(vec![(-2.0f64).exp(), 0.5]);
        let mut sampler = NormalSampler::new(Box::new(source));
        assert!((sampler.sample() + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_uniform_draws_are_redrawn() {
        let source = ScriptedUniform::new(vec![0.0, (-2.0f64).exp(), 0.0, 0.25]);
        let mut sampler = NormalSampler::new(Box::new(source));
        // cos(pi / 2) is zero up to rounding
        assert!(sampler.sample().abs() < 1e-12);
    }

    #[test]
    fn test_price_is_floored() {
        // Huge negative drift would push the price to zero
        let mut generator = GbmGenerator::new(1.0, GbmParams::new(-50.0, 0.0), seeded(1));
        assert_eq!(generator.next_price(), PRICE_FLOOR);
        assert_eq!(generator.next_price(), PRICE_FLOOR);
    }

    #[test]
    fn test_params_change_applies_to_next_step_only() {
        let mut generator = GbmGenerator::new(100.0, GbmParams::new(0.0, 0.0), seeded(3));
        let history = generator.generate(5);
        assert!(history.iter().all(|p| p.price == history[0].price));

        generator.set_params(GbmParams::new(0.01, 0.0));
        let next = generator.next_price();

        assert!((next - 100.0 * 0.01f64.exp()).abs() < 1e-9);
        assert_eq!(generator.params().drift, 0.01);
        // Earlier points are untouched
        assert!(history.iter().all(|p| p.price == history[0].price));
    }

    #[test]
    fn test_step_factor_removes_ito_correction() {
        let params = GbmParams::new(0.0, 0.1);
        assert!((params.step_factor(0.0) - (-0.005f64).exp()).abs() < 1e-12);
    }
}
