//! Uniform randomness sources
//!
//! Every random draw in the simulator goes through [`UniformSource`], so a run
//! can be replayed exactly from a seed or a scripted sample list.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform samples in `[0, 1)`
pub trait UniformSource: Send + Sync {
    /// Draw the next sample
    fn next_uniform(&mut self) -> f64;
}

/// `StdRng`-backed source
pub struct SeededUniform {
    rng: StdRng,
}

impl SeededUniform {
    /// Seeded source, reproducible across runs
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl UniformSource for SeededUniform {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of samples, wrapping around when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedUniform {
    samples: Vec<f64>,
    index: usize,
}

impl ScriptedUniform {
    /// Create a scripted source
    ///
    /// # Panics
    ///
    /// Panics unless at least one sample lies strictly inside `(0, 1)`.
    pub fn new(samples: Vec<f64>) -> Self {
        assert!(
            samples.iter().any(|u| *u > 0.0 && *u < 1.0),
            "scripted samples need at least one value in (0, 1)"
        );
        Self { samples, index: 0 }
    }
}

impl UniformSource for ScriptedUniform {
    fn next_uniform(&mut self) -> f64 {
        let sample = self.samples[self.index % self.samples.len()];
        self.index += 1;
        sample
    }
}
