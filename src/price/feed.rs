//! Tick-by-tick price playback

use super::{DataMode, GbmGenerator, GbmParams, PricePoint};

enum Source {
    /// Generated lazily, one point per tick
    Synthetic {
        generator: GbmGenerator,
        max_points: Option<usize>,
    },
    /// Loaded once, replayed by cursor
    Historical { points: Vec<PricePoint> },
}

/// Cursor over a session's price series
pub struct PriceFeed {
    source: Source,
    cursor: u64,
}

impl PriceFeed {
    /// Synthetic feed, unbounded when `max_points` is `None`
    pub fn synthetic(generator: GbmGenerator, max_points: Option<usize>) -> Self {
        Self {
            source: Source::Synthetic {
                generator,
                max_points,
            },
            cursor: 0,
        }
    }

    /// Feed replaying a loaded series
    pub fn historical(points: Vec<PricePoint>) -> Self {
        Self {
            source: Source::Historical { points },
            cursor: 0,
        }
    }

    pub fn mode(&self) -> DataMode {
        match self.source {
            Source::Synthetic { .. } => DataMode::Synthetic,
            Source::Historical { .. } => DataMode::Historical,
        }
    }

    /// Index of the next point to be produced
    pub fn position(&self) -> u64 {
        self.cursor
    }

    /// Total number of points, `None` for an unbounded synthetic feed
    pub fn len(&self) -> Option<usize> {
        match &self.source {
            Source::Synthetic { max_points, .. } => *max_points,
            Source::Historical { points } => Some(points.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// No more points will be produced
    pub fn is_exhausted(&self) -> bool {
        self.len()
            .is_some_and(|len| self.cursor >= len as u64)
    }

    /// Produce the next point and advance the cursor
    pub fn next_point(&mut self) -> Option<PricePoint> {
        if self.is_exhausted() {
            return None;
        }

        let point = match &mut self.source {
            Source::Synthetic { generator, .. } => {
                let price = if self.cursor == 0 {
                    generator.last_price()
                } else {
                    generator.next_price()
                };
                PricePoint::from_f64(self.cursor, price)?
            }
            Source::Historical { points } => *points.get(self.cursor as usize)?,
        };

        self.cursor += 1;
        Some(point)
    }

    /// Current generator parameters, synthetic feeds only
    pub fn params(&self) -> Option<GbmParams> {
        match &self.source {
            Source::Synthetic { generator, .. } => Some(generator.params()),
            Source::Historical { .. } => None,
        }
    }

    /// Change generator parameters for the next point
    ///
    /// Returns `false` for historical feeds, whose series is fixed.
    pub fn set_params(&mut self, params: GbmParams) -> bool {
        match &mut self.source {
            Source::Synthetic { generator, .. } => {
                generator.set_params(params);
                true
            }
            Source::Historical { .. } => false,
        }
    }
}
