//! Simple moving averages

use crate::price::PricePoint;
use rust_decimal::Decimal;

/// Mean of the last `window` prices
///
/// `None` when fewer than `window` points exist or `window` is zero.
pub fn simple_moving_average(points: &[PricePoint], window: usize) -> Option<Decimal> {
    if window == 0 || points.len() < window {
        return None;
    }
    let sum: Decimal = points[points.len() - window..]
        .iter()
        .map(|p| p.price)
        .sum();
    Some(sum / Decimal::from(window))
}

/// Trailing SMA at every index, `None` during warmup
pub fn sma_series(points: &[PricePoint], window: usize) -> Vec<Option<Decimal>> {
    (1..=points.len())
        .map(|end| simple_moving_average(&points[..end], window))
        .collect()
}
