//! Price series types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimal places kept on stored prices
pub const PRICE_DECIMALS: u32 = 4;

/// One observation of the simulated instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Tick index, 0-based
    pub time: u64,
    /// Price at this tick, always positive
    pub price: Decimal,
}

impl PricePoint {
    /// Create a point from a decimal price
    pub fn new(time: u64, price: Decimal) -> Self {
        Self { time, price }
    }

    /// Create a point from a raw float price
    ///
    /// Returns `None` for non-finite or non-positive input.
    pub fn from_f64(time: u64, price: f64) -> Option<Self> {
        if !price.is_finite() || price <= 0.0 {
            return None;
        }
        let price = Decimal::try_from(price).ok()?.round_dp(PRICE_DECIMALS);
        if price <= Decimal::ZERO {
            return None;
        }
        Some(Self { time, price })
    }
}

/// Where a session's prices come from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// Geometric Brownian motion generated on the fly
    Synthetic,
    /// Closing prices replayed from a CSV file
    Historical,
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synthetic => write!(f, "synthetic"),
            Self::Historical => write!(f, "historical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_f64_rounds_to_price_decimals() {
        let point = PricePoint::from_f64(3, 101.234_567_8).unwrap();
        assert_eq!(point.time, 3);
        assert_eq!(point.price, dec!(101.2346));
    }

    #[test]
    fn test_from_f64_rejects_degenerate_prices() {
        assert!(PricePoint::from_f64(0, 0.0).is_none());
        assert!(PricePoint::from_f64(0, -4.0).is_none());
        assert!(PricePoint::from_f64(0, f64::NAN).is_none());
        assert!(PricePoint::from_f64(0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_data_mode_display() {
        assert_eq!(DataMode::Synthetic.to_string(), "synthetic");
        assert_eq!(DataMode::Historical.to_string(), "historical");
    }
}
