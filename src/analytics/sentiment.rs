//! Market sentiment derived from generator parameters

use crate::price::GbmParams;
use serde::Serialize;
use std::fmt;

/// Sentiment bucket for a drift/volatility ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    VeryBearish,
    Bearish,
    SlightlyBearish,
    Neutral,
    SlightlyBullish,
    Bullish,
    VeryBullish,
}

impl Sentiment {
    pub fn from_score(score: f64) -> Self {
        if score <= -1.0 {
            Self::VeryBearish
        } else if score <= -0.3 {
            Self::Bearish
        } else if score < 0.0 {
            Self::SlightlyBearish
        } else if score < 0.05 {
            Self::Neutral
        } else if score < 0.2 {
            Self::SlightlyBullish
        } else if score < 0.5 {
            Self::Bullish
        } else {
            Self::VeryBullish
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::VeryBearish => "Very Bearish",
            Self::Bearish => "Bearish",
            Self::SlightlyBearish => "Slightly Bearish",
            Self::Neutral => "Neutral",
            Self::SlightlyBullish => "Slightly Bullish",
            Self::Bullish => "Bullish",
            Self::VeryBullish => "Very Bullish",
        };
        f.write_str(label)
    }
}

/// Sentiment reading with its score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketSentiment {
    /// drift / volatility, zero when volatility is zero
    pub score: f64,
    pub sentiment: Sentiment,
}

impl MarketSentiment {
    pub fn from_params(params: &GbmParams) -> Self {
        let score = if params.volatility == 0.0 {
            0.0
        } else {
            params.drift / params.volatility
        };
        Self {
            score,
            sentiment: Sentiment::from_score(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(Sentiment::from_score(-1.0), Sentiment::VeryBearish);
        assert_eq!(Sentiment::from_score(-0.3), Sentiment::Bearish);
        assert_eq!(Sentiment::from_score(-0.01), Sentiment::SlightlyBearish);
        assert_eq!(Sentiment::from_score(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(0.05), Sentiment::SlightlyBullish);
        assert_eq!(Sentiment::from_score(0.2), Sentiment::Bullish);
        assert_eq!(Sentiment::from_score(0.5), Sentiment::VeryBullish);
    }

    #[test]
    fn test_default_params_read_neutral() {
        let reading = MarketSentiment::from_params(&GbmParams::default());
        assert!((reading.score - 0.02).abs() < 1e-12);
        assert_eq!(reading.sentiment, Sentiment::Neutral);
        assert_eq!(reading.sentiment.to_string(), "Neutral");
    }

    #[test]
    fn test_zero_volatility_is_neutral() {
        let reading = MarketSentiment::from_params(&GbmParams::new(0.05, 0.0));
        assert_eq!(reading.score, 0.0);
        assert_eq!(reading.sentiment, Sentiment::Neutral);
    }
}
