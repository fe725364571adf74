//! Candle classification labels.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Bar;

/// Direction of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandleType {
    Bullish,
    Bearish,
}

impl CandleType {
    /// Bullish iff open < close. A flat bar counts as bearish.
    pub fn of(bar: &Bar) -> Self {
        if bar.is_bullish() {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CandleType::Bullish => "bullish",
            CandleType::Bearish => "bearish",
        }
    }
}

impl fmt::Display for CandleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
