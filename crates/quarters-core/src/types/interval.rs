//! Sampling intervals accepted by the price provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar sampling granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    /// 1 minute bars
    #[serde(rename = "1m")]
    Minute1,
    /// 2 minute bars
    #[serde(rename = "2m")]
    Minute2,
    /// 5 minute bars
    #[serde(rename = "5m")]
    Minute5,
    /// 15 minute bars
    #[serde(rename = "15m")]
    Minute15,
    /// 30 minute bars
    #[serde(rename = "30m")]
    Minute30,
    /// 60 minute bars
    #[serde(rename = "60m")]
    Minute60,
    /// 90 minute bars
    #[serde(rename = "90m")]
    Minute90,
    /// 1 hour bars
    #[serde(rename = "1h")]
    Hour1,
    /// Daily bars
    #[serde(rename = "1d")]
    Day1,
    /// 5 day bars
    #[serde(rename = "5d")]
    Day5,
    /// Weekly bars
    #[serde(rename = "1wk")]
    #[default]
    Week1,
    /// Monthly bars
    #[serde(rename = "1mo")]
    Month1,
    /// Quarterly bars
    #[serde(rename = "3mo")]
    Month3,
}

impl Interval {
    /// The provider's query string for this interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute2 => "2m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Minute60 => "60m",
            Interval::Minute90 => "90m",
            Interval::Hour1 => "1h",
            Interval::Day1 => "1d",
            Interval::Day5 => "5d",
            Interval::Week1 => "1wk",
            Interval::Month1 => "1mo",
            Interval::Month3 => "3mo",
        }
    }

    /// Check if this is an intraday interval.
    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            Interval::Minute1
                | Interval::Minute2
                | Interval::Minute5
                | Interval::Minute15
                | Interval::Minute30
                | Interval::Minute60
                | Interval::Minute90
                | Interval::Hour1
        )
    }

    /// Get all supported intervals.
    pub fn all() -> &'static [Interval] {
        &[
            Interval::Minute1,
            Interval::Minute2,
            Interval::Minute5,
            Interval::Minute15,
            Interval::Minute30,
            Interval::Minute60,
            Interval::Minute90,
            Interval::Hour1,
            Interval::Day1,
            Interval::Day5,
            Interval::Week1,
            Interval::Month1,
            Interval::Month3,
        ]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::all()
            .iter()
            .copied()
            .find(|interval| interval.as_str() == s.trim())
            .ok_or_else(|| {
                let supported: Vec<&str> = Interval::all().iter().map(|i| i.as_str()).collect();
                format!(
                    "Invalid interval: {} (supported: {})",
                    s,
                    supported.join(", ")
                )
            })
    }
}
