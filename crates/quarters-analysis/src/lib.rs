//! Candle classification and quarterly aggregation.
//!
//! Both stages consume a [`PriceTable`](quarters_core::PriceTable) and return
//! a new one with their columns filled in:
//! - [`classify`]: bullish/bearish label per bar
//! - [`aggregate`]: quarter key, period start/end, percentage change

mod aggregator;
mod classifier;

pub use aggregator::{aggregate, percentage_change, Aggregation};
pub use classifier::classify;
