//! Core types and traits for quarterly price analysis.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, PriceSeries, PriceTable)
//! - The period specification and its sampling interval
//! - Derived labels (CandleType, QuarterKey, PeriodSummary)
//! - The DataSource trait implemented by the loaders

pub mod types;
pub mod traits;
pub mod error;

pub use error::{QuartersError, QuartersResult};
pub use types::*;
pub use traits::*;
