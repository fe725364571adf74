//! Core data types for the analysis pipeline.

mod bar;
mod candle;
mod interval;
mod period;
mod quarter;
mod table;

pub use bar::{Bar, PriceSeries};
pub use candle::CandleType;
pub use interval::Interval;
pub use period::PeriodSpec;
pub use quarter::{PeriodSummary, QuarterKey};
pub use table::{PriceTable, TableRow};
