//! Error types for the analysis pipeline.

use thiserror::Error;

use crate::types::QuarterKey;

/// Top-level error.
#[derive(Error, Debug)]
pub enum QuartersError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Provider returned {code}: {description}")]
    Api { code: String, description: String },

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Timestamps out of order at row {index}: {timestamp}")]
    UnorderedTimestamps { index: usize, timestamp: String },

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Aggregation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Period {period} opens at zero, percentage change is undefined")]
    ZeroBaseline { period: QuarterKey },
}

/// Result type alias for pipeline operations.
pub type QuartersResult<T> = Result<T, QuartersError>;
