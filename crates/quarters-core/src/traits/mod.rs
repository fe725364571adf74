//! Core traits for the analysis pipeline.

mod data_source;

pub use data_source::DataSource;
