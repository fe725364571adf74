//! CLI command implementations.

pub mod intervals;
pub mod run;
pub mod validate;
