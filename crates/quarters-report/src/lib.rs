//! Reporting: logging setup, table dumps and the terminal pie chart.

mod chart;
mod dump;
mod logging;

pub use chart::{slice_label, PieChart, PieSlice};
pub use dump::{format_rows, log_table, HEAD_ROWS, TAIL_ROWS};
pub use logging::{setup_logging, LogFormat};
