//! List intervals command.

use anyhow::Result;
use quarters_core::types::Interval;

pub async fn run() -> Result<()> {
    println!("Supported Intervals");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for interval in Interval::all() {
        let kind = if interval.is_intraday() {
            "intraday"
        } else {
            "daily or longer"
        };
        println!("  {:<5} {}", interval, kind);
    }

    println!();
    println!("Use --interval <value> with the run command.");

    Ok(())
}
