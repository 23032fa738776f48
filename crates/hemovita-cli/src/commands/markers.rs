//! Markers command - list the configured reference ranges.

use std::path::PathBuf;

use colored::Colorize;

use crate::commands::report::build_engine;

pub fn run(
    json_output: bool,
    tables: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = build_engine(tables, verbose)?;
    let reference = engine.reference();

    if json_output {
        let markers: Vec<_> = reference.markers().collect();
        println!("{}", serde_json::to_string_pretty(&markers)?);
        return Ok(());
    }

    println!(
        "{} ({} markers)",
        "Configured reference ranges".cyan().bold(),
        reference.len()
    );
    println!();
    for marker in reference.markers() {
        println!(
            "  {:<16} {:>8} - {:<8} {} ({})",
            marker.key.white().bold(),
            marker.low,
            marker.high,
            marker.unit,
            marker.label
        );
    }

    Ok(())
}
