//! Report command - generate a report from a JSON request file.

use std::path::PathBuf;

use colored::Colorize;
use hemovita::{Hemovita, HemovitaConfig, MarkerStatus, ReportRequest};

pub fn run(
    request_path: PathBuf,
    output: Option<PathBuf>,
    text: bool,
    tables: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&request_path)
        .map_err(|e| format!("Cannot read {}: {}", request_path.display(), e))?;
    let request: ReportRequest = serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid request in {}: {}", request_path.display(), e))?;

    let engine = build_engine(tables, verbose)?;

    if verbose {
        println!(
            "Classifying {} markers against {} reference ranges...",
            request.labs.len(),
            engine.reference().len()
        );
    }

    let report = engine.report(&request);

    if verbose {
        for (key, status) in &report.labels {
            let label = match status {
                MarkerStatus::Low => status.label().red().bold(),
                MarkerStatus::High => status.label().yellow().bold(),
                MarkerStatus::Normal => status.label().green(),
                MarkerStatus::Unknown => status.label().dimmed(),
            };
            println!("  {} {}", key.white(), label);
        }
        println!();
    }

    let rendered = if text {
        report.report_text.clone()
    } else {
        serde_json::to_string_pretty(&report)?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            println!("{} {}", "Report written to".cyan(), path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

pub(crate) fn build_engine(
    tables: Option<PathBuf>,
    verbose: bool,
) -> Result<Hemovita, Box<dyn std::error::Error>> {
    let config = match tables {
        Some(dir) => {
            if verbose {
                println!("Loading rule tables from {}", dir.display());
            }
            HemovitaConfig::from_csv_dir(&dir)?
        }
        None => HemovitaConfig::default(),
    };
    Ok(Hemovita::with_config(config))
}
