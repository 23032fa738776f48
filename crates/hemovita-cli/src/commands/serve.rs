//! Serve command - run the report API server.

use std::path::PathBuf;

use colored::Colorize;

use crate::commands::report::build_engine;
use crate::server::{app, state::AppState};

pub fn run(
    port: u16,
    tables: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = build_engine(tables, verbose)?;
    let state = AppState::new(engine);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting report server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  POST /api/report   generate a report");
    println!("  GET  /api/markers  list reference ranges");
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::spawn(async {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        if let Err(e) = app::run_server(state, port).await {
            eprintln!("Server error: {}", e);
        }
    });

    Ok(())
}
