//! HemoVita CLI - micronutrient lab report engine.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            request,
            output,
            text,
            tables,
        } => commands::report::run(request, output, text, tables, cli.verbose),

        Commands::Markers { json, tables } => commands::markers::run(json, tables, cli.verbose),

        Commands::Serve { port, tables } => commands::serve::run(port, tables, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
