//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HemoVita: deterministic micronutrient lab report engine
#[derive(Parser)]
#[command(name = "hemovita")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a report from a JSON request file
    Report {
        /// Path to the request file (JSON with labs, patient, diet_filter)
        #[arg(value_name = "REQUEST")]
        request: PathBuf,

        /// Output path for the report JSON (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the narrative text instead of JSON
        #[arg(long)]
        text: bool,

        /// Directory of CSV rule tables overriding the built-ins
        #[arg(long, value_name = "DIR")]
        tables: Option<PathBuf>,
    },

    /// List the configured reference ranges
    Markers {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Directory of CSV rule tables overriding the built-ins
        #[arg(long, value_name = "DIR")]
        tables: Option<PathBuf>,
    },

    /// Run the report API server
    Serve {
        /// Port for the API server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Directory of CSV rule tables overriding the built-ins
        #[arg(long, value_name = "DIR")]
        tables: Option<PathBuf>,
    },
}
