//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Assay: structural and statistical profiling for tabular data
#[derive(Parser)]
#[command(name = "assay")]
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
    /// Profile decoded rows (a JSON array of row objects)
    Profile {
        /// Path to the decoded rows file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the full profile JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full profile as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Profiler configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Label to record as the originating file name (default: FILE's name)
        #[arg(long)]
        name: Option<String>,
    },
}
