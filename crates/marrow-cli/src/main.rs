//! Marrow CLI - Command-line interface for rig files

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{inspect, validate};

#[derive(Parser)]
#[command(name = "marrow")]
#[command(about = "Inspect and validate rig files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a rig file's node hierarchy and constraint table
    Inspect {
        /// Path to rig file
        rig: String,

        /// Also list constraint entries per node
        #[arg(long)]
        constraints: bool,
    },

    /// Check a rig file's referential integrity
    Validate {
        /// Path to rig file
        rig: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { rig, constraints } => inspect::run(&rig, constraints),
        Commands::Validate { rig } => validate::run(&rig),
    }
}
