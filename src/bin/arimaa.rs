//! Arimaa CLI - rules engine, self-play driver, and position analysis
//!
//! This CLI provides a unified interface for:
//! - Running engine-vs-engine games with the minimax planner
//! - Analyzing positions and reporting search statistics

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arimaa")]
#[command(version, about = "Arimaa rules engine and turn planner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an engine-vs-engine game
    Play(arimaa::cli::commands::play::PlayArgs),

    /// Search a position and report statistics
    Analyze(arimaa::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => arimaa::cli::commands::play::execute(args),
        Commands::Analyze(args) => arimaa::cli::commands::analyze::execute(args),
    }
}
