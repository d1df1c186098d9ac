//! Play command - run an engine-vs-engine game

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        config::SetupChoice,
        output::{create_turn_progress, print_kv, print_section},
    },
    game::MoveRecord,
    search::SearchConfig,
    session::Session,
};

#[derive(Parser, Debug)]
#[command(about = "Run an engine-vs-engine game")]
pub struct PlayArgs {
    /// Starting position
    #[arg(long, value_enum, default_value_t = SetupChoice::Full)]
    pub setup: SetupChoice,

    /// Search depth in full turns
    #[arg(long, short = 'd', default_value_t = 2)]
    pub depth: usize,

    /// Random seed for the fallback agent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many full turns
    #[arg(long, default_value_t = 40)]
    pub max_turns: usize,

    /// Print every applied step
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Export the move log to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = SearchConfig::new().with_turn_depth(args.depth);
    let mut session = Session::new(args.setup.build(), config);
    if let Some(seed) = args.seed {
        session = session.with_seed(seed);
    }

    print_section("Engine self-play");
    print_kv("setup", &args.setup.to_string());
    print_kv("depth", &args.depth.to_string());
    print_kv("max turns", &args.max_turns.to_string());
    println!();

    let progress = create_turn_progress(args.max_turns as u64);
    let mut turns_played = 0;
    while !session.state().is_over() && turns_played < args.max_turns {
        let mover = session.state().current_color();
        progress.set_message(mover.to_string());

        let played = session.play_ai_turn()?;
        if let Some(reason) = &played.fallback {
            progress.println(format!("search defect for {mover}: {reason}; played a random step"));
        }
        if args.verbose {
            for outcome in &played.outcomes {
                progress.println(format!("  {mover}: {}", outcome.record));
                for capture in &outcome.captures {
                    progress.println(format!("    captured {} at {}", capture.piece, capture.at));
                }
            }
        }

        // A fallback step may leave the same side to move; only a completed
        // turn advances the counter.
        if session.state().current_color() != mover || session.state().is_over() {
            turns_played += 1;
            progress.inc(1);
        }
    }
    progress.finish_and_clear();

    print_section("Result");
    match session.state().outcome() {
        Some((winner, reason)) => print_kv("winner", &format!("{winner} (by {reason})")),
        None => print_kv("result", &format!("no winner after {turns_played} turns")),
    }
    print_kv("steps played", &session.state().history().len().to_string());
    println!("\n{}", session.state().board());

    if let Some(path) = &args.export {
        export_move_log(session.state().history(), path)?;
        println!("Move log exported to: {}", path.display());
    }

    Ok(())
}

/// Export the applied steps to CSV
fn export_move_log(history: &[MoveRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["step", "color", "kind", "from", "to", "points_after"])?;
    for (step, record) in history.iter().enumerate() {
        writer.write_record([
            step.to_string(),
            record.acting_color.to_string(),
            record.kind.to_string(),
            record
                .from
                .map(|coord| coord.to_string())
                .unwrap_or_default(),
            record.to.to_string(),
            record.move_points_after.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
