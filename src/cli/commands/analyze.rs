//! Analyze command - search a position and report statistics

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    board::Board,
    cli::{
        config::{SetupChoice, SideChoice},
        output::{create_spinner, format_number, print_kv, print_section, print_subsection},
    },
    game::{GameState, MoveRequest},
    pieces::Color,
    search::{evaluate, plan_turn, SearchConfig, SearchReport},
};

#[derive(Parser, Debug)]
#[command(about = "Search a position and report statistics")]
pub struct AnalyzeArgs {
    /// Canonical position file; overrides --setup
    #[arg(long)]
    pub position: Option<PathBuf>,

    /// Built-in starting position
    #[arg(long, value_enum, default_value_t = SetupChoice::Full)]
    pub setup: SetupChoice,

    /// Side to move
    #[arg(long, value_enum, default_value_t = SideChoice::Gold)]
    pub side: SideChoice,

    /// Search depth in full turns
    #[arg(long, short = 'd', default_value_t = 2)]
    pub depth: usize,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Export per-layer search statistics to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct AnalysisReport {
    to_move: Color,
    score_gold: f64,
    score_silver: f64,
    chosen_score: f64,
    chosen_steps: Vec<MoveRequest>,
    predicted_line: Vec<String>,
    search: SearchReport,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let state = load_state(&args)?;
    let config = SearchConfig::new().with_turn_depth(args.depth);

    let spinner = create_spinner(&format!("searching {} turns deep...", args.depth));
    let plan = plan_turn(&state, &config)?;
    spinner.finish_and_clear();

    let report = AnalysisReport {
        to_move: state.current_color(),
        score_gold: evaluate(&state, Color::Gold),
        score_silver: evaluate(&state, Color::Silver),
        chosen_score: plan.score,
        chosen_steps: plan.requests.clone(),
        predicted_line: plan.line.clone(),
        search: plan.report.clone(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(&state, &report);
    }

    if let Some(path) = &args.export {
        export_layer_stats(&report.search, path)?;
        println!("Search statistics exported to: {}", path.display());
    }

    Ok(())
}

fn load_state(args: &AnalyzeArgs) -> Result<GameState> {
    let board = match &args.position {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|error| anyhow!("failed to read {}: {error}", path.display()))?;
            Board::from_canonical(&text)?
        }
        None => args.setup.build().board().clone(),
    };
    Ok(GameState::from_board(board, args.side.color()))
}

fn print_text_report(state: &GameState, report: &AnalysisReport) {
    print_section("Position analysis");
    println!("\n{}", state.board());
    print_kv("to move", &report.to_move.to_string());
    print_kv("static score (gold)", &format!("{:.2}", report.score_gold));
    print_kv(
        "static score (silver)",
        &format!("{:.2}", report.score_silver),
    );

    print_subsection("Best turn");
    print_kv("backed-up score", &format!("{:.2}", report.chosen_score));
    for (index, step) in report.predicted_line.iter().enumerate() {
        let owner = if index == 0 { "own" } else { "predicted" };
        print_kv(&format!("turn {} ({owner})", index + 1), step);
    }

    print_subsection("Search statistics");
    for layer in &report.search.layers {
        print_kv(
            &format!("layer {}", layer.depth),
            &format!(
                "{} options, {} transpositions discarded",
                format_number(layer.nodes),
                format_number(layer.duplicates)
            ),
        );
    }
    print_kv(
        "total options",
        &format_number(report.search.total_nodes()),
    );
    print_kv(
        "leaves scored",
        &format_number(report.search.leaves_scored),
    );
}

/// Export per-layer statistics to CSV
fn export_layer_stats(search: &SearchReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["layer", "options", "duplicates"])?;
    for layer in &search.layers {
        writer.write_record([
            layer.depth.to_string(),
            layer.nodes.to_string(),
            layer.duplicates.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
