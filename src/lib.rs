//! Arimaa rules engine and adversarial turn planner
//!
//! This crate provides:
//! - Complete board, piece, and move-validation model with push/pull exchanges
//! - Trap captures, freezing, and the three win conditions
//! - Full-turn enumeration with transposition filtering
//! - Heuristic evaluation and depth-bounded minimax over whole turns
//! - A session driver with pluggable observers for move and capture events

pub mod board;
pub mod cli;
pub mod error;
pub mod game;
pub mod pieces;
pub mod rules;
pub mod search;
pub mod session;
pub mod types;

pub use board::{Board, Cell};
pub use error::{Error, Result};
pub use game::{
    Capture, Destination, GameState, MoveKind, MoveOutcome, MovePhase, MoveRecord, MoveRequest,
    PlayerState, WinReason,
};
pub use pieces::{Color, Piece, PieceKind};
pub use search::{
    Enumeration, SearchConfig, SearchNode, SearchReport, TurnOption, TurnPlan, build_tree,
    enumerate_turns, enumerate_turns_with_stats, evaluate, minimax, plan_turn, principal_line,
};
pub use session::{GameObserver, PlayedTurn, Session};
pub use types::{BOARD_SIZE, Coord, Direction, MOVE_POINTS_PER_TURN, TRAP_SQUARES};
