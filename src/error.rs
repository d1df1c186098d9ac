//! Error types for the arimaa crate

use thiserror::Error;

use crate::{game::MoveKind, types::Coord};

/// Main error type for the arimaa crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("coordinate ({row}, {col}) is off the board (rows and columns run 0-7)")]
    InvalidCoordinate { row: usize, col: usize },

    #[error("no piece on square {at}")]
    EmptySquare { at: Coord },

    #[error("you can only move your own pieces (square {at} holds an enemy piece)")]
    OpponentPiece { at: Coord },

    #[error("the piece at {at} is frozen")]
    FrozenPiece { at: Coord },

    #[error("square {at} is already occupied")]
    OccupiedSquare { at: Coord },

    #[error("{to} is not a legal {kind} destination")]
    IllegalDestination { kind: MoveKind, to: Coord },

    #[error("a {kind} request must name an origin square")]
    MissingOrigin { kind: MoveKind },

    #[error("a displacement is in progress and must be completed or cancelled first")]
    DisplacementInProgress,

    #[error("no displacement is in progress")]
    NoDisplacementInProgress,

    #[error("not enough move points: need {required}, have {remaining}")]
    InsufficientMovePoints { required: u8, remaining: u8 },

    #[error("game already over")]
    GameOver,

    #[error("canonical board must have 8 rows, got {rows}")]
    InvalidBoardShape { rows: usize },

    #[error("row {row} of canonical board must have 8 cells, got {width}")]
    InvalidRowWidth { row: usize, width: usize },

    #[error("invalid cell character '{character}' at ({row}, {col})")]
    InvalidCellCharacter {
        character: char,
        row: usize,
        col: usize,
    },

    #[error("cell ({row}, {col}) contradicts the fixed trap layout")]
    TrapLayoutMismatch { row: usize, col: usize },

    #[error("search leaf was never scored for position:\n{key}")]
    MissingLeafValue { key: String },

    #[error("no turn options found for position:\n{key}")]
    NoChildNodes { key: String },

    #[error("no valid moves available")]
    NoLegalMoves,
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
