//! Stateless legality rules: freezing, simple steps, and push/pull eligibility.
//!
//! Everything here reads a [`Board`] and answers questions; state transitions
//! live in [`crate::game`].

use crate::{
    board::Board,
    pieces::{Color, PieceKind},
    types::{Coord, Direction},
};

/// Whether the piece at `at` is frozen: at least one adjacent enemy of equal
/// or greater rank, and no adjacent friendly piece. An empty square is never
/// frozen.
pub fn is_frozen(board: &Board, at: Coord) -> bool {
    let piece = match board.piece_at(at) {
        Some(piece) => piece,
        None => return false,
    };

    let mut outweighed = false;
    for neighbor in at.neighbors() {
        if let Some(other) = board.piece_at(neighbor) {
            if other.color == piece.color {
                // A friendly neighbor unfreezes regardless of enemies.
                return false;
            }
            if other.rank() >= piece.rank() {
                outweighed = true;
            }
        }
    }
    outweighed
}

/// Legal single-step destinations for the piece at `from`: adjacent
/// unoccupied squares, minus the retreat direction for rabbits. Empty when
/// the piece is frozen or the square is empty.
pub fn simple_destinations(board: &Board, from: Coord) -> Vec<Coord> {
    let piece = match board.piece_at(from) {
        Some(piece) => piece,
        None => return Vec::new(),
    };
    if is_frozen(board, from) {
        return Vec::new();
    }

    let mut out = Vec::new();
    for direction in Direction::ALL {
        if piece.kind == PieceKind::Rabbit && direction == retreat_direction(piece.color) {
            continue;
        }
        if let Some(to) = from.step(direction) {
            if board.is_unoccupied(to) {
                out.push(to);
            }
        }
    }
    out
}

/// The direction a rabbit of `color` may never step: back toward its home row.
fn retreat_direction(color: Color) -> Direction {
    match color {
        Color::Gold => Direction::South,
        Color::Silver => Direction::North,
    }
}

/// Squares holding enemies the piece at `actor` could push: adjacent,
/// strictly weaker, and with at least one unoccupied neighbor to be pushed
/// into. Empty when the actor is frozen.
pub fn push_victims(board: &Board, actor: Coord) -> Vec<Coord> {
    let piece = match board.piece_at(actor) {
        Some(piece) => piece,
        None => return Vec::new(),
    };
    if is_frozen(board, actor) {
        return Vec::new();
    }

    let mut out = Vec::new();
    for neighbor in actor.neighbors() {
        if let Some(other) = board.piece_at(neighbor) {
            if other.color != piece.color
                && piece.outranks(&other)
                && neighbor.neighbors().any(|square| board.is_unoccupied(square))
            {
                out.push(neighbor);
            }
        }
    }
    out
}

/// Squares holding enemies the piece at `actor` could pull: adjacent and
/// strictly weaker. The actor itself must have somewhere to step, since its
/// vacated square is where the victim lands. Empty when the actor is frozen.
pub fn pull_victims(board: &Board, actor: Coord) -> Vec<Coord> {
    let piece = match board.piece_at(actor) {
        Some(piece) => piece,
        None => return Vec::new(),
    };
    if is_frozen(board, actor) || simple_destinations(board, actor).is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    for neighbor in actor.neighbors() {
        if let Some(other) = board.piece_at(neighbor) {
            if other.color != piece.color && piece.outranks(&other) {
                out.push(neighbor);
            }
        }
    }
    out
}

/// Landing squares for a piece displaced from `origin`: any unoccupied
/// neighbor. Freeze and rabbit-retreat rules do not apply mid-displacement.
pub fn float_destinations(board: &Board, origin: Coord) -> Vec<Coord> {
    origin
        .neighbors()
        .filter(|&neighbor| board.is_unoccupied(neighbor))
        .collect()
}

/// Whether the piece at `at` has no action at all: frozen, or nothing to
/// step into, push, or pull.
pub fn is_immobilized(board: &Board, at: Coord) -> bool {
    is_frozen(board, at)
        || (simple_destinations(board, at).is_empty()
            && push_victims(board, at).is_empty()
            && pull_victims(board, at).is_empty())
}

/// Whether every piece of `color` is immobilized. False for a side with no
/// pieces left; that side has already lost by elimination.
pub fn side_immobilized(board: &Board, color: Color) -> bool {
    let pieces = board.pieces_of(color);
    !pieces.is_empty() && pieces.iter().all(|&(at, _)| is_immobilized(board, at))
}
