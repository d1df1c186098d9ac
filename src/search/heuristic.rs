//! Static position evaluation.

use crate::{
    board::Board,
    game::GameState,
    pieces::{Color, Piece, PieceKind},
    rules,
    types::Coord,
};

const CENTER_BONUS: f64 = 0.5;
const MOBILITY_BONUS: f64 = 0.5;
const RABBIT_ADVANCE_STEP: f64 = 0.1;
const TRAP_DANGER_PENALTY: f64 = 0.5;

/// Score a position from `perspective`'s point of view: the sum of that
/// side's piece scores minus the opponent's. Symmetric, so
/// `evaluate(s, Gold) == -evaluate(s, Silver)`.
pub fn evaluate(state: &GameState, perspective: Color) -> f64 {
    let board = state.board();
    let mut score = 0.0;
    for (at, piece) in board.pieces() {
        let value = piece_score(board, at, piece);
        if piece.color == perspective {
            score += value;
        } else {
            score -= value;
        }
    }
    score
}

/// One piece's contribution: squared rank, a mobility term, a center bonus,
/// goal progress for rabbits, and a penalty for standing beside an
/// undefended trap.
fn piece_score(board: &Board, at: Coord, piece: Piece) -> f64 {
    let rank = f64::from(piece.rank());
    let mut score = rank * rank;

    if rules::is_immobilized(board, at) {
        score -= MOBILITY_BONUS;
    } else {
        score += MOBILITY_BONUS;
    }

    if (2..=5).contains(&at.row()) && (2..=5).contains(&at.col()) {
        score += CENTER_BONUS;
    }

    if piece.kind == PieceKind::Rabbit {
        let distance = piece.color.goal_row().abs_diff(at.row());
        score += (7 - distance) as f64 * RABBIT_ADVANCE_STEP;
    }

    if beside_undefended_trap(board, at, piece) {
        score -= TRAP_DANGER_PENALTY;
    }

    score
}

/// Whether the piece stands next to a trap square that no other friendly
/// piece occupies or borders. The piece itself does not count as defense:
/// stepping onto such a trap would be fatal.
fn beside_undefended_trap(board: &Board, at: Coord, piece: Piece) -> bool {
    at.neighbors().filter(|square| square.is_trap()).any(|trap| {
        let occupant_defends = board
            .piece_at(trap)
            .is_some_and(|other| other.color == piece.color);
        let neighbor_defends = trap.neighbors().any(|square| {
            square != at
                && board
                    .piece_at(square)
                    .is_some_and(|other| other.color == piece.color)
        });
        !occupant_defends && !neighbor_defends
    })
}
