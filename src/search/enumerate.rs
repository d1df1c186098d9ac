//! Exhaustive enumeration of one side's full turns.

use std::collections::HashSet;

use crate::{
    game::{GameState, MoveRequest},
    pieces::Color,
    rules,
    search::SearchConfig,
};

/// One reachable end-of-turn state and the steps that produced it.
#[derive(Debug, Clone)]
pub struct TurnOption {
    pub state: GameState,
    /// Human-readable step sequence, for diagnostics and reports.
    pub path: String,
}

/// Enumeration output with its duplicate tally.
#[derive(Debug, Clone)]
pub struct Enumeration {
    pub options: Vec<TurnOption>,
    /// Leaves discarded because an earlier path reached the same board.
    pub duplicates: usize,
}

/// Enumerate every end-of-turn position reachable by the side to move.
///
/// Candidate steps come from the legality rules and are applied through the
/// same validated submission path a human request takes. A branch ends when
/// the turn passes, the game ends, or the per-turn step cap is hit. Distinct
/// step orders that land on the same board collapse into one option, keyed
/// by the canonical board signature.
pub fn enumerate_turns(state: &GameState, config: &SearchConfig) -> Vec<TurnOption> {
    enumerate_turns_with_stats(state, config).options
}

/// Like [`enumerate_turns`], but also reports how many duplicate leaves were
/// discarded.
pub fn enumerate_turns_with_stats(state: &GameState, config: &SearchConfig) -> Enumeration {
    let mut enumeration = Enumeration {
        options: Vec::new(),
        duplicates: 0,
    };
    let mut seen: HashSet<String> = HashSet::new();
    expand(
        state,
        state.current_color(),
        String::new(),
        0,
        config,
        &mut seen,
        &mut enumeration,
    );
    enumeration
}

fn expand(
    state: &GameState,
    color: Color,
    path: String,
    depth: usize,
    config: &SearchConfig,
    seen: &mut HashSet<String>,
    enumeration: &mut Enumeration,
) {
    if state.is_over() || state.current_color() != color || depth >= config.sub_move_cap {
        emit(state, path, seen, enumeration);
        return;
    }

    let board = state.board();
    let can_displace = state.move_points_remaining() >= 2;

    for (from, _) in board.pieces_of(color) {
        for to in rules::simple_destinations(board, from) {
            let mut next = state.clone();
            next.submit(MoveRequest::simple(from, to))
                .expect("enumerated simple step should be legal");
            let step = format!("simple {from} -> {to}");
            expand(
                &next,
                color,
                join_path(&path, &step),
                depth + 1,
                config,
                seen,
                enumeration,
            );
        }

        if !can_displace {
            continue;
        }

        for victim in rules::push_victims(board, from) {
            let mut setup = state.clone();
            setup
                .submit(MoveRequest::pre_push(from, victim))
                .expect("enumerated push setup should be legal");
            for destination in setup.available_destinations().to_vec() {
                let mut next = setup.clone();
                next.submit(MoveRequest::push(destination.coord))
                    .expect("enumerated push completion should be legal");
                let step = format!("push {from} -> {victim} -> {}", destination.coord);
                expand(
                    &next,
                    color,
                    join_path(&path, &step),
                    depth + 1,
                    config,
                    seen,
                    enumeration,
                );
            }
        }

        for victim in rules::pull_victims(board, from) {
            let mut setup = state.clone();
            setup
                .submit(MoveRequest::pre_pull(from, victim))
                .expect("enumerated pull setup should be legal");
            for destination in setup.available_destinations().to_vec() {
                let mut next = setup.clone();
                next.submit(MoveRequest::pull(destination.coord))
                    .expect("enumerated pull completion should be legal");
                let step = format!("pull {from} -> {} dragging {victim}", destination.coord);
                expand(
                    &next,
                    color,
                    join_path(&path, &step),
                    depth + 1,
                    config,
                    seen,
                    enumeration,
                );
            }
        }
    }
}

fn emit(state: &GameState, path: String, seen: &mut HashSet<String>, enumeration: &mut Enumeration) {
    let key = state.canonical_key();
    if seen.insert(key) {
        enumeration.options.push(TurnOption {
            state: state.clone(),
            path,
        });
    } else {
        enumeration.duplicates += 1;
    }
}

fn join_path(path: &str, step: &str) -> String {
    if path.is_empty() {
        step.to_string()
    } else {
        format!("{path}, {step}")
    }
}
