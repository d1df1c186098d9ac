//! Adversarial search: turn enumeration, static evaluation, and minimax.

pub mod enumerate;
pub mod heuristic;
pub mod minimax;

pub use enumerate::{enumerate_turns, enumerate_turns_with_stats, Enumeration, TurnOption};
pub use heuristic::evaluate;
pub use minimax::{
    build_tree, minimax, plan_turn, principal_line, LayerStats, NodeRole, SearchNode, SearchReport,
    TurnPlan,
};

/// Tunables for one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Full player turns explored before leaves are scored.
    pub turn_depth: usize,
    /// Hard cap on move steps explored inside a single turn. A turn spends
    /// at most four points, so the default of ten never binds.
    pub sub_move_cap: usize,
}

impl SearchConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        SearchConfig {
            turn_depth: 2,
            sub_move_cap: 10,
        }
    }

    /// Set the number of full turns to explore.
    pub fn with_turn_depth(mut self, turn_depth: usize) -> Self {
        self.turn_depth = turn_depth;
        self
    }

    /// Set the per-turn step cap.
    pub fn with_sub_move_cap(mut self, sub_move_cap: usize) -> Self {
        self.sub_move_cap = sub_move_cap;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
