//! Bounded minimax over enumerated full turns.

use serde::{Deserialize, Serialize};

use crate::{
    game::{GameState, MoveRequest},
    pieces::Color,
    search::{enumerate::enumerate_turns_with_stats, heuristic::evaluate, SearchConfig},
    Error, Result,
};

/// Whether a node picks the maximum or minimum of its children's values.
/// The root belongs to the searching side and maximizes; roles alternate
/// with each layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    Max,
    Min,
}

impl NodeRole {
    fn flip(self) -> NodeRole {
        match self {
            NodeRole::Max => NodeRole::Min,
            NodeRole::Min => NodeRole::Max,
        }
    }
}

/// One node of the search tree. Each node owns an independent clone of the
/// game state it represents.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub role: NodeRole,
    pub state: GameState,
    /// Leaf score, or the backed-up value once [`minimax`] has run.
    pub value: Option<f64>,
    pub children: Vec<SearchNode>,
    /// Canonical board signature, used in defect reports.
    pub canonical_key: String,
    /// Step labels of the turn that produced this node; empty at the root.
    pub path: String,
    /// Index of the chosen child once [`minimax`] has run.
    pub best: Option<usize>,
}

/// Node and duplicate tallies for one tree layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStats {
    /// Distance from the root, in full turns.
    pub depth: usize,
    /// Options kept at this layer.
    pub nodes: usize,
    /// Leaves discarded as transpositions of a kept option.
    pub duplicates: usize,
}

/// Construction statistics for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub layers: Vec<LayerStats>,
    /// Leaves handed to the static evaluator.
    pub leaves_scored: usize,
}

impl SearchReport {
    /// Total options kept across all layers.
    pub fn total_nodes(&self) -> usize {
        self.layers.iter().map(|layer| layer.nodes).sum()
    }

    /// Total transpositions discarded across all layers.
    pub fn total_duplicates(&self) -> usize {
        self.layers.iter().map(|layer| layer.duplicates).sum()
    }

    fn record(&mut self, depth: usize, nodes: usize, duplicates: usize) {
        match self.layers.iter_mut().find(|layer| layer.depth == depth) {
            Some(layer) => {
                layer.nodes += nodes;
                layer.duplicates += duplicates;
            }
            None => self.layers.push(LayerStats {
                depth,
                nodes,
                duplicates,
            }),
        }
    }
}

/// The chosen turn: replayable requests, the predicted line, and the score.
#[derive(Debug, Clone)]
pub struct TurnPlan {
    /// The searching side's own steps, ready to submit in order.
    pub requests: Vec<MoveRequest>,
    /// Backed-up value of the chosen turn.
    pub score: f64,
    /// Step labels along the principal line, one entry per turn.
    pub line: Vec<String>,
    pub report: SearchReport,
}

/// Build the alternating tree down to `config.turn_depth` full turns.
///
/// Leaves are scored immediately with the static evaluator, from the
/// perspective of the side to move at the root. A branch whose game has
/// ended becomes a leaf regardless of remaining depth.
///
/// # Errors
///
/// Returns [`Error::NoChildNodes`] if any unfinished position inside the
/// horizon offers no turn options at all.
pub fn build_tree(state: &GameState, config: &SearchConfig) -> Result<(SearchNode, SearchReport)> {
    let perspective = state.current_color();
    let mut report = SearchReport::default();
    let root = grow(
        state.clone(),
        NodeRole::Max,
        String::new(),
        0,
        perspective,
        config,
        &mut report,
    )?;
    Ok((root, report))
}

fn grow(
    state: GameState,
    role: NodeRole,
    path: String,
    depth: usize,
    perspective: Color,
    config: &SearchConfig,
    report: &mut SearchReport,
) -> Result<SearchNode> {
    let canonical_key = state.canonical_key();
    if state.is_over() || depth == config.turn_depth {
        let value = evaluate(&state, perspective);
        report.leaves_scored += 1;
        return Ok(SearchNode {
            role,
            state,
            value: Some(value),
            children: Vec::new(),
            canonical_key,
            path,
            best: None,
        });
    }

    let enumeration = enumerate_turns_with_stats(&state, config);
    report.record(depth, enumeration.options.len(), enumeration.duplicates);
    if enumeration.options.is_empty() {
        return Err(Error::NoChildNodes { key: canonical_key });
    }

    let mut children = Vec::with_capacity(enumeration.options.len());
    for option in enumeration.options {
        children.push(grow(
            option.state,
            role.flip(),
            option.path,
            depth + 1,
            perspective,
            config,
            report,
        )?);
    }

    Ok(SearchNode {
        role,
        state,
        value: None,
        children,
        canonical_key,
        path,
        best: None,
    })
}

/// Back values up the tree in place and mark each interior node's chosen
/// child. Returns the root's backed-up value.
///
/// # Errors
///
/// Returns [`Error::MissingLeafValue`] if a childless node carries no score.
pub fn minimax(node: &mut SearchNode) -> Result<f64> {
    if node.children.is_empty() {
        return match node.value {
            Some(value) => Ok(value),
            None => Err(Error::MissingLeafValue {
                key: node.canonical_key.clone(),
            }),
        };
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, child) in node.children.iter_mut().enumerate() {
        let value = minimax(child)?;
        let better = match best {
            None => true,
            Some((_, incumbent)) => match node.role {
                NodeRole::Max => value > incumbent,
                NodeRole::Min => value < incumbent,
            },
        };
        if better {
            best = Some((index, value));
        }
    }

    let (index, value) = match best {
        Some(pair) => pair,
        None => {
            return Err(Error::NoChildNodes {
                key: node.canonical_key.clone(),
            })
        }
    };
    node.best = Some(index);
    node.value = Some(value);
    Ok(value)
}

/// Walk the chosen children from the root down to the deciding leaf. The
/// root itself is not included.
pub fn principal_line(root: &SearchNode) -> Vec<&SearchNode> {
    let mut line = Vec::new();
    let mut node = root;
    while let Some(index) = node.best {
        node = &node.children[index];
        line.push(node);
    }
    line
}

/// Search from `state` and extract the best full turn for the side to move.
///
/// Only the first turn of the principal line comes back as replayable
/// requests; deeper turns belong to the opponent and are predictions, never
/// to be applied.
///
/// # Errors
///
/// Propagates [`Error::NoChildNodes`] and [`Error::MissingLeafValue`] from
/// tree construction and scoring.
pub fn plan_turn(state: &GameState, config: &SearchConfig) -> Result<TurnPlan> {
    let (mut root, report) = build_tree(state, config)?;
    let score = minimax(&mut root)?;

    let index = match root.best {
        Some(index) => index,
        None => {
            return Err(Error::NoChildNodes {
                key: root.canonical_key.clone(),
            })
        }
    };
    let chosen = &root.children[index];

    // The chosen child's history extends the root's; the suffix is exactly
    // the steps of the turn to play.
    let base = state.history().len();
    let requests: Vec<MoveRequest> = chosen.state.history()[base..]
        .iter()
        .map(|record| record.to_request())
        .collect();

    let line = principal_line(&root)
        .iter()
        .map(|node| node.path.clone())
        .collect();

    Ok(TurnPlan {
        requests,
        score,
        line,
        report,
    })
}
