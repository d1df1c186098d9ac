//! Game state and the move protocol: selection, validated submission, the
//! two-phase push/pull exchange, trap captures, and win conditions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    pieces::{Color, Piece, PieceKind},
    rules,
    types::{Coord, BOARD_SIZE, MOVE_POINTS_PER_TURN, TRAP_SQUARES},
    Error, Result,
};

/// One side's turn bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub color: Color,
    pub move_points: u8,
}

/// The kind of a move request or history record.
///
/// A push or pull spans two submissions: the setup kind starts the exchange
/// and the bare kind completes it. Every applied step costs one move point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Simple,
    PrePush,
    Push,
    PrePull,
    Pull,
}

impl MoveKind {
    /// Move points that must be available before this kind can start.
    /// Setup kinds reserve the full cost of both phases.
    pub fn required_points(self) -> u8 {
        match self {
            MoveKind::PrePush | MoveKind::PrePull => 2,
            MoveKind::Simple | MoveKind::Push | MoveKind::Pull => 1,
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Simple => write!(f, "simple"),
            MoveKind::PrePush => write!(f, "push setup"),
            MoveKind::Push => write!(f, "push"),
            MoveKind::PrePull => write!(f, "pull setup"),
            MoveKind::Pull => write!(f, "pull"),
        }
    }
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    /// A rabbit reached the opponent's home edge.
    Goal,
    /// A side ran out of rabbits.
    Elimination,
    /// Every piece of a side was unable to act.
    Immobilization,
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinReason::Goal => write!(f, "goal"),
            WinReason::Elimination => write!(f, "elimination"),
            WinReason::Immobilization => write!(f, "immobilization"),
        }
    }
}

/// An externally submitted move step. `from` is required for simple moves
/// and setups; completions only name the landing square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub kind: MoveKind,
    pub from: Option<Coord>,
    pub to: Coord,
}

impl MoveRequest {
    /// A single step from `from` to `to`.
    pub fn simple(from: Coord, to: Coord) -> Self {
        MoveRequest {
            kind: MoveKind::Simple,
            from: Some(from),
            to,
        }
    }

    /// Start a push: the attacker at `from` displaces the victim at `to`.
    pub fn pre_push(from: Coord, to: Coord) -> Self {
        MoveRequest {
            kind: MoveKind::PrePush,
            from: Some(from),
            to,
        }
    }

    /// Complete a push: the floating victim lands on `to`.
    pub fn push(to: Coord) -> Self {
        MoveRequest {
            kind: MoveKind::Push,
            from: None,
            to,
        }
    }

    /// Start a pull: the attacker at `from` lifts the victim at `to`.
    pub fn pre_pull(from: Coord, to: Coord) -> Self {
        MoveRequest {
            kind: MoveKind::PrePull,
            from: Some(from),
            to,
        }
    }

    /// Complete a pull: the attacker steps to `to`, dragging the victim into
    /// its vacated square.
    pub fn pull(to: Coord) -> Self {
        MoveRequest {
            kind: MoveKind::Pull,
            from: None,
            to,
        }
    }
}

/// A single applied step, as recorded in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub kind: MoveKind,
    pub from: Option<Coord>,
    pub to: Coord,
    pub acting_color: Color,
    /// The mover's points immediately after this step, before any turn
    /// rollover reset.
    pub move_points_after: u8,
}

impl MoveRecord {
    /// The request that would replay this record against the same position.
    pub fn to_request(&self) -> MoveRequest {
        MoveRequest {
            kind: self.kind,
            from: self.from,
            to: self.to,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some(from) => write!(f, "{} {} -> {}", self.kind, from, self.to),
            None => write!(f, "{} -> {}", self.kind, self.to),
        }
    }
}

/// A published destination paired with the move kind that reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub coord: Coord,
    pub kind: MoveKind,
}

/// Where the engine is inside a push/pull exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePhase {
    /// No displacement underway.
    Idle,
    /// Push setup applied: the attacker already stands on the victim's old
    /// square and the floating victim must land next.
    AwaitingPushDestination {
        floating: Piece,
        origin: Coord,
        attacker_from: Coord,
    },
    /// Pull setup applied: the floating victim is off the board until the
    /// attacker steps away from `attacker`.
    AwaitingPullDestination {
        floating: Piece,
        victim_from: Coord,
        attacker: Coord,
    },
}

/// A trap capture produced by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub piece: Piece,
    pub at: Coord,
}

/// What a successful submission did, for observers and drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub record: MoveRecord,
    pub captures: Vec<Capture>,
    /// Set when the step spent the mover's last point and the turn rolled over.
    pub turn_passed_to: Option<Color>,
    /// Set when the step ended the game.
    pub winner: Option<(Color, WinReason)>,
}

/// Authoritative game state.
///
/// Cloning yields a fully independent copy: board, players, phase, and
/// history all duplicate, so a clone can be mutated freely without touching
/// the original. The search layer leans on this constantly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    gold: PlayerState,
    silver: PlayerState,
    current: Color,
    phase: MovePhase,
    selection: Option<Coord>,
    destinations: Vec<Destination>,
    history: Vec<MoveRecord>,
    outcome: Option<(Color, WinReason)>,
}

impl GameState {
    /// An empty board with Gold to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::Gold)
    }

    /// Start from an arbitrary position. The position is taken as given; no
    /// trap sweep or win check runs until the first move finalizes.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        GameState {
            board,
            gold: PlayerState {
                color: Color::Gold,
                move_points: MOVE_POINTS_PER_TURN,
            },
            silver: PlayerState {
                color: Color::Silver,
                move_points: MOVE_POINTS_PER_TURN,
            },
            current: to_move,
            phase: MovePhase::Idle,
            selection: None,
            destinations: Vec::new(),
            history: Vec::new(),
            outcome: None,
        }
    }

    /// A small seven-piece demonstration layout. Silver opens: every gold
    /// piece starts next to an equal or stronger enemy with no friendly
    /// support, so gold has no legal first move.
    pub fn with_demo_setup() -> Self {
        let placements = [
            (Color::Silver, PieceKind::Rabbit, (1, 0)),
            (Color::Gold, PieceKind::Rabbit, (1, 1)),
            (Color::Gold, PieceKind::Dog, (2, 0)),
            (Color::Silver, PieceKind::Dog, (2, 1)),
            (Color::Silver, PieceKind::Elephant, (6, 3)),
            (Color::Gold, PieceKind::Dog, (5, 3)),
            (Color::Gold, PieceKind::Horse, (6, 2)),
        ];
        let mut state = Self::from_board(Board::new(), Color::Silver);
        for (color, kind, (row, col)) in placements {
            state
                .board
                .place(Coord::from_raw(row, col), Piece::new(color, kind))
                .expect("demo layout uses distinct empty squares");
        }
        state
    }

    /// Full armies: eight rabbits on each home row and the heavier ranks on
    /// the row in front of them.
    pub fn with_default_setup() -> Self {
        let officers = [
            PieceKind::Horse,
            PieceKind::Dog,
            PieceKind::Cat,
            PieceKind::Elephant,
            PieceKind::Camel,
            PieceKind::Cat,
            PieceKind::Dog,
            PieceKind::Horse,
        ];
        let mut state = Self::new();
        for col in 0..BOARD_SIZE {
            let rows = [
                (Color::Gold, PieceKind::Rabbit, 7),
                (Color::Gold, officers[col], 6),
                (Color::Silver, PieceKind::Rabbit, 0),
                (Color::Silver, officers[col], 1),
            ];
            for (color, kind, row) in rows {
                state
                    .board
                    .place(Coord::from_raw(row, col), Piece::new(color, kind))
                    .expect("default setup uses distinct empty squares");
            }
        }
        state
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn current_color(&self) -> Color {
        self.current
    }

    /// Bookkeeping for one side.
    pub fn player(&self, color: Color) -> &PlayerState {
        match color {
            Color::Gold => &self.gold,
            Color::Silver => &self.silver,
        }
    }

    fn player_mut(&mut self, color: Color) -> &mut PlayerState {
        match color {
            Color::Gold => &mut self.gold,
            Color::Silver => &mut self.silver,
        }
    }

    /// Move points left for the side to move.
    pub fn move_points_remaining(&self) -> u8 {
        self.player(self.current).move_points
    }

    /// Where the engine is inside a push/pull exchange.
    pub fn phase(&self) -> MovePhase {
        self.phase
    }

    /// The displaced piece currently off the board, if any.
    pub fn floating_piece(&self) -> Option<Piece> {
        match self.phase {
            MovePhase::Idle => None,
            MovePhase::AwaitingPushDestination { floating, .. }
            | MovePhase::AwaitingPullDestination { floating, .. } => Some(floating),
        }
    }

    /// The selected square, if a selection is active.
    pub fn active_selection(&self) -> Option<Coord> {
        self.selection
    }

    /// The currently published destinations.
    pub fn available_destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Every applied step since the start of the game.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The winning side, once the game has ended.
    pub fn winner(&self) -> Option<Color> {
        self.outcome.map(|(color, _)| color)
    }

    /// Why the game ended, once it has.
    pub fn win_reason(&self) -> Option<WinReason> {
        self.outcome.map(|(_, reason)| reason)
    }

    /// Winner and reason together.
    pub fn outcome(&self) -> Option<(Color, WinReason)> {
        self.outcome
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Canonical transposition key for the current board.
    pub fn canonical_key(&self) -> String {
        self.board.canonical_string()
    }

    fn ensure_active(&self) -> Result<()> {
        if self.outcome.is_some() {
            Err(Error::GameOver)
        } else {
            Ok(())
        }
    }

    /// Select a friendly, unfrozen piece and publish its destinations.
    ///
    /// Simple step targets are always included. With at least two move points
    /// left, adjacent pushable and pullable enemies are published as well,
    /// tagged with their setup kinds. The list may be empty.
    ///
    /// # Errors
    ///
    /// Rejects selection while the game is over, while a displacement is in
    /// progress, and for empty squares, enemy pieces, or frozen pieces.
    pub fn select(&mut self, at: Coord) -> Result<&[Destination]> {
        self.ensure_active()?;
        if !matches!(self.phase, MovePhase::Idle) {
            return Err(Error::DisplacementInProgress);
        }
        let piece = match self.board.piece_at(at) {
            Some(piece) => piece,
            None => return Err(Error::EmptySquare { at }),
        };
        if piece.color != self.current {
            return Err(Error::OpponentPiece { at });
        }
        if rules::is_frozen(&self.board, at) {
            return Err(Error::FrozenPiece { at });
        }

        let mut destinations: Vec<Destination> = rules::simple_destinations(&self.board, at)
            .into_iter()
            .map(|coord| Destination {
                coord,
                kind: MoveKind::Simple,
            })
            .collect();
        if self.move_points_remaining() >= 2 {
            destinations.extend(rules::push_victims(&self.board, at).into_iter().map(
                |coord| Destination {
                    coord,
                    kind: MoveKind::PrePush,
                },
            ));
            destinations.extend(rules::pull_victims(&self.board, at).into_iter().map(
                |coord| Destination {
                    coord,
                    kind: MoveKind::PrePull,
                },
            ));
        }

        self.selection = Some(at);
        self.destinations = destinations;
        Ok(&self.destinations)
    }

    /// Drop the active selection and its published destinations. Ignored
    /// while a displacement is in progress.
    pub fn clear_selection(&mut self) {
        if matches!(self.phase, MovePhase::Idle) {
            self.selection = None;
            self.destinations.clear();
        }
    }

    /// Apply one validated move step.
    ///
    /// A simple move, or the completion of a push or pull, finalizes: traps
    /// are swept, win conditions evaluated, and the turn rolls over when the
    /// last move point is spent. A setup step instead leaves the game
    /// awaiting the displacement destination. On any error the state is
    /// unchanged.
    ///
    /// Requests against a fresh square select it implicitly, so callers do
    /// not have to pair every submission with an explicit [`select`].
    ///
    /// # Examples
    ///
    /// ```
    /// use arimaa::{Board, Color, Coord, GameState, MoveRequest, Piece, PieceKind};
    ///
    /// let mut board = Board::new();
    /// board
    ///     .place(Coord::from_raw(4, 4), Piece::new(Color::Gold, PieceKind::Dog))
    ///     .unwrap();
    /// board
    ///     .place(Coord::from_raw(7, 0), Piece::new(Color::Gold, PieceKind::Rabbit))
    ///     .unwrap();
    /// board
    ///     .place(Coord::from_raw(0, 7), Piece::new(Color::Silver, PieceKind::Rabbit))
    ///     .unwrap();
    ///
    /// let mut state = GameState::from_board(board, Color::Gold);
    /// let outcome = state
    ///     .submit(MoveRequest::simple(Coord::from_raw(4, 4), Coord::from_raw(4, 5)))
    ///     .unwrap();
    /// assert!(outcome.captures.is_empty());
    /// assert_eq!(state.move_points_remaining(), 3);
    /// ```
    ///
    /// [`select`]: GameState::select
    pub fn submit(&mut self, request: MoveRequest) -> Result<MoveOutcome> {
        self.ensure_active()?;
        match self.phase {
            MovePhase::Idle => match request.kind {
                MoveKind::Simple => self.apply_simple(request),
                MoveKind::PrePush => self.apply_push_setup(request),
                MoveKind::PrePull => self.apply_pull_setup(request),
                MoveKind::Push | MoveKind::Pull => Err(Error::NoDisplacementInProgress),
            },
            MovePhase::AwaitingPushDestination { floating, .. } => match request.kind {
                MoveKind::Push => self.apply_push_completion(request, floating),
                _ => Err(Error::DisplacementInProgress),
            },
            MovePhase::AwaitingPullDestination {
                floating,
                victim_from: _,
                attacker,
            } => match request.kind {
                MoveKind::Pull => self.apply_pull_completion(request, floating, attacker),
                _ => Err(Error::DisplacementInProgress),
            },
        }
    }

    /// Abandon an in-progress push or pull: the displaced piece returns to
    /// its square, the setup point is refunded, and the setup record is
    /// dropped from history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDisplacementInProgress`] outside a displacement.
    pub fn cancel_displacement(&mut self) -> Result<()> {
        match self.phase {
            MovePhase::Idle => Err(Error::NoDisplacementInProgress),
            MovePhase::AwaitingPushDestination {
                floating,
                origin,
                attacker_from,
            } => {
                let attacker = match self.board.take(origin) {
                    Some(piece) => piece,
                    None => return Err(Error::EmptySquare { at: origin }),
                };
                self.board.place(attacker_from, attacker)?;
                self.board.place(origin, floating)?;
                self.finish_cancel();
                Ok(())
            }
            MovePhase::AwaitingPullDestination {
                floating,
                victim_from,
                ..
            } => {
                self.board.place(victim_from, floating)?;
                self.finish_cancel();
                Ok(())
            }
        }
    }

    fn finish_cancel(&mut self) {
        let points = &mut self.player_mut(self.current).move_points;
        *points = (*points + 1).min(MOVE_POINTS_PER_TURN);
        self.history.pop();
        self.phase = MovePhase::Idle;
        self.selection = None;
        self.destinations.clear();
    }

    /// Remove unguarded pieces from the four trap squares. A piece survives
    /// only with an orthogonally adjacent friend. Runs as part of every
    /// finalized step; calling it again on the same position removes nothing.
    pub fn resolve_trap_captures(&mut self) -> Vec<Capture> {
        let mut captures = Vec::new();
        for trap in TRAP_SQUARES {
            let piece = match self.board.piece_at(trap) {
                Some(piece) => piece,
                None => continue,
            };
            let guarded = trap.neighbors().any(|neighbor| {
                self.board
                    .piece_at(neighbor)
                    .is_some_and(|other| other.color == piece.color)
            });
            if !guarded {
                self.board.take(trap);
                captures.push(Capture { piece, at: trap });
            }
        }
        captures
    }

    /// The first satisfied win condition, in fixed priority: goal, then
    /// elimination, then immobilization. Elimination and immobilization are
    /// checked on the opponent before the mover, so a step that dooms both
    /// sides at once wins for the side that made it.
    pub fn evaluate_win_condition(&self) -> Option<(Color, WinReason)> {
        let mover = self.current;
        let opponent = mover.opponent();

        // Goal inspects only the acting side's rabbits.
        let goal_row = mover.goal_row();
        let reached = (0..BOARD_SIZE).any(|col| {
            self.board
                .piece_at(Coord::from_raw(goal_row, col))
                .is_some_and(|piece| piece.color == mover && piece.kind == PieceKind::Rabbit)
        });
        if reached {
            return Some((mover, WinReason::Goal));
        }

        if self.board.rabbit_count(opponent) == 0 {
            return Some((mover, WinReason::Elimination));
        }
        if self.board.rabbit_count(mover) == 0 {
            return Some((opponent, WinReason::Elimination));
        }

        if rules::side_immobilized(&self.board, opponent) {
            return Some((mover, WinReason::Immobilization));
        }
        if rules::side_immobilized(&self.board, mover) {
            return Some((opponent, WinReason::Immobilization));
        }

        None
    }

    fn take_destination(&self, kind: MoveKind, to: Coord) -> Result<()> {
        if self
            .destinations
            .iter()
            .any(|destination| destination.kind == kind && destination.coord == to)
        {
            Ok(())
        } else {
            Err(Error::IllegalDestination { kind, to })
        }
    }

    fn ensure_points(&self, kind: MoveKind) -> Result<()> {
        let required = kind.required_points();
        let remaining = self.move_points_remaining();
        if remaining < required {
            Err(Error::InsufficientMovePoints {
                required,
                remaining,
            })
        } else {
            Ok(())
        }
    }

    fn ensure_selected(&mut self, from: Coord) -> Result<()> {
        if self.selection != Some(from) {
            self.select(from)?;
        }
        Ok(())
    }

    fn apply_simple(&mut self, request: MoveRequest) -> Result<MoveOutcome> {
        let from = match request.from {
            Some(from) => from,
            None => {
                return Err(Error::MissingOrigin {
                    kind: MoveKind::Simple,
                })
            }
        };
        self.ensure_selected(from)?;
        self.take_destination(MoveKind::Simple, request.to)?;

        let piece = match self.board.take(from) {
            Some(piece) => piece,
            None => return Err(Error::EmptySquare { at: from }),
        };
        self.board.place(request.to, piece)?;
        self.finalize_step(MoveKind::Simple, Some(from), request.to)
    }

    fn apply_push_setup(&mut self, request: MoveRequest) -> Result<MoveOutcome> {
        let from = match request.from {
            Some(from) => from,
            None => {
                return Err(Error::MissingOrigin {
                    kind: MoveKind::PrePush,
                })
            }
        };
        self.ensure_points(MoveKind::PrePush)?;
        self.ensure_selected(from)?;
        self.take_destination(MoveKind::PrePush, request.to)?;

        let victim = match self.board.take(request.to) {
            Some(piece) => piece,
            None => return Err(Error::EmptySquare { at: request.to }),
        };
        let attacker = match self.board.take(from) {
            Some(piece) => piece,
            None => return Err(Error::EmptySquare { at: from }),
        };
        self.board.place(request.to, attacker)?;

        self.spend_point();
        let record = MoveRecord {
            kind: MoveKind::PrePush,
            from: Some(from),
            to: request.to,
            acting_color: self.current,
            move_points_after: self.move_points_remaining(),
        };
        self.history.push(record);
        self.selection = None;
        // Landing squares come from the board as it stands after the
        // attacker's step, so the attacker's vacated square qualifies.
        self.destinations = rules::float_destinations(&self.board, request.to)
            .into_iter()
            .map(|coord| Destination {
                coord,
                kind: MoveKind::Push,
            })
            .collect();
        self.phase = MovePhase::AwaitingPushDestination {
            floating: victim,
            origin: request.to,
            attacker_from: from,
        };

        Ok(MoveOutcome {
            record,
            captures: Vec::new(),
            turn_passed_to: None,
            winner: None,
        })
    }

    fn apply_push_completion(&mut self, request: MoveRequest, floating: Piece) -> Result<MoveOutcome> {
        self.take_destination(MoveKind::Push, request.to)?;
        self.board.place(request.to, floating)?;
        self.finalize_step(MoveKind::Push, None, request.to)
    }

    fn apply_pull_setup(&mut self, request: MoveRequest) -> Result<MoveOutcome> {
        let from = match request.from {
            Some(from) => from,
            None => {
                return Err(Error::MissingOrigin {
                    kind: MoveKind::PrePull,
                })
            }
        };
        self.ensure_points(MoveKind::PrePull)?;
        self.ensure_selected(from)?;
        self.take_destination(MoveKind::PrePull, request.to)?;

        // The attacker's step targets are fixed before the victim lifts off,
        // so the square being vacated never becomes a landing option.
        let attacker_moves = rules::simple_destinations(&self.board, from);
        let victim = match self.board.take(request.to) {
            Some(piece) => piece,
            None => return Err(Error::EmptySquare { at: request.to }),
        };

        self.spend_point();
        let record = MoveRecord {
            kind: MoveKind::PrePull,
            from: Some(from),
            to: request.to,
            acting_color: self.current,
            move_points_after: self.move_points_remaining(),
        };
        self.history.push(record);
        self.selection = None;
        self.destinations = attacker_moves
            .into_iter()
            .map(|coord| Destination {
                coord,
                kind: MoveKind::Pull,
            })
            .collect();
        self.phase = MovePhase::AwaitingPullDestination {
            floating: victim,
            victim_from: request.to,
            attacker: from,
        };

        Ok(MoveOutcome {
            record,
            captures: Vec::new(),
            turn_passed_to: None,
            winner: None,
        })
    }

    fn apply_pull_completion(
        &mut self,
        request: MoveRequest,
        floating: Piece,
        attacker: Coord,
    ) -> Result<MoveOutcome> {
        self.take_destination(MoveKind::Pull, request.to)?;
        let attacker_piece = match self.board.take(attacker) {
            Some(piece) => piece,
            None => return Err(Error::EmptySquare { at: attacker }),
        };
        self.board.place(request.to, attacker_piece)?;
        self.board.place(attacker, floating)?;
        self.finalize_step(MoveKind::Pull, Some(attacker), request.to)
    }

    /// Shared tail of every finalizing step: spend the point, record the
    /// step, sweep traps, evaluate wins, then roll the turn over if the
    /// mover is out of points.
    fn finalize_step(
        &mut self,
        kind: MoveKind,
        from: Option<Coord>,
        to: Coord,
    ) -> Result<MoveOutcome> {
        self.spend_point();
        let record = MoveRecord {
            kind,
            from,
            to,
            acting_color: self.current,
            move_points_after: self.move_points_remaining(),
        };
        self.history.push(record);
        self.phase = MovePhase::Idle;
        self.selection = None;
        self.destinations.clear();

        let captures = self.resolve_trap_captures();
        let winner = self.evaluate_win_condition();
        if let Some(ending) = winner {
            self.outcome = Some(ending);
        }

        let turn_passed_to = if self.outcome.is_none() && self.move_points_remaining() == 0 {
            self.current = self.current.opponent();
            self.player_mut(self.current).move_points = MOVE_POINTS_PER_TURN;
            Some(self.current)
        } else {
            None
        };

        Ok(MoveOutcome {
            record,
            captures,
            turn_passed_to,
            winner,
        })
    }

    fn spend_point(&mut self) {
        let points = &mut self.player_mut(self.current).move_points;
        *points = points.saturating_sub(1);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
