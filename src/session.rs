//! Live game session: authoritative state, observer notifications, and the
//! AI turn driver.

use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};

use crate::{
    game::{Capture, GameState, MoveOutcome, MoveRecord, MoveRequest, WinReason},
    pieces::Color,
    rules,
    search::{plan_turn, SearchConfig, TurnPlan},
    Error, Result,
};

/// Observer for game events.
///
/// Implement this trait to receive notifications as moves are applied to a
/// session. All methods have default no-op implementations, so implementers
/// only override the events they care about.
pub trait GameObserver: Send {
    /// Called after a step is applied, including setup steps.
    fn on_move_applied(&mut self, _record: &MoveRecord) -> Result<()> {
        Ok(())
    }

    /// Called once per piece removed by a trap sweep.
    fn on_capture(&mut self, _capture: &Capture) -> Result<()> {
        Ok(())
    }

    /// Called after every step with the mover's remaining points.
    fn on_move_points_changed(&mut self, _color: Color, _remaining: u8) -> Result<()> {
        Ok(())
    }

    /// Called when the move passes to the other side.
    fn on_turn_changed(&mut self, _color: Color) -> Result<()> {
        Ok(())
    }

    /// Called when the game ends.
    fn on_game_over(&mut self, _winner: Color, _reason: WinReason) -> Result<()> {
        Ok(())
    }
}

/// What one AI driver invocation did.
#[derive(Debug)]
pub struct PlayedTurn {
    /// Outcomes of every applied step, in order.
    pub outcomes: Vec<MoveOutcome>,
    /// The search plan, when the search succeeded.
    pub plan: Option<TurnPlan>,
    /// Description of the search defect that forced a random step, if any.
    pub fallback: Option<String>,
}

/// Owns the live game and relays events to registered observers.
pub struct Session {
    state: GameState,
    observers: Vec<Box<dyn GameObserver>>,
    config: SearchConfig,
    rng: StdRng,
}

impl Session {
    /// Create a session over `state` using `config` for AI turns.
    pub fn new(state: GameState, config: SearchConfig) -> Self {
        Session {
            state,
            observers: Vec::new(),
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed the fallback RNG for reproducible games.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Register an observer.
    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// The live state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Submit one step against the live state and notify observers.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`GameState::submit`] and any error
    /// raised by an observer.
    pub fn submit(&mut self, request: MoveRequest) -> Result<MoveOutcome> {
        let outcome = self.state.submit(request)?;
        self.notify(&outcome)?;
        Ok(outcome)
    }

    fn notify(&mut self, outcome: &MoveOutcome) -> Result<()> {
        for observer in &mut self.observers {
            observer.on_move_applied(&outcome.record)?;
            for capture in &outcome.captures {
                observer.on_capture(capture)?;
            }
            observer.on_move_points_changed(
                outcome.record.acting_color,
                outcome.record.move_points_after,
            )?;
            if let Some(color) = outcome.turn_passed_to {
                observer.on_turn_changed(color)?;
            }
            if let Some((winner, reason)) = outcome.winner {
                observer.on_game_over(winner, reason)?;
            }
        }
        Ok(())
    }

    /// Plan and play one turn for the side to move.
    ///
    /// On a search defect the driver degrades to a single random legal step
    /// instead of taking the session down; the caller sees the defect in
    /// [`PlayedTurn::fallback`] and the side keeps the move until its points
    /// run out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMoves`] when even the fallback agent finds
    /// nothing to play, and propagates replay and observer errors.
    pub fn play_ai_turn(&mut self) -> Result<PlayedTurn> {
        match plan_turn(&self.state, &self.config) {
            Ok(plan) => {
                let mut outcomes = Vec::with_capacity(plan.requests.len());
                for request in &plan.requests {
                    outcomes.push(self.submit(*request)?);
                }
                Ok(PlayedTurn {
                    outcomes,
                    plan: Some(plan),
                    fallback: None,
                })
            }
            Err(defect @ (Error::MissingLeafValue { .. } | Error::NoChildNodes { .. })) => {
                let fallback = defect.to_string();
                let request = match self.random_step() {
                    Some(request) => request,
                    None => return Err(Error::NoLegalMoves),
                };
                let outcome = self.submit(request)?;
                Ok(PlayedTurn {
                    outcomes: vec![outcome],
                    plan: None,
                    fallback: Some(fallback),
                })
            }
            Err(error) => Err(error),
        }
    }

    /// A uniformly random legal step for the side to move. Simple steps are
    /// preferred; displacements are only considered when no piece can step.
    fn random_step(&mut self) -> Option<MoveRequest> {
        let color = self.state.current_color();
        let board = self.state.board();

        let mut simple = Vec::new();
        for (from, _) in board.pieces_of(color) {
            for to in rules::simple_destinations(board, from) {
                simple.push(MoveRequest::simple(from, to));
            }
        }
        if let Some(request) = simple.choose(&mut self.rng) {
            return Some(*request);
        }

        if self.state.move_points_remaining() < 2 {
            return None;
        }
        let mut setups = Vec::new();
        for (from, _) in board.pieces_of(color) {
            for victim in rules::push_victims(board, from) {
                setups.push(MoveRequest::pre_push(from, victim));
            }
            for victim in rules::pull_victims(board, from) {
                setups.push(MoveRequest::pre_pull(from, victim));
            }
        }
        setups.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::Board,
        game::MoveKind,
        pieces::{Piece, PieceKind},
        types::Coord,
    };

    #[derive(Default)]
    struct RecordingObserver {
        events: Vec<String>,
    }

    impl GameObserver for RecordingObserver {
        fn on_move_applied(&mut self, record: &MoveRecord) -> Result<()> {
            self.events.push(format!("move {}", record.kind));
            Ok(())
        }

        fn on_capture(&mut self, capture: &Capture) -> Result<()> {
            self.events.push(format!("capture {}", capture.piece));
            Ok(())
        }

        fn on_move_points_changed(&mut self, _color: Color, remaining: u8) -> Result<()> {
            self.events.push(format!("points {remaining}"));
            Ok(())
        }

        fn on_turn_changed(&mut self, color: Color) -> Result<()> {
            self.events.push(format!("turn {color}"));
            Ok(())
        }

        fn on_game_over(&mut self, winner: Color, reason: WinReason) -> Result<()> {
            self.events.push(format!("over {winner} {reason}"));
            Ok(())
        }
    }

    // Observers are owned by the session; a shared log lets the test read
    // what was recorded afterwards.
    struct SharedObserver(std::sync::Arc<std::sync::Mutex<RecordingObserver>>);

    impl GameObserver for SharedObserver {
        fn on_move_applied(&mut self, record: &MoveRecord) -> Result<()> {
            self.0.lock().unwrap().on_move_applied(record)
        }

        fn on_capture(&mut self, capture: &Capture) -> Result<()> {
            self.0.lock().unwrap().on_capture(capture)
        }

        fn on_move_points_changed(&mut self, color: Color, remaining: u8) -> Result<()> {
            self.0.lock().unwrap().on_move_points_changed(color, remaining)
        }

        fn on_turn_changed(&mut self, color: Color) -> Result<()> {
            self.0.lock().unwrap().on_turn_changed(color)
        }

        fn on_game_over(&mut self, winner: Color, reason: WinReason) -> Result<()> {
            self.0.lock().unwrap().on_game_over(winner, reason)
        }
    }

    fn state_with(placements: &[(usize, usize, Color, PieceKind)], to_move: Color) -> GameState {
        let mut board = Board::new();
        for &(row, col, color, kind) in placements {
            board
                .place(Coord::from_raw(row, col), Piece::new(color, kind))
                .unwrap();
        }
        GameState::from_board(board, to_move)
    }

    #[test]
    fn test_observer_sees_move_then_points() {
        let log = std::sync::Arc::new(std::sync::Mutex::new(RecordingObserver::default()));
        let state = state_with(
            &[
                (4, 4, Color::Gold, PieceKind::Horse),
                (7, 0, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );
        let mut session = Session::new(state, SearchConfig::new());
        session.add_observer(Box::new(SharedObserver(log.clone())));

        session
            .submit(MoveRequest::simple(
                Coord::from_raw(4, 4),
                Coord::from_raw(4, 5),
            ))
            .unwrap();

        let events = log.lock().unwrap().events.clone();
        assert_eq!(events, vec!["move simple".to_string(), "points 3".to_string()]);
    }

    #[test]
    fn test_observer_sees_capture_and_game_over() {
        let log = std::sync::Arc::new(std::sync::Mutex::new(RecordingObserver::default()));
        // Silver steps sideways; the unguarded gold rabbit on the (2, 2)
        // trap is swept and Gold has no rabbits left.
        let state = state_with(
            &[
                (2, 2, Color::Gold, PieceKind::Rabbit),
                (6, 6, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Silver,
        );
        let mut session = Session::new(state, SearchConfig::new());
        session.add_observer(Box::new(SharedObserver(log.clone())));

        session
            .submit(MoveRequest::simple(
                Coord::from_raw(6, 6),
                Coord::from_raw(6, 7),
            ))
            .unwrap();

        let events = log.lock().unwrap().events.clone();
        assert_eq!(
            events,
            vec![
                "move simple".to_string(),
                "capture Gold Rabbit".to_string(),
                "points 3".to_string(),
                "over Silver elimination".to_string(),
            ]
        );
    }

    #[test]
    fn test_ai_turn_spends_all_points() {
        let state = state_with(
            &[
                (4, 4, Color::Gold, PieceKind::Elephant),
                (7, 0, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );
        let config = SearchConfig::new().with_turn_depth(1);
        let mut session = Session::new(state, config).with_seed(7);

        let played = session.play_ai_turn().unwrap();
        assert!(played.plan.is_some());
        assert!(played.fallback.is_none());
        assert!(
            session.state().current_color() == Color::Silver || session.state().is_over(),
            "a planned turn runs to completion"
        );
    }

    #[test]
    fn test_random_step_is_legal() {
        let state = state_with(
            &[
                (4, 4, Color::Gold, PieceKind::Horse),
                (7, 0, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );
        let mut session = Session::new(state, SearchConfig::new()).with_seed(3);
        let request = session.random_step().expect("moves exist");
        assert_eq!(request.kind, MoveKind::Simple);
        session.submit(request).unwrap();
    }
}
