//! Test suite for the rules engine
//! Validates movement, the displacement protocol, traps, and win conditions

use arimaa::{
    Board, Capture, Color, Coord, Error, GameState, MoveKind, MovePhase, MoveRequest, Piece,
    PieceKind, WinReason,
};

fn state_with(placements: &[(usize, usize, Color, PieceKind)], to_move: Color) -> GameState {
    let mut board = Board::new();
    for &(row, col, color, kind) in placements {
        board
            .place(Coord::from_raw(row, col), Piece::new(color, kind))
            .unwrap();
    }
    GameState::from_board(board, to_move)
}

fn destination_coords(state: &GameState) -> Vec<Coord> {
    state
        .available_destinations()
        .iter()
        .map(|destination| destination.coord)
        .collect()
}

mod rabbit_movement {
    use super::*;

    #[test]
    fn gold_rabbit_on_the_edge_has_two_destinations() {
        // Gold advances toward row 0, so the square behind the rabbit at
        // (2, 0) is excluded and the west neighbor is off the board.
        let mut state = state_with(
            &[
                (1, 0, Color::Gold, PieceKind::Rabbit),
                (4, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );

        state.select(Coord::from_raw(1, 0)).unwrap();
        let coords = destination_coords(&state);

        assert_eq!(coords.len(), 2, "edge rabbit should have two destinations");
        assert!(coords.contains(&Coord::from_raw(0, 0)));
        assert!(coords.contains(&Coord::from_raw(1, 1)));
        assert!(
            !coords.contains(&Coord::from_raw(2, 0)),
            "a gold rabbit must not step back toward its home row"
        );
    }

    #[test]
    fn gold_rabbit_in_the_interior_has_three_destinations() {
        let mut state = state_with(
            &[
                (1, 1, Color::Gold, PieceKind::Rabbit),
                (4, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );

        state.select(Coord::from_raw(1, 1)).unwrap();
        let coords = destination_coords(&state);

        assert_eq!(coords.len(), 3);
        assert!(
            !coords.contains(&Coord::from_raw(2, 1)),
            "the retreat square must be excluded"
        );
    }

    #[test]
    fn silver_rabbit_mirrors_the_retreat_rule() {
        let mut state = state_with(
            &[
                (6, 0, Color::Silver, PieceKind::Rabbit),
                (3, 7, Color::Gold, PieceKind::Rabbit),
            ],
            Color::Silver,
        );

        state.select(Coord::from_raw(6, 0)).unwrap();
        let coords = destination_coords(&state);

        assert_eq!(coords.len(), 2);
        assert!(coords.contains(&Coord::from_raw(7, 0)));
        assert!(coords.contains(&Coord::from_raw(6, 1)));
        assert!(
            !coords.contains(&Coord::from_raw(5, 0)),
            "a silver rabbit must not step back toward row 0"
        );
    }
}

mod freezing {
    use super::*;

    #[test]
    fn equal_rank_enemy_freezes_an_unsupported_piece() {
        let mut state = state_with(
            &[
                (3, 3, Color::Silver, PieceKind::Dog),
                (3, 4, Color::Gold, PieceKind::Dog),
                (0, 7, Color::Silver, PieceKind::Rabbit),
                (7, 0, Color::Gold, PieceKind::Rabbit),
            ],
            Color::Silver,
        );

        let result = state.select(Coord::from_raw(3, 3));
        assert!(
            matches!(result, Err(Error::FrozenPiece { .. })),
            "an equal-rank enemy with no friendly support should freeze"
        );
    }

    #[test]
    fn friendly_neighbor_lifts_the_freeze() {
        let mut state = state_with(
            &[
                (3, 3, Color::Silver, PieceKind::Dog),
                (3, 4, Color::Gold, PieceKind::Dog),
                (2, 3, Color::Silver, PieceKind::Cat),
                (0, 7, Color::Silver, PieceKind::Rabbit),
                (7, 0, Color::Gold, PieceKind::Rabbit),
            ],
            Color::Silver,
        );

        state.select(Coord::from_raw(3, 3)).unwrap();
        let coords = destination_coords(&state);
        assert_eq!(
            coords.len(),
            2,
            "the supported dog should step to its two open neighbors"
        );
    }

    #[test]
    fn weaker_enemy_does_not_freeze_and_becomes_a_victim() {
        let mut state = state_with(
            &[
                (3, 3, Color::Silver, PieceKind::Dog),
                (3, 4, Color::Gold, PieceKind::Cat),
                (0, 7, Color::Silver, PieceKind::Rabbit),
                (7, 0, Color::Gold, PieceKind::Rabbit),
            ],
            Color::Silver,
        );

        let destinations = state.select(Coord::from_raw(3, 3)).unwrap().to_vec();

        let push_tag = destinations
            .iter()
            .any(|d| d.kind == MoveKind::PrePush && d.coord == Coord::from_raw(3, 4));
        let pull_tag = destinations
            .iter()
            .any(|d| d.kind == MoveKind::PrePull && d.coord == Coord::from_raw(3, 4));
        assert!(push_tag, "the weaker cat should be offered as a push target");
        assert!(pull_tag, "the weaker cat should be offered as a pull target");
    }
}

mod push_protocol {
    use super::*;

    fn push_board() -> GameState {
        state_with(
            &[
                (3, 3, Color::Gold, PieceKind::Elephant),
                (3, 4, Color::Silver, PieceKind::Cat),
                (7, 0, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        )
    }

    #[test]
    fn push_setup_floats_the_victim() {
        let mut state = push_board();

        let outcome = state
            .submit(MoveRequest::pre_push(
                Coord::from_raw(3, 3),
                Coord::from_raw(3, 4),
            ))
            .unwrap();

        assert_eq!(outcome.record.kind, MoveKind::PrePush);
        assert!(outcome.captures.is_empty(), "no sweep runs mid-exchange");
        assert!(outcome.winner.is_none(), "no win check runs mid-exchange");
        assert_eq!(state.move_points_remaining(), 3);
        assert_eq!(
            state.floating_piece(),
            Some(Piece::new(Color::Silver, PieceKind::Cat))
        );
        assert!(matches!(
            state.phase(),
            MovePhase::AwaitingPushDestination { origin, attacker_from, .. }
                if origin == Coord::from_raw(3, 4) && attacker_from == Coord::from_raw(3, 3)
        ));

        // The attacker already stands on the victim's old square.
        assert_eq!(
            state.board().piece_at(Coord::from_raw(3, 4)),
            Some(Piece::new(Color::Gold, PieceKind::Elephant))
        );

        let coords = destination_coords(&state);
        assert_eq!(coords.len(), 4);
        assert!(
            coords.contains(&Coord::from_raw(3, 3)),
            "the attacker's vacated square is a legal landing"
        );
        assert!(coords.contains(&Coord::from_raw(2, 4)));
        assert!(coords.contains(&Coord::from_raw(4, 4)));
        assert!(coords.contains(&Coord::from_raw(3, 5)));
    }

    #[test]
    fn push_completion_places_the_victim_and_spends_two_points() {
        let mut state = push_board();

        state
            .submit(MoveRequest::pre_push(
                Coord::from_raw(3, 3),
                Coord::from_raw(3, 4),
            ))
            .unwrap();
        let outcome = state.submit(MoveRequest::push(Coord::from_raw(3, 5))).unwrap();

        assert_eq!(outcome.record.kind, MoveKind::Push);
        assert_eq!(
            state.board().piece_at(Coord::from_raw(3, 4)),
            Some(Piece::new(Color::Gold, PieceKind::Elephant))
        );
        assert_eq!(
            state.board().piece_at(Coord::from_raw(3, 5)),
            Some(Piece::new(Color::Silver, PieceKind::Cat))
        );
        assert_eq!(
            state.move_points_remaining(),
            2,
            "a full push costs two move points"
        );
        assert_eq!(state.phase(), MovePhase::Idle);
        assert!(state.winner().is_none());
    }

    #[test]
    fn push_landing_must_neighbor_the_victim_origin() {
        let mut state = push_board();

        state
            .submit(MoveRequest::pre_push(
                Coord::from_raw(3, 3),
                Coord::from_raw(3, 4),
            ))
            .unwrap();
        let result = state.submit(MoveRequest::push(Coord::from_raw(4, 5)));

        assert!(matches!(
            result,
            Err(Error::IllegalDestination {
                kind: MoveKind::Push,
                ..
            })
        ));
    }

    #[test]
    fn push_target_must_be_strictly_weaker() {
        // The dog keeps the gold elephant unfrozen, so the rejection comes
        // from the equal rank of the target, not from a freeze.
        let mut state = state_with(
            &[
                (3, 3, Color::Gold, PieceKind::Elephant),
                (4, 3, Color::Gold, PieceKind::Dog),
                (3, 4, Color::Silver, PieceKind::Elephant),
                (7, 0, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );

        let result = state.submit(MoveRequest::pre_push(
            Coord::from_raw(3, 3),
            Coord::from_raw(3, 4),
        ));
        assert!(
            matches!(
                result,
                Err(Error::IllegalDestination {
                    kind: MoveKind::PrePush,
                    ..
                })
            ),
            "an equal-rank piece cannot be pushed"
        );
    }

    #[test]
    fn cancelled_push_restores_the_position() {
        let mut state = push_board();
        let before = state.canonical_key();

        state
            .submit(MoveRequest::pre_push(
                Coord::from_raw(3, 3),
                Coord::from_raw(3, 4),
            ))
            .unwrap();
        state.cancel_displacement().unwrap();

        assert_eq!(state.canonical_key(), before);
        assert_eq!(state.move_points_remaining(), 4, "the setup point is refunded");
        assert_eq!(state.phase(), MovePhase::Idle);
        assert!(state.history().is_empty());
    }

    #[test]
    fn push_on_a_rabbitless_board_ends_by_elimination() {
        // With no rabbits anywhere the first finalized step ends the game;
        // the opponent's side is checked first, so the mover wins.
        let mut state = state_with(
            &[
                (3, 3, Color::Gold, PieceKind::Elephant),
                (3, 4, Color::Silver, PieceKind::Cat),
            ],
            Color::Gold,
        );

        state
            .submit(MoveRequest::pre_push(
                Coord::from_raw(3, 3),
                Coord::from_raw(3, 4),
            ))
            .unwrap();
        let outcome = state.submit(MoveRequest::push(Coord::from_raw(3, 5))).unwrap();

        assert_eq!(outcome.winner, Some((Color::Gold, WinReason::Elimination)));
        assert!(state.is_over());
    }
}

mod pull_protocol {
    use super::*;

    fn pull_board() -> GameState {
        state_with(
            &[
                (3, 2, Color::Gold, PieceKind::Elephant),
                (3, 3, Color::Silver, PieceKind::Cat),
                (7, 0, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        )
    }

    #[test]
    fn pull_setup_offers_the_attacker_exits_only() {
        let mut state = pull_board();

        state
            .submit(MoveRequest::pre_pull(
                Coord::from_raw(3, 2),
                Coord::from_raw(3, 3),
            ))
            .unwrap();

        assert_eq!(
            state.floating_piece(),
            Some(Piece::new(Color::Silver, PieceKind::Cat))
        );
        assert_eq!(state.move_points_remaining(), 3);

        let coords = destination_coords(&state);
        assert_eq!(coords.len(), 3);
        assert!(coords.contains(&Coord::from_raw(2, 2)));
        assert!(coords.contains(&Coord::from_raw(4, 2)));
        assert!(coords.contains(&Coord::from_raw(3, 1)));
        assert!(
            !coords.contains(&Coord::from_raw(3, 3)),
            "the lifted victim's square is not an exit; the pair may not swap"
        );
    }

    #[test]
    fn pull_completion_drags_the_victim_behind() {
        let mut state = pull_board();

        state
            .submit(MoveRequest::pre_pull(
                Coord::from_raw(3, 2),
                Coord::from_raw(3, 3),
            ))
            .unwrap();
        let outcome = state.submit(MoveRequest::pull(Coord::from_raw(3, 1))).unwrap();

        assert_eq!(outcome.record.kind, MoveKind::Pull);
        assert_eq!(
            state.board().piece_at(Coord::from_raw(3, 1)),
            Some(Piece::new(Color::Gold, PieceKind::Elephant))
        );
        assert_eq!(
            state.board().piece_at(Coord::from_raw(3, 2)),
            Some(Piece::new(Color::Silver, PieceKind::Cat)),
            "the victim lands on the attacker's vacated square"
        );
        assert!(state.board().piece_at(Coord::from_raw(3, 3)).is_none());
        assert_eq!(state.move_points_remaining(), 2);
        assert_eq!(state.phase(), MovePhase::Idle);
    }

    #[test]
    fn cancelled_pull_restores_the_position() {
        let mut state = pull_board();
        let before = state.canonical_key();

        state
            .submit(MoveRequest::pre_pull(
                Coord::from_raw(3, 2),
                Coord::from_raw(3, 3),
            ))
            .unwrap();
        state.cancel_displacement().unwrap();

        assert_eq!(state.canonical_key(), before);
        assert_eq!(state.move_points_remaining(), 4);
        assert!(state.history().is_empty());
    }

    #[test]
    fn pull_requires_a_strictly_stronger_attacker() {
        // The dog keeps the gold cat unfrozen, so the rejection comes from
        // the equal rank of the target, not from a freeze.
        let mut state = state_with(
            &[
                (3, 2, Color::Gold, PieceKind::Cat),
                (4, 2, Color::Gold, PieceKind::Dog),
                (3, 3, Color::Silver, PieceKind::Cat),
                (7, 0, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );

        let result = state.submit(MoveRequest::pre_pull(
            Coord::from_raw(3, 2),
            Coord::from_raw(3, 3),
        ));
        assert!(matches!(
            result,
            Err(Error::IllegalDestination {
                kind: MoveKind::PrePull,
                ..
            })
        ));
    }
}

mod trap_captures {
    use super::*;

    #[test]
    fn unguarded_piece_is_captured_on_a_trap() {
        let mut state = state_with(
            &[
                (3, 2, Color::Gold, PieceKind::Dog),
                (7, 0, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );

        let outcome = state
            .submit(MoveRequest::simple(
                Coord::from_raw(3, 2),
                Coord::from_raw(2, 2),
            ))
            .unwrap();

        assert_eq!(
            outcome.captures,
            vec![Capture {
                piece: Piece::new(Color::Gold, PieceKind::Dog),
                at: Coord::from_raw(2, 2),
            }]
        );
        assert!(state.board().piece_at(Coord::from_raw(2, 2)).is_none());
        assert!(state.winner().is_none());
    }

    #[test]
    fn guarded_piece_survives_the_trap() {
        let mut state = state_with(
            &[
                (3, 2, Color::Gold, PieceKind::Dog),
                (2, 1, Color::Gold, PieceKind::Cat),
                (7, 0, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );

        let outcome = state
            .submit(MoveRequest::simple(
                Coord::from_raw(3, 2),
                Coord::from_raw(2, 2),
            ))
            .unwrap();

        assert!(outcome.captures.is_empty());
        assert_eq!(
            state.board().piece_at(Coord::from_raw(2, 2)),
            Some(Piece::new(Color::Gold, PieceKind::Dog))
        );
    }

    #[test]
    fn capturing_the_last_rabbit_ends_the_game_at_once() {
        // Gold walks its only rabbit onto an undefended trap; the capture and
        // the elimination verdict arrive in the same outcome.
        let mut state = state_with(
            &[
                (3, 2, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );

        let outcome = state
            .submit(MoveRequest::simple(
                Coord::from_raw(3, 2),
                Coord::from_raw(2, 2),
            ))
            .unwrap();

        assert_eq!(outcome.captures.len(), 1);
        assert_eq!(outcome.winner, Some((Color::Silver, WinReason::Elimination)));
        assert!(outcome.turn_passed_to.is_none());
        assert!(state.is_over());
    }

    #[test]
    fn sweep_is_idempotent() {
        let mut state = state_with(
            &[
                (2, 2, Color::Gold, PieceKind::Dog),
                (7, 0, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );

        assert_eq!(state.resolve_trap_captures().len(), 1);
        assert!(
            state.resolve_trap_captures().is_empty(),
            "a second sweep over the same board must remove nothing"
        );
    }
}

mod win_conditions {
    use super::*;

    #[test]
    fn rabbit_on_the_goal_row_wins() {
        let mut state = state_with(
            &[
                (1, 4, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );

        let outcome = state
            .submit(MoveRequest::simple(
                Coord::from_raw(1, 4),
                Coord::from_raw(0, 4),
            ))
            .unwrap();

        assert_eq!(outcome.winner, Some((Color::Gold, WinReason::Goal)));
        assert!(outcome.turn_passed_to.is_none());
        assert!(state.is_over());
    }

    #[test]
    fn finished_game_rejects_further_moves() {
        let mut state = state_with(
            &[
                (1, 4, Color::Gold, PieceKind::Rabbit),
                (0, 7, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );
        state
            .submit(MoveRequest::simple(
                Coord::from_raw(1, 4),
                Coord::from_raw(0, 4),
            ))
            .unwrap();

        let result = state.submit(MoveRequest::simple(
            Coord::from_raw(0, 7),
            Coord::from_raw(1, 7),
        ));
        assert!(matches!(result, Err(Error::GameOver)));
        assert_eq!(state.outcome(), Some((Color::Gold, WinReason::Goal)));
    }

    #[test]
    fn frozen_opponent_loses_by_immobilization() {
        // Silver's lone rabbit is frozen by the adjacent elephant; any
        // finalized gold step ends the game.
        let mut state = state_with(
            &[
                (1, 0, Color::Gold, PieceKind::Elephant),
                (7, 7, Color::Gold, PieceKind::Rabbit),
                (0, 0, Color::Silver, PieceKind::Rabbit),
            ],
            Color::Gold,
        );

        let outcome = state
            .submit(MoveRequest::simple(
                Coord::from_raw(7, 7),
                Coord::from_raw(6, 7),
            ))
            .unwrap();

        assert_eq!(
            outcome.winner,
            Some((Color::Gold, WinReason::Immobilization))
        );
    }

    #[test]
    fn elimination_checks_the_opponent_first() {
        // Neither side has a rabbit; whoever is to move is the winner.
        let gold_to_move = state_with(
            &[
                (3, 3, Color::Gold, PieceKind::Elephant),
                (4, 6, Color::Silver, PieceKind::Elephant),
            ],
            Color::Gold,
        );
        assert_eq!(
            gold_to_move.evaluate_win_condition(),
            Some((Color::Gold, WinReason::Elimination))
        );

        let silver_to_move = state_with(
            &[
                (3, 3, Color::Gold, PieceKind::Elephant),
                (4, 6, Color::Silver, PieceKind::Elephant),
            ],
            Color::Silver,
        );
        assert_eq!(
            silver_to_move.evaluate_win_condition(),
            Some((Color::Silver, WinReason::Elimination))
        );
    }
}
