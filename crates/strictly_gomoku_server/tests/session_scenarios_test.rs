//! End-to-end session scenarios through the session manager.

use strictly_gomoku::{Cell, Coord, Stone};
use strictly_gomoku_server::{
    Announcement, GomokuConfig, MoveInput, OutputEvent, PlayerId, SessionError, SessionKey,
    SessionManager, Termination,
};

struct Table {
    manager: SessionManager,
    key: SessionKey,
    alice: PlayerId,
    bob: PlayerId,
}

impl Table {
    fn with_config(config: GomokuConfig) -> Self {
        let manager = SessionManager::new(&config);
        let key = SessionKey::group("G");
        let alice = PlayerId::member("G", "1001");
        let bob = PlayerId::member("G", "2002");
        manager.start(&key).expect("Start");
        manager.join(&key, &alice, Some("Alice")).expect("Alice joins");
        manager.join(&key, &bob, Some("Bob")).expect("Bob joins");
        Self {
            manager,
            key,
            alice,
            bob,
        }
    }

    fn new() -> Self {
        Self::with_config(GomokuConfig::default())
    }

    fn play(&self, player: &PlayerId, x: i64, y: i64) -> Result<strictly_gomoku_server::Outcome, SessionError> {
        self.manager.play(&self.key, player, &MoveInput::At { x, y })
    }
}

#[test]
fn test_occupied_cell_leaves_state_unchanged() {
    let t = Table::new();
    t.play(&t.alice, 7, 7).expect("Black at center");

    let before = t.manager.snapshot(&t.key).expect("Live session");
    assert_eq!(
        t.play(&t.bob, 7, 7).unwrap_err(),
        SessionError::CellOccupied { x: 7, y: 7 }
    );
    assert_eq!(t.manager.snapshot(&t.key), Some(before));

    let outcome = t.play(&t.bob, 8, 8).expect("White move");
    assert_eq!(
        outcome.announcements().last(),
        Some(&Announcement::TurnPassed {
            next: "Alice".into(),
            stone: Stone::Black
        })
    );

    let snap = t.manager.snapshot(&t.key).expect("Live session");
    assert_eq!(snap.current_turn, Some(t.alice.clone()));
    let board = snap.board.expect("Board");
    assert_eq!(board.get(Coord::new(7, 7)), Some(Cell::Occupied(Stone::Black)));
    assert_eq!(board.get(Coord::new(8, 8)), Some(Cell::Occupied(Stone::White)));
    assert_eq!(snap.history_len, 3);
}

#[test]
fn test_diagonal_five_wins_and_frees_key() {
    let t = Table::new();
    for i in 0..4 {
        t.play(&t.alice, i, i).expect("Black diagonal");
        t.play(&t.bob, i, 5).expect("White row");
    }
    let outcome = t.play(&t.alice, 4, 4).expect("Winning move");

    assert_eq!(
        outcome.termination(),
        &Some(Termination::Won {
            winner: t.alice.clone()
        })
    );
    assert!(matches!(
        outcome.events()[0],
        OutputEvent::ShowBoard {
            highlight: Some(Coord { x: 4, y: 4 }),
            ..
        }
    ));
    assert_eq!(
        outcome.announcements().last(),
        Some(&Announcement::Won {
            winner: "Alice".into(),
            coord: Coord::new(4, 4)
        })
    );

    assert!(t.manager.snapshot(&t.key).is_none());
    assert_eq!(
        t.play(&t.bob, 10, 10).unwrap_err(),
        SessionError::NoActiveSession
    );
    assert!(t.manager.start(&t.key).is_ok());
}

#[test]
fn test_surrender_hands_win_to_opponent() {
    let t = Table::new();
    t.play(&t.alice, 7, 7).unwrap();
    let outcome = t.manager.surrender(&t.key, &t.bob).expect("Surrender");
    assert_eq!(outcome.termination().as_ref().and_then(|r| r.winner()), Some(&t.alice));
    assert_eq!(
        t.play(&t.bob, 1, 1).unwrap_err(),
        SessionError::NoActiveSession
    );
    assert_eq!(
        t.manager.surrender(&t.key, &t.alice).unwrap_err(),
        SessionError::NoActiveSession
    );
}

#[test]
fn test_takeback_round_trip() {
    let t = Table::new();
    t.play(&t.alice, 7, 7).unwrap();
    let after_black = t.manager.snapshot(&t.key).unwrap();
    t.play(&t.bob, 8, 8).unwrap();

    assert_eq!(
        t.manager.request_undo(&t.key, &t.alice).unwrap_err(),
        SessionError::NotOpponentsTurnToRequest
    );
    t.manager.request_undo(&t.key, &t.bob).expect("Bob asks");
    assert_eq!(
        t.manager.accept_undo(&t.key, &t.bob).unwrap_err(),
        SessionError::CannotApproveOwnRequest
    );

    let outcome = t.manager.accept_undo(&t.key, &t.alice).expect("Alice agrees");
    assert_eq!(outcome.board().map(|(_, h)| h), Some(Some(Coord::new(7, 7))));

    let restored = t.manager.snapshot(&t.key).unwrap();
    assert_eq!(restored.board, after_black.board);
    assert_eq!(restored.history_len, after_black.history_len);
    assert_eq!(restored.current_turn, Some(t.bob.clone()));
    assert_eq!(restored.pending_undo, None);

    assert_eq!(
        t.manager.accept_undo(&t.key, &t.alice).unwrap_err(),
        SessionError::NoPendingUndo
    );
    t.play(&t.bob, 8, 8).expect("Bob replays the same cell");
}

#[test]
fn test_takeback_to_empty_board() {
    let t = Table::new();
    t.play(&t.alice, 0, 0).unwrap();
    t.manager.request_undo(&t.key, &t.alice).expect("Alice asks");
    t.manager.accept_undo(&t.key, &t.bob).expect("Bob agrees");

    let snap = t.manager.snapshot(&t.key).unwrap();
    assert_eq!(snap.history_len, 1);
    assert_eq!(snap.current_turn, Some(t.alice.clone()));
    assert_eq!(
        t.manager.request_undo(&t.key, &t.bob).unwrap_err(),
        SessionError::NothingToUndo
    );
}

#[test]
fn test_draw_on_small_board() {
    let t = Table::with_config(GomokuConfig::default().with_board_size(5));
    let rows = ["WWBBW", "BBWWB", "WWBBW", "BBWWB", "WWBBB"];
    let mut blacks = Vec::new();
    let mut whites = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let cell = (x as i64, y as i64);
            if ch == 'B' {
                blacks.push(cell);
            } else {
                whites.push(cell);
            }
        }
    }

    let mut whites = whites.into_iter();
    let mut last = None;
    for (x, y) in blacks {
        last = Some(t.play(&t.alice, x, y).expect("Black move"));
        if let Some((wx, wy)) = whites.next() {
            t.play(&t.bob, wx, wy).expect("White move");
        }
    }

    let outcome = last.expect("At least one move");
    assert_eq!(outcome.termination(), &Some(Termination::Draw));
    assert_eq!(outcome.announcements().last(), Some(&Announcement::Draw));
    assert!(t.manager.snapshot(&t.key).is_none());
}

#[test]
fn test_out_of_range_respects_board_size() {
    let t = Table::with_config(GomokuConfig::default().with_board_size(9));
    assert_eq!(
        t.play(&t.alice, 9, 0).unwrap_err(),
        SessionError::CoordinateOutOfRange { x: 9, y: 0, max: 8 }
    );
    assert!(t.play(&t.alice, 8, 8).is_ok());
}

#[test]
fn test_private_conversation_session() {
    let manager = SessionManager::default();
    let key = SessionKey::private("dm-1");
    let player = PlayerId::Direct {
        conversation: "dm-1".into(),
    };
    manager.start(&key).unwrap();
    manager.join(&key, &player, None).unwrap();
    assert_eq!(
        manager.join(&key, &player, None).unwrap_err(),
        SessionError::AlreadyJoined
    );
    let outcome = manager.end(&key, &player).unwrap();
    assert_eq!(
        outcome.announcements().next(),
        Some(&Announcement::Ended { by: "dm-1".into() })
    );
}

#[test]
fn test_names_outlive_sessions() {
    let t = Table::new();
    t.manager.end(&t.key, &t.alice).unwrap();
    t.manager.start(&t.key).unwrap();
    let outcome = t.manager.join(&t.key, &t.bob, Some("unknown")).unwrap();
    assert_eq!(
        outcome.announcements().next(),
        Some(&Announcement::PlayerJoined { name: "Bob".into() })
    );
}
