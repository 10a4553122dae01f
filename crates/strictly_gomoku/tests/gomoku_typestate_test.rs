//! Tests for the gomoku game lifecycle.

use strictly_gomoku::rules::{check_win, is_draw};
use strictly_gomoku::{
    Board, Cell, Coord, GameInProgress, GameResult, GameSetup, Move, MoveError, Outcome, Placement,
    Stone,
};

fn mv(stone: Stone, x: usize, y: usize) -> Move {
    Move::new(stone, Coord::new(x, y))
}

#[test]
fn test_lifecycle_alternates_turns() {
    let mut game = GameSetup::new(15).start();
    assert_eq!(game.to_move(), Stone::Black);

    let coords = [(7, 7), (8, 8), (6, 6), (9, 9), (5, 8)];
    for (i, (x, y)) in coords.into_iter().enumerate() {
        let stone = game.to_move();
        assert_eq!(stone, Stone::for_slot(i % 2));
        let placement = game.make_move(mv(stone, x, y)).expect("Valid move");
        assert_eq!(placement, Placement::Continues { next: stone.opponent() });
    }
    assert_eq!(game.history().len(), coords.len() + 1);
}

#[test]
fn test_wrong_stone_rejected() {
    let mut game = GameSetup::new(15).start();
    let result = game.make_move(mv(Stone::White, 7, 7));
    assert!(matches!(result, Err(MoveError::WrongStone(Stone::White))));
    assert!(game.board().is_empty(Coord::new(7, 7)));
}

#[test]
fn test_replay_to_horizontal_win() {
    let moves = vec![
        mv(Stone::Black, 3, 7),
        mv(Stone::White, 3, 8),
        mv(Stone::Black, 4, 7),
        mv(Stone::White, 4, 8),
        mv(Stone::Black, 5, 7),
        mv(Stone::White, 5, 8),
        mv(Stone::Black, 6, 7),
        mv(Stone::White, 6, 8),
        mv(Stone::Black, 7, 7),
    ];

    match GameInProgress::replay(15, &moves).expect("Valid replay") {
        GameResult::Finished(game) => {
            assert_eq!(game.outcome(), &Outcome::Winner(Stone::Black));
            assert_eq!(game.history().len(), moves.len() + 1);
        }
        GameResult::InProgress(_) => panic!("Game should be finished"),
    }
}

#[test]
fn test_white_four_then_black_blocks() {
    let moves = vec![
        mv(Stone::Black, 0, 14),
        mv(Stone::White, 10, 0),
        mv(Stone::Black, 2, 14),
        mv(Stone::White, 10, 1),
        mv(Stone::Black, 4, 14),
        mv(Stone::White, 10, 2),
        mv(Stone::Black, 6, 14),
        mv(Stone::White, 10, 3),
        mv(Stone::Black, 10, 4),
    ];

    match GameInProgress::replay(15, &moves).expect("Valid replay") {
        GameResult::InProgress(game) => {
            assert!(!check_win(game.board(), Coord::new(10, 3)));
            assert_eq!(game.to_move(), Stone::White);
        }
        GameResult::Finished(_) => panic!("Nobody has five"),
    }
}

#[test]
fn test_draw_on_small_board() {
    // Final 5x5 position with no five for either color: 13 black, 12 white.
    let rows = ["WWBBW", "BBWWB", "WWBBW", "BBWWB", "WWBBB"];
    let mut blacks = Vec::new();
    let mut whites = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            if ch == 'B' {
                blacks.push((x, y));
            } else {
                whites.push((x, y));
            }
        }
    }
    assert_eq!(blacks.len(), 13);
    assert_eq!(whites.len(), 12);

    let mut moves = Vec::new();
    let mut whites = whites.into_iter();
    for (x, y) in blacks {
        moves.push(mv(Stone::Black, x, y));
        if let Some((wx, wy)) = whites.next() {
            moves.push(mv(Stone::White, wx, wy));
        }
    }

    match GameInProgress::replay(5, &moves).expect("Valid replay") {
        GameResult::Finished(game) => {
            assert_eq!(game.outcome(), &Outcome::Draw);
            assert!(game.board().is_full());
            assert_eq!(game.last_move(), Some(Coord::new(4, 4)));
        }
        GameResult::InProgress(_) => panic!("Board should be full"),
    }
}

#[test]
fn test_is_draw_requires_full_board() {
    let mut board = Board::new(5);
    board.place(Coord::new(0, 0), Stone::Black).unwrap();
    assert!(!is_draw(&board, Coord::new(0, 0)));
    assert_eq!(board.get(Coord::new(0, 0)), Some(Cell::Occupied(Stone::Black)));
}

#[test]
fn test_takeback_then_replay_same_cell() {
    let mut game = GameSetup::new(15).start();
    game.make_move(mv(Stone::Black, 7, 7)).unwrap();
    let takeback = game.takeback().unwrap();
    assert_eq!(takeback.to_move, Stone::Black);
    assert_eq!(takeback.last_move, None);
    assert!(game.board().is_empty(Coord::new(7, 7)));

    let placement = game.make_move(mv(Stone::Black, 7, 7)).unwrap();
    assert_eq!(placement, Placement::Continues { next: Stone::White });
}
