//! Takeback ledger: a stack of board snapshots.

use crate::{Board, Coord};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A board as it stood after one placement, with the placement itself.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Snapshot {
    /// Independent copy of the board.
    board: Board,
    /// The placement that produced this board, `None` for the opening position.
    last_move: Option<Coord>,
}

/// Append-only snapshot stack supporting single-step takeback.
///
/// Entry 0 is the opening position and is never popped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<Snapshot>,
}

impl History {
    /// Starts a ledger with `initial` as entry 0.
    #[instrument(skip(initial))]
    pub fn new(initial: &Board) -> Self {
        Self {
            entries: vec![Snapshot {
                board: initial.clone(),
                last_move: None,
            }],
        }
    }

    /// Appends a copy of `board`.
    #[instrument(skip(self, board))]
    pub fn record(&mut self, board: &Board, last_move: Option<Coord>) {
        self.entries.push(Snapshot {
            board: board.clone(),
            last_move,
        });
        debug!(entries = self.entries.len(), "Recorded snapshot");
    }

    /// True when there is an earlier state to return to.
    pub fn can_undo(&self) -> bool {
        self.entries.len() >= 2
    }

    /// Drops the newest snapshot and returns the one now on top.
    ///
    /// Returns `None` (and changes nothing) when [`can_undo`](Self::can_undo) is false.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            debug!("Nothing to undo");
            return None;
        }
        self.entries.pop();
        self.entries.last()
    }

    /// Snapshot on top of the stack.
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    /// Number of recorded snapshots, including the opening position.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a ledger built with [`History::new`].
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.entries
    }

    /// Placements in the order they were made.
    pub fn moves(&self) -> impl Iterator<Item = Coord> + '_ {
        self.entries.iter().filter_map(|s| s.last_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stone;

    #[test]
    fn test_fresh_ledger_cannot_undo() {
        let mut history = History::new(&Board::new(15));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_snapshots_are_not_aliased() {
        let mut board = Board::new(15);
        let mut history = History::new(&board);
        board.place(Coord::new(7, 7), Stone::Black).unwrap();
        history.record(&board, Some(Coord::new(7, 7)));
        board.place(Coord::new(8, 8), Stone::White).unwrap();

        let top = history.current().unwrap();
        assert_eq!(top.board().occupied(), 1);
        assert_eq!(*top.last_move(), Some(Coord::new(7, 7)));
    }

    #[test]
    fn test_undo_returns_previous_state() {
        let mut board = Board::new(15);
        let mut history = History::new(&board);
        board.place(Coord::new(1, 1), Stone::Black).unwrap();
        history.record(&board, Some(Coord::new(1, 1)));
        board.place(Coord::new(2, 2), Stone::White).unwrap();
        history.record(&board, Some(Coord::new(2, 2)));

        let previous = history.undo().unwrap().clone();
        assert_eq!(*previous.last_move(), Some(Coord::new(1, 1)));
        assert_eq!(previous.board().occupied(), 1);
        assert_eq!(history.len(), 2);

        let opening = history.undo().unwrap().clone();
        assert_eq!(*opening.last_move(), None);
        assert_eq!(opening.board(), &Board::new(15));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_moves_in_order() {
        let board = Board::new(9);
        let mut history = History::new(&board);
        history.record(&board, Some(Coord::new(0, 1)));
        history.record(&board, Some(Coord::new(2, 3)));
        let moves: Vec<_> = history.moves().collect();
        assert_eq!(moves, vec![Coord::new(0, 1), Coord::new(2, 3)]);
    }

    #[test]
    fn test_ledger_json_shape() {
        let mut board = Board::new(5);
        let mut history = History::new(&board);
        board.place(Coord::new(3, 4), Stone::Black).unwrap();
        history.record(&board, Some(Coord::new(3, 4)));

        let json = serde_json::to_value(&history).unwrap();
        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0]["last_move"].is_null());
        assert_eq!(entries[1]["last_move"]["x"], 3);
        assert_eq!(entries[1]["board"]["size"], 5);
    }
}
