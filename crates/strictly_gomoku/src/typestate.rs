//! Phase-specific game structs for five-in-a-row.
//!
//! Each phase is its own type with phase-specific fields. A `GameFinished`
//! always carries an [`Outcome`]; only a `GameInProgress` accepts moves or
//! takebacks.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract, TakebackContract};
use super::history::History;
use super::phases::Outcome;
use super::{Board, Coord, Stone};
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - board chosen, nobody has moved.
#[derive(Debug, Clone)]
pub struct GameSetup {
    board: Board,
}

impl GameSetup {
    /// Creates a new game in setup phase on a `size × size` board.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts the game (consumes setup, returns in-progress).
    ///
    /// The opening position becomes history entry 0 and Black moves first.
    #[instrument(skip(self))]
    pub fn start(self) -> GameInProgress {
        let history = History::new(&self.board);
        GameInProgress {
            board: self.board,
            history,
            to_move: Stone::Black,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// What a successful placement led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Play goes on with `next` to move.
    Continues {
        /// Color now on turn.
        next: Stone,
    },
    /// The placement ended the game.
    Finished(Outcome),
}

/// A stone removed by an accepted takeback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Takeback {
    /// Position of the removed stone.
    pub undone: Coord,
    /// Placement now on top of the ledger, `None` at the opening position.
    pub last_move: Option<Coord>,
    /// Color on turn after the takeback (the owner of the removed stone).
    pub to_move: Stone,
}

/// Game in progress - accepts moves and takebacks.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(super) board: Board,
    pub(super) history: History,
    pub(super) to_move: Stone,
}

impl GameInProgress {
    /// Places a stone.
    ///
    /// All preconditions are checked before the board is touched, and a
    /// failed postcondition rolls the game back, so an error leaves the game
    /// exactly as it was. After a placement that
    /// does not end the game, the turn passes to the other color.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn make_move(&mut self, action: Move) -> Result<Placement, MoveError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        MoveContract::pre(self, &action)?;

        self.board.place(action.coord, action.stone)?;
        self.history.record(&self.board, Some(action.coord));

        if super::rules::check_win(&self.board, action.coord) {
            info!(winner = %action.stone, coord = %action.coord, "Five in a row");
            return Ok(Placement::Finished(Outcome::Winner(action.stone)));
        }

        if super::rules::is_full(&self.board) {
            info!(coord = %action.coord, "Board full without five in a row");
            return Ok(Placement::Finished(Outcome::Draw));
        }

        self.to_move = self.to_move.opponent();

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(&before, self) {
            *self = before;
            return Err(e);
        }

        debug!(next = %self.to_move, "Move applied");
        Ok(Placement::Continues { next: self.to_move })
    }

    /// Removes the most recent stone and gives the turn back to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NothingToUndo`] at the opening position. A failed
    /// postcondition rolls the game back and returns
    /// [`MoveError::InvariantViolation`].
    #[instrument(skip(self))]
    pub fn takeback(&mut self) -> Result<Takeback, MoveError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        TakebackContract::pre(self, &())?;

        let undone = self
            .last_move()
            .ok_or(MoveError::NothingToUndo)?;
        let Some(super::Cell::Occupied(owner)) = self.board.get(undone) else {
            return Err(MoveError::InvariantViolation(format!(
                "last move {} has no stone on the board",
                undone
            )));
        };
        let restored = self.history.undo().ok_or(MoveError::NothingToUndo)?;
        let last_move = *restored.last_move();
        self.board = restored.board().clone();
        self.to_move = owner;

        #[cfg(debug_assertions)]
        if let Err(e) = TakebackContract::post(&before, self) {
            *self = before;
            return Err(e);
        }

        info!(%undone, to_move = %owner, "Move taken back");
        Ok(Takeback {
            undone,
            last_move,
            to_move: owner,
        })
    }

    /// Returns the color to move.
    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the snapshot ledger.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the most recent placement, if any.
    pub fn last_move(&self) -> Option<Coord> {
        self.history.current().and_then(|s| *s.last_move())
    }

    /// True when a takeback is possible.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Freezes the game with its outcome.
    #[instrument(skip(self))]
    pub fn finish(self, outcome: Outcome) -> GameFinished {
        GameFinished {
            board: self.board,
            history: self.history,
            outcome,
        }
    }

    /// Replays moves from an empty board of the given size.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(size: usize, moves: &[Move]) -> Result<GameResult, MoveError> {
        let mut game = GameSetup::new(size).start();

        for action in moves {
            if let Placement::Finished(outcome) = game.make_move(*action)? {
                return Ok(GameResult::Finished(game.finish(outcome)));
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
#[derive(Debug, Clone)]
pub struct GameFinished {
    board: Board,
    history: History,
    outcome: Outcome,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the final board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the snapshot ledger.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the placement that ended the game.
    pub fn last_move(&self) -> Option<Coord> {
        self.history.current().and_then(|s| *s.last_move())
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of a replay.
#[derive(Debug)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
