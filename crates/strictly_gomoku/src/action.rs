//! First-class action types for five-in-a-row.
//!
//! Moves are domain events, not side effects. They represent the player's
//! intent and are validated against the game before anything is mutated.

use super::{Coord, Stone};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A stone placed at a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Color being placed.
    pub stone: Stone,
    /// Where the stone goes.
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(stone: Stone, coord: Coord) -> Self {
        Self { stone, coord }
    }

    /// Returns the color of this move.
    pub fn stone(&self) -> Stone {
        self.stone
    }

    /// Returns the coordinate of this move.
    pub fn coord(&self) -> Coord {
        self.coord
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.stone, self.coord)
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell already holds a stone.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Coord),

    /// The coordinate is off the board.
    #[display("Coordinate {} is outside the board (0-{})", coord, size.saturating_sub(1))]
    OutOfRange {
        /// Offending coordinate.
        coord: Coord,
        /// Board edge length.
        size: usize,
    },

    /// It's not this color's turn.
    #[display("It's not {}'s turn", _0)]
    WrongStone(Stone),

    /// The ledger holds only the opening position.
    #[display("There is no move to take back")]
    NothingToUndo,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

impl From<crate::BoardError> for MoveError {
    fn from(err: crate::BoardError) -> Self {
        match err {
            crate::BoardError::Occupied(coord) => MoveError::CellOccupied(coord),
            crate::BoardError::OutOfRange { x, y, size } => MoveError::OutOfRange {
                coord: Coord::new(x.max(0) as usize, y.max(0) as usize),
                size,
            },
        }
    }
}
