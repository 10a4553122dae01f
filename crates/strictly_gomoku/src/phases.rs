//! Phase marker and outcome types for the game lifecycle.

use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A color completed five in a row.
    Winner(super::Stone),
    /// The board filled up without five in a row.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<super::Stone> {
        match self {
            Outcome::Winner(stone) => Some(*stone),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(stone) => write!(f, "{} wins", stone),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
