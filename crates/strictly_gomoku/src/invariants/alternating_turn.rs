//! Alternating turn invariant: Black, White, Black, White, ...

use super::super::{GameInProgress, Stone};
use super::Invariant;

/// Invariant: Stone counts match alternating play.
///
/// Black moves first, so Black has either as many stones as White (Black
/// to move) or exactly one more (White to move).
pub struct AlternatingTurnInvariant;

impl Invariant<GameInProgress> for AlternatingTurnInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let black = game.board().stone_count(Stone::Black);
        let white = game.board().stone_count(Stone::White);

        match game.to_move() {
            Stone::Black => black == white,
            Stone::White => black == white + 1,
        }
    }

    fn description() -> &'static str {
        "Stone counts match alternating turns (Black first)"
    }
}
