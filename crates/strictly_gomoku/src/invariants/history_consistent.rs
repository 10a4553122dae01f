//! History consistency invariant: the ledger's top snapshot is the live board.

use super::super::GameInProgress;
use super::Invariant;

/// Invariant: The newest snapshot equals the live board, and the ledger
/// holds one entry per stone plus the opening position.
pub struct HistoryConsistentInvariant;

impl Invariant<GameInProgress> for HistoryConsistentInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let Some(top) = game.history().current() else {
            return false;
        };

        top.board() == game.board() && game.history().len() == game.board().occupied() + 1
    }

    fn description() -> &'static str {
        "Newest snapshot matches the board; one snapshot per stone"
    }
}
