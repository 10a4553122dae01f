//! Monotonic history invariant: each move adds exactly one stone.

use super::super::{Cell, GameInProgress, Snapshot};
use super::Invariant;

/// Invariant: The newest snapshot differs from its predecessor by exactly
/// the recorded move.
///
/// Only the top pair is examined. Earlier pairs were checked when they were
/// on top, and a takeback only pops, so checking the whole ledger after
/// every move would repeat work that grows with the game.
pub struct MonotonicHistoryInvariant;

/// True when `next` is `prev` plus one stone at `next`'s recorded move.
fn adds_one_stone(prev: &Snapshot, next: &Snapshot) -> bool {
    let Some(coord) = *next.last_move() else {
        return false;
    };
    let (before, after) = (prev.board(), next.board());
    let size = after.size();
    if before.size() != size || coord.x >= size || coord.y >= size {
        return false;
    }

    let placed = coord.y * size + coord.x;
    before
        .cells()
        .iter()
        .zip(after.cells())
        .enumerate()
        .all(|(i, (b, a))| {
            if i == placed {
                *b == Cell::Empty && matches!(a, Cell::Occupied(_))
            } else {
                b == a
            }
        })
}

impl Invariant<GameInProgress> for MonotonicHistoryInvariant {
    fn holds(game: &GameInProgress) -> bool {
        match game.history().snapshots() {
            [] => false,
            [opening] => opening.last_move().is_none(),
            [.., prev, next] => adds_one_stone(prev, next),
        }
    }

    fn description() -> &'static str {
        "Newest snapshot adds exactly one stone at its recorded move"
    }
}
