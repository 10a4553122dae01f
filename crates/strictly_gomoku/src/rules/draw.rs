//! Draw detection for five-in-a-row.

use super::win::check_win;
use crate::{Board, Coord};
use tracing::instrument;

/// Checks if the board is full (no empty cell left).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A full board is a draw unless the final stone at `last` completed five.
#[instrument(skip(board))]
pub fn is_draw(board: &Board, last: Coord) -> bool {
    is_full(board) && !check_win(board, last)
}
