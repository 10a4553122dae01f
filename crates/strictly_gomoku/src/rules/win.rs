//! Win detection: five or more contiguous stones through the last placement.

use crate::{Board, Cell, Coord};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Contiguous stones needed to win. Overlines count.
pub const WIN_LENGTH: usize = 5;

/// The four undirected lines through a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Bottom-left to top-right.
    AntiDiagonal,
}

impl Axis {
    /// Unit step in the axis' forward direction; the backward step is its negation.
    pub fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (1, 0),
            Axis::Vertical => (0, 1),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// Length of the same-colored run through `coord` along `axis`.
///
/// Returns 0 when `coord` is empty or off the board.
#[instrument(skip(board))]
pub fn run_length(board: &Board, coord: Coord, axis: Axis) -> usize {
    let Some(Cell::Occupied(stone)) = board.get(coord) else {
        return 0;
    };
    let (dx, dy) = axis.step();
    let mut count = 1;
    for sign in [1, -1] {
        count += (1..)
            .map_while(|distance| coord.offset(dx * sign, dy * sign, distance, board.size()))
            .take_while(|c| board.get(*c) == Some(Cell::Occupied(stone)))
            .count();
    }
    count
}

/// Checks whether the stone at `coord` completes a line of [`WIN_LENGTH`].
///
/// Only lines through `coord` are examined, so this must be called right
/// after every placement.
#[instrument(skip(board))]
pub fn check_win(board: &Board, coord: Coord) -> bool {
    Axis::iter().any(|axis| run_length(board, coord, axis) >= WIN_LENGTH)
}
