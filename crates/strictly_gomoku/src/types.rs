//! Core domain types for five-in-a-row.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Default board edge length.
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// Stone color. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Stone {
    /// First player.
    #[display("Black")]
    Black,
    /// Second player.
    #[display("White")]
    White,
}

impl Stone {
    /// Returns the other color.
    pub fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Stone for a roster slot: slot 0 plays Black, anything else White.
    pub fn for_slot(slot: usize) -> Self {
        if slot == 0 { Stone::Black } else { Stone::White }
    }

    /// Roster slot that plays this color.
    pub fn slot(self) -> usize {
        match self {
            Stone::Black => 0,
            Stone::White => 1,
        }
    }
}

/// A single intersection on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No stone.
    Empty,
    /// Occupied by a stone.
    Occupied(Stone),
}

/// Board coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("({x},{y})")]
pub struct Coord {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Coord {
    /// Creates a coordinate without range checks.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Validates signed user input against a board size.
    #[instrument]
    pub fn from_signed(x: i64, y: i64, size: usize) -> Result<Self, BoardError> {
        let in_range = |v: i64| v >= 0 && (v as u64) < size as u64;
        if in_range(x) && in_range(y) {
            Ok(Self::new(x as usize, y as usize))
        } else {
            Err(BoardError::OutOfRange { x, y, size })
        }
    }

    /// Steps `distance` cells along `(dx, dy)`, staying inside `size`.
    pub fn offset(self, dx: isize, dy: isize, distance: usize, size: usize) -> Option<Self> {
        let step = |v: usize, d: isize| -> Option<usize> {
            let shifted = (v as isize).checked_add(d.checked_mul(distance as isize)?)?;
            (shifted >= 0 && (shifted as usize) < size).then_some(shifted as usize)
        };
        Some(Self::new(step(self.x, dx)?, step(self.y, dy)?))
    }
}

/// Errors raised by direct board mutation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardError {
    /// Coordinate lies outside the board.
    #[display("Coordinate ({x},{y}) is outside the board (0-{})", size.saturating_sub(1))]
    OutOfRange {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// Board edge length.
        size: usize,
    },
    /// The intersection already holds a stone.
    #[display("Cell {_0} is already occupied")]
    Occupied(Coord),
}

impl std::error::Error for BoardError {}

/// Square Gomoku board, row-major.
///
/// Cloning yields an independent copy, which is what the history ledger
/// relies on for its snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board of `size × size` cells.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.x < self.size && coord.y < self.size).then(|| coord.y * self.size + coord.x)
    }

    /// Cell at `coord`, or `None` when off the board.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Checks whether `coord` is on the board and empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Empty))
    }

    /// Places `stone` on an empty, in-range cell.
    pub fn place(&mut self, coord: Coord, stone: Stone) -> Result<(), BoardError> {
        let index = self.index(coord).ok_or(BoardError::OutOfRange {
            x: coord.x as i64,
            y: coord.y as i64,
            size: self.size,
        })?;
        if self.cells[index] != Cell::Empty {
            return Err(BoardError::Occupied(coord));
        }
        self.cells[index] = Cell::Occupied(stone);
        Ok(())
    }

    /// True when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Number of stones of one color.
    pub fn stone_count(&self, stone: Stone) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(stone))
            .count()
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Formats the board as a human-readable grid (`X` black, `O` white).
    pub fn display(&self) -> String {
        let mut result = String::new();
        for y in 0..self.size {
            for x in 0..self.size {
                let symbol = match self.cells[y * self.size + x] {
                    Cell::Empty => '.',
                    Cell::Occupied(Stone::Black) => 'X',
                    Cell::Occupied(Stone::White) => 'O',
                };
                result.push(symbol);
            }
            if y + 1 < self.size {
                result.push('\n');
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}
