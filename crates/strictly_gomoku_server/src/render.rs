//! Board rendering seam.
//!
//! Image rendering lives outside this crate; anything that can turn a board
//! into a postable artifact implements [`BoardRenderer`]. [`TextRenderer`]
//! is the built-in fallback used by the terminal binary and the tests.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use strictly_gomoku::{Board, Cell, Coord, Stone};
use tracing::{debug, instrument};

/// Opaque reference to a rendered board: text, a file path, a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub struct RenderedBoard(String);

impl RenderedBoard {
    /// Wraps an artifact reference.
    pub fn new(artifact: impl Into<String>) -> Self {
        Self(artifact.into())
    }

    /// The artifact reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Turns a board into something the chat layer can post.
pub trait BoardRenderer {
    /// Renders `board`, marking `highlight` when given.
    fn render(&self, board: &Board, highlight: Option<Coord>) -> Result<RenderedBoard, RenderError>;
}

/// Rendering error.
#[derive(Debug, Clone, Display, Error)]
#[display("Render error: {} at {}:{}", message, file, line)]
pub struct RenderError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RenderError {
    /// Creates a new rendering error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Monospace grid with column and row labels.
///
/// ```text
///       0  1  2
///   0  .  .  .
///   1  . [X] .
///   2  .  O  .
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn symbol(cell: Cell) -> char {
        match cell {
            Cell::Empty => '.',
            Cell::Occupied(Stone::Black) => 'X',
            Cell::Occupied(Stone::White) => 'O',
        }
    }
}

impl BoardRenderer for TextRenderer {
    #[instrument(skip(self, board), fields(size = board.size()))]
    fn render(&self, board: &Board, highlight: Option<Coord>) -> Result<RenderedBoard, RenderError> {
        let size = board.size();
        if let Some(h) = highlight.filter(|h| h.x >= size || h.y >= size) {
            return Err(RenderError::new(format!(
                "highlight {} is outside a {}x{} board",
                h, size, size
            )));
        }

        let fmt_err = |e: std::fmt::Error| RenderError::new(format!("Failed to format board: {}", e));
        let mut out = String::from("   ");
        for x in 0..size {
            write!(out, "{:>3}", x).map_err(fmt_err)?;
        }
        out.push('\n');

        for y in 0..size {
            write!(out, "{:>3} ", y).map_err(fmt_err)?;
            for x in 0..size {
                let coord = Coord::new(x, y);
                let symbol = board.get(coord).map_or('?', Self::symbol);
                if highlight == Some(coord) {
                    write!(out, "[{}]", symbol).map_err(fmt_err)?;
                } else {
                    write!(out, " {} ", symbol).map_err(fmt_err)?;
                }
            }
            out.push('\n');
        }

        debug!(bytes = out.len(), "Board rendered");
        Ok(RenderedBoard(out))
    }
}
