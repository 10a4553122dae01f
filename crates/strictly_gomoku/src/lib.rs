//! Strictly Gomoku - pure five-in-a-row game logic.
//!
//! # Architecture
//!
//! - **Board**: fixed-size grid with value semantics
//! - **Rules**: win detection along four axes, draw detection
//! - **History**: snapshot ledger enabling single-step takeback
//! - **Typestate**: setup, in-progress and finished phases
//! - **Contracts/Invariants**: pre/postconditions checked around every transition
//!
//! # Example
//!
//! ```
//! use strictly_gomoku::{Coord, GameSetup, Move, Placement, Stone};
//!
//! let mut game = GameSetup::new(15).start();
//! let placement = game.make_move(Move::new(Stone::Black, Coord::new(7, 7)))?;
//! assert_eq!(placement, Placement::Continues { next: Stone::White });
//! # Ok::<(), strictly_gomoku::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod history;
pub mod invariants;
mod phases;
pub mod rules;
mod typestate;
mod types;

pub use action::{Move, MoveError};
pub use contracts::{CellIsEmpty, Contract, LegalMove, MoveContract, OnBoard, StonesTurn, TakebackContract};
pub use history::{History, Snapshot};
pub use phases::Outcome;
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup, Placement, Takeback};
pub use types::{Board, BoardError, Cell, Coord, DEFAULT_BOARD_SIZE, Stone};
