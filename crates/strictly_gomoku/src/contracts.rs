//! Contract-based validation for five-in-a-row.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::invariants::{GomokuInvariants, InvariantSet};
use super::typestate::GameInProgress;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: It must be the color's turn.
pub struct StonesTurn;

impl StonesTurn {
    /// Fails with [`MoveError::WrongStone`] when `mov` is played out of turn.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if mov.stone != game.to_move() {
            Err(MoveError::WrongStone(mov.stone))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The coordinate must be on the board.
pub struct OnBoard;

impl OnBoard {
    /// Fails with [`MoveError::OutOfRange`] for coordinates off the board.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        let size = game.board().size();
        if mov.coord.x >= size || mov.coord.y >= size {
            Err(MoveError::OutOfRange {
                coord: mov.coord,
                size,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: The target cell must be empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`MoveError::CellOccupied`] when a stone is already there.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if !game.board().is_empty(mov.coord) {
            Err(MoveError::CellOccupied(mov.coord))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: right color, on the board, empty cell.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        StonesTurn::check(mov, game)?;
        OnBoard::check(mov, game)?;
        CellIsEmpty::check(mov, game)?;
        Ok(())
    }
}

fn check_invariants(game: &GameInProgress) -> Result<(), MoveError> {
    GomokuInvariants::check_all(game).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Postcondition failed");
        MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placing a stone.
///
/// Postconditions: exactly one snapshot added, all game invariants hold.
pub struct MoveContract;

impl Contract<GameInProgress, Move> for MoveContract {
    fn pre(game: &GameInProgress, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &GameInProgress, after: &GameInProgress) -> Result<(), MoveError> {
        if after.history().len() != before.history().len() + 1 {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: move must add exactly one snapshot".to_string(),
            ));
        }
        check_invariants(after)
    }
}

// ─────────────────────────────────────────────────────────────
//  Takeback Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for taking back the most recent stone.
///
/// Precondition: the ledger has an earlier state.
/// Postconditions: exactly one snapshot removed, all game invariants hold.
pub struct TakebackContract;

impl Contract<GameInProgress, ()> for TakebackContract {
    fn pre(game: &GameInProgress, _action: &()) -> Result<(), MoveError> {
        if game.can_undo() {
            Ok(())
        } else {
            Err(MoveError::NothingToUndo)
        }
    }

    fn post(before: &GameInProgress, after: &GameInProgress) -> Result<(), MoveError> {
        if after.history().len() + 1 != before.history().len() {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: takeback must remove exactly one snapshot".to_string(),
            ));
        }
        check_invariants(after)
    }
}
