//! Error types for session commands.

use derive_more::{Display, Error};
use tracing::instrument;

/// Why a session command was refused.
///
/// Every variant is an expected, user-facing outcome except
/// [`SessionError::UndoFailed`] and [`SessionError::StateCorrupted`], which
/// signal broken internal state.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// `start` while a session already exists for the key.
    #[display("A game is already running here!")]
    SessionAlreadyActive,

    /// `join` with no session open.
    #[display("No game is open here. Start one with /gomoku_pvp first!")]
    SessionNotFound,

    /// `join` by someone already on the roster.
    #[display("You have already joined this game!")]
    AlreadyJoined,

    /// `join` when both seats are taken.
    #[display("The game is full!")]
    SessionFull,

    /// Command needs a session and there is none.
    #[display("There is no game in progress!")]
    NoActiveSession,

    /// Move before the second player joined.
    #[display("The game has not started yet, waiting for players to join...")]
    GameNotFull,

    /// Sender is not on the roster.
    #[display("You are not a player in this game!")]
    NotAParticipant,

    /// Move out of turn.
    #[display("It is {current}'s turn!")]
    NotYourTurn {
        /// Display name of the player on turn.
        current: String,
    },

    /// Move argument is not an `(x,y)` pair.
    #[display("Send a coordinate as (x,y), e.g. (7,7) is column 7, row 7. Got {input:?}")]
    MalformedCoordinate {
        /// Raw argument as received.
        input: String,
    },

    /// Coordinate is off the board.
    #[display("Coordinate ({x},{y}) is off the board! Both values must be within 0-{max}")]
    CoordinateOutOfRange {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// Largest valid value.
        max: usize,
    },

    /// Target cell already holds a stone.
    #[display("({x},{y}) is already taken!")]
    CellOccupied {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },

    /// Takeback requested by the player on turn.
    #[display("It is your turn, you cannot ask for a takeback now!")]
    NotOpponentsTurnToRequest,

    /// Takeback requested at the opening position.
    #[display("There is nothing to take back!")]
    NothingToUndo,

    /// Accept/reject without an open request.
    #[display("There is no pending takeback request!")]
    NoPendingUndo,

    /// Requester tried to answer their own request.
    #[display("You cannot answer your own takeback request!")]
    CannotApproveOwnRequest,

    /// The ledger refused a takeback that had been checked as possible.
    #[display("Takeback failed, could not return to the previous position: {reason}")]
    UndoFailed {
        /// Ledger error.
        reason: String,
    },

    /// A move postcondition failed.
    #[display("Game state check failed: {reason}")]
    StateCorrupted {
        /// Violated invariants.
        reason: String,
    },
}

impl SessionError {
    /// True for errors that indicate a bug rather than a user mistake.
    #[instrument]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            SessionError::UndoFailed { .. } | SessionError::StateCorrupted { .. }
        )
    }
}
