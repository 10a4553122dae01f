//! Game session state machine: roster, turns and consensual takeback.
//!
//! A session lives under one [`SessionKey`]. It waits for two players, then
//! owns an in-progress game until a win, a draw, a resignation or an explicit
//! end. Every transition validates completely before it mutates anything, so
//! a refused command leaves the session untouched.

use crate::{
    Announcement, IdentityRegistry, MoveInput, Outcome, PlayerId, SessionError, SessionKey,
    Termination,
};
use strictly_gomoku::{
    Board, Cell, Coord, GameInProgress, GameSetup, Move, MoveError, Outcome as GameOutcome, Placement,
    Stone,
};
use tracing::{debug, error, info, instrument, warn};

/// Seats in a session.
pub const MAX_PLAYERS: usize = 2;

/// A game session between two players.
#[derive(Debug, Clone)]
pub struct GameSession {
    key: SessionKey,
    board_size: usize,
    /// Slot 0 plays Black, slot 1 White.
    roster: Vec<PlayerId>,
    /// Present once both seats are taken.
    game: Option<GameInProgress>,
    pending_undo: Option<PlayerId>,
}

impl GameSession {
    /// Opens an empty session.
    #[instrument]
    pub fn new(key: SessionKey, board_size: usize) -> Self {
        info!(session = %key, board_size, "Creating new game session");
        Self {
            key,
            board_size,
            roster: Vec::with_capacity(MAX_PLAYERS),
            game: None,
            pending_undo: None,
        }
    }

    /// Session key.
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Seated players in slot order.
    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    /// True once both players are seated.
    pub fn is_in_progress(&self) -> bool {
        self.game.is_some()
    }

    /// Player whose move is expected; `None` until both are seated.
    pub fn current_turn(&self) -> Option<&PlayerId> {
        let game = self.game.as_ref()?;
        self.roster.get(game.to_move().slot())
    }

    /// Live board, once the game has started.
    pub fn board(&self) -> Option<&Board> {
        self.game.as_ref().map(|g| g.board())
    }

    /// Most recent placement.
    pub fn last_move(&self) -> Option<Coord> {
        self.game.as_ref().and_then(|g| g.last_move())
    }

    /// Number of ledger entries (0 before the game starts).
    pub fn history_len(&self) -> usize {
        self.game.as_ref().map_or(0, |g| g.history().len())
    }

    /// Requester of an open takeback.
    pub fn pending_undo(&self) -> Option<&PlayerId> {
        self.pending_undo.as_ref()
    }

    /// Stone color of a seated player.
    pub fn stone_of(&self, player: &PlayerId) -> Option<Stone> {
        self.slot_of(player).map(Stone::for_slot)
    }

    fn slot_of(&self, player: &PlayerId) -> Option<usize> {
        self.roster.iter().position(|p| p == player)
    }

    fn require_participant(&self, player: &PlayerId) -> Result<usize, SessionError> {
        self.slot_of(player).ok_or_else(|| {
            warn!(session = %self.key, %player, "Command from non-participant");
            SessionError::NotAParticipant
        })
    }

    /// The other seated player, if any.
    fn opponent_of(&self, slot: usize) -> Option<&PlayerId> {
        self.roster.get(1 - slot)
    }

    // ─────────────────────────────────────────────────────────────
    //  Seating
    // ─────────────────────────────────────────────────────────────

    /// Seats `player`. The second seat starts the game with Black to move.
    #[instrument(skip(self, identities), fields(session = %self.key))]
    pub fn join(
        &mut self,
        identities: &IdentityRegistry,
        player: PlayerId,
        name: Option<&str>,
    ) -> Result<Outcome, SessionError> {
        if self.roster.contains(&player) {
            warn!(%player, "Player already seated");
            return Err(SessionError::AlreadyJoined);
        }
        if self.roster.len() >= MAX_PLAYERS {
            warn!(%player, "Session already has 2 players");
            return Err(SessionError::SessionFull);
        }

        identities.register(&player, name);
        let joined = identities.display_name(&player);
        self.roster.push(player);
        info!(slot = self.roster.len() - 1, name = %joined, "Player seated");

        if self.roster.len() < MAX_PLAYERS {
            return Ok(Outcome::announce(Announcement::PlayerJoined { name: joined }));
        }

        self.game = Some(GameSetup::new(self.board_size).start());
        let first = identities.display_name(&self.roster[0]);
        info!(black = %first, white = %joined, "Game started");
        Ok(Outcome::announce(Announcement::GameStarted { joined, first }))
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Places the mover's stone.
    ///
    /// Checks run in this order: game started, participant, turn,
    /// coordinate syntax, range, empty cell.
    #[instrument(skip(self, identities), fields(session = %self.key))]
    pub fn play(
        &mut self,
        identities: &IdentityRegistry,
        player: &PlayerId,
        input: &MoveInput,
    ) -> Result<Outcome, SessionError> {
        let Some(game) = self.game.as_ref() else {
            debug!("Move before both players joined");
            return Err(SessionError::GameNotFull);
        };
        let slot = self.require_participant(player)?;
        let stone = Stone::for_slot(slot);
        if stone != game.to_move() {
            let current = self
                .current_turn()
                .map(|p| identities.display_name(p))
                .unwrap_or_default();
            warn!(%player, %current, "Player tried to move out of turn");
            return Err(SessionError::NotYourTurn { current });
        }

        let (x, y) = match input {
            MoveInput::At { x, y } => (*x, *y),
            MoveInput::Malformed(raw) => {
                debug!(input = %raw, "Malformed coordinate");
                return Err(SessionError::MalformedCoordinate { input: raw.clone() });
            }
        };
        let coord = Coord::from_signed(x, y, self.board_size).map_err(|_| {
            SessionError::CoordinateOutOfRange {
                x,
                y,
                max: self.board_size.saturating_sub(1),
            }
        })?;
        if !game.board().is_empty(coord) {
            debug!(%coord, "Cell occupied");
            return Err(SessionError::CellOccupied { x: coord.x, y: coord.y });
        }

        let game = self.game.as_mut().ok_or(SessionError::GameNotFull)?;
        let placement = game
            .make_move(Move::new(stone, coord))
            .map_err(|e| self.move_error(e))?;
        // A takeback asked before this move would now remove the wrong stone.
        if let Some(requester) = self.pending_undo.take() {
            info!(%requester, "Pending takeback withdrawn by the next move");
        }

        let Some(board) = self.board() else {
            return Err(SessionError::StateCorrupted {
                reason: "game vanished during move".to_string(),
            });
        };
        let outcome = Outcome::show_board(board, Some(coord));
        info!(%player, %coord, %stone, ?placement, "Move completed successfully");

        Ok(match placement {
            Placement::Continues { next } => {
                let next_player = self.roster[next.slot()].clone();
                outcome.then_announce(Announcement::TurnPassed {
                    next: identities.display_name(&next_player),
                    stone: next,
                })
            }
            Placement::Finished(GameOutcome::Winner(_)) => outcome
                .then_announce(Announcement::Won {
                    winner: identities.display_name(player),
                    coord,
                })
                .terminating(Termination::Won {
                    winner: player.clone(),
                }),
            Placement::Finished(GameOutcome::Draw) => outcome
                .then_announce(Announcement::Draw)
                .terminating(Termination::Draw),
        })
    }

    fn move_error(&self, err: MoveError) -> SessionError {
        match err {
            MoveError::CellOccupied(c) => SessionError::CellOccupied { x: c.x, y: c.y },
            MoveError::OutOfRange { coord, size } => SessionError::CoordinateOutOfRange {
                x: coord.x as i64,
                y: coord.y as i64,
                max: size.saturating_sub(1),
            },
            other => {
                error!(session = %self.key, error = %other, "Move rejected after validation");
                SessionError::StateCorrupted {
                    reason: other.to_string(),
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Leaving
    // ─────────────────────────────────────────────────────────────

    /// Resigns; the other seated player, if any, wins.
    #[instrument(skip(self, identities), fields(session = %self.key))]
    pub fn surrender(
        &mut self,
        identities: &IdentityRegistry,
        player: &PlayerId,
    ) -> Result<Outcome, SessionError> {
        let slot = self.require_participant(player)?;
        let winner = self.opponent_of(slot).cloned();
        info!(%player, winner = ?winner, "Player resigned");

        let mut outcome = Outcome::default();
        if let Some(board) = self.board() {
            outcome = Outcome::show_board(board, self.last_move());
        }
        Ok(outcome
            .then_announce(Announcement::Surrendered {
                loser: identities.display_name(player),
                winner: winner.as_ref().map(|w| identities.display_name(w)),
            })
            .terminating(Termination::Surrendered {
                loser: player.clone(),
                winner,
            }))
    }

    /// Closes the session without a winner.
    #[instrument(skip(self, identities), fields(session = %self.key))]
    pub fn end(
        &mut self,
        identities: &IdentityRegistry,
        player: &PlayerId,
    ) -> Result<Outcome, SessionError> {
        self.require_participant(player)?;
        info!(%player, "Game ended by participant");
        Ok(Outcome::announce(Announcement::Ended {
            by: identities.display_name(player),
        })
        .terminating(Termination::Ended { by: player.clone() }))
    }

    // ─────────────────────────────────────────────────────────────
    //  Takeback negotiation
    // ─────────────────────────────────────────────────────────────

    /// Asks the opponent to take back the last stone.
    ///
    /// Only the player waiting for the opponent may ask, which means the
    /// stone in question is always the requester's own latest move.
    #[instrument(skip(self, identities), fields(session = %self.key))]
    pub fn request_undo(
        &mut self,
        identities: &IdentityRegistry,
        player: &PlayerId,
    ) -> Result<Outcome, SessionError> {
        let slot = self.require_participant(player)?;
        if self.current_turn() == Some(player) {
            warn!(%player, "Takeback requested on own turn");
            return Err(SessionError::NotOpponentsTurnToRequest);
        }
        let can_undo = self.game.as_ref().is_some_and(|g| g.can_undo());
        if !can_undo {
            debug!(%player, "Nothing to take back");
            return Err(SessionError::NothingToUndo);
        }
        let Some(opponent) = self.opponent_of(slot).cloned() else {
            return Err(SessionError::NothingToUndo);
        };

        if let Some(previous) = self.pending_undo.replace(player.clone()) {
            debug!(%previous, "Replacing earlier takeback request");
        }
        info!(%player, "Takeback requested");
        Ok(Outcome::announce(Announcement::UndoRequested {
            requester: identities.display_name(player),
            opponent: identities.display_name(&opponent),
        }))
    }

    fn require_responder(&self, player: &PlayerId) -> Result<PlayerId, SessionError> {
        let Some(requester) = self.pending_undo.clone() else {
            return Err(SessionError::NoPendingUndo);
        };
        self.require_participant(player)?;
        if &requester == player {
            warn!(%player, "Player tried to answer own takeback request");
            return Err(SessionError::CannotApproveOwnRequest);
        }
        Ok(requester)
    }

    /// Grants the pending takeback: the last stone is removed and the
    /// requester is on turn again.
    #[instrument(skip(self, identities), fields(session = %self.key))]
    pub fn accept_undo(
        &mut self,
        identities: &IdentityRegistry,
        player: &PlayerId,
    ) -> Result<Outcome, SessionError> {
        let requester = self.require_responder(player)?;
        let requester_stone = self.stone_of(&requester);
        let Some(game) = self.game.as_mut() else {
            error!(%requester, "Pending takeback without a game");
            return Err(SessionError::UndoFailed {
                reason: "no game in progress".to_string(),
            });
        };

        // The turn must land back on the requester, so the stone coming off
        // has to be theirs. Checked before the ledger is touched.
        let top_stone = game.last_move().and_then(|c| game.board().get(c));
        if top_stone.is_none() || top_stone != requester_stone.map(Cell::Occupied) {
            error!(%requester, ?top_stone, "Last stone does not belong to the takeback requester");
            return Err(SessionError::StateCorrupted {
                reason: "last stone does not belong to the takeback requester".to_string(),
            });
        }

        let takeback = game.takeback().map_err(|e| {
            error!(%requester, error = %e, "Ledger refused a checked takeback");
            SessionError::UndoFailed {
                reason: e.to_string(),
            }
        })?;
        let outcome = Outcome::show_board(game.board(), takeback.last_move).then_announce(
            Announcement::UndoAccepted {
                accepter: identities.display_name(player),
                requester: identities.display_name(&requester),
            },
        );
        self.pending_undo = None;

        info!(%player, %requester, undone = %takeback.undone, "Takeback accepted");
        Ok(outcome)
    }

    /// Refuses the pending takeback. The board is left as it is.
    #[instrument(skip(self, identities), fields(session = %self.key))]
    pub fn reject_undo(
        &mut self,
        identities: &IdentityRegistry,
        player: &PlayerId,
    ) -> Result<Outcome, SessionError> {
        let requester = self.require_responder(player)?;
        self.pending_undo = None;
        info!(%player, %requester, "Takeback rejected");
        Ok(Outcome::announce(Announcement::UndoRejected {
            rejecter: identities.display_name(player),
            requester: identities.display_name(&requester),
        }))
    }
}
