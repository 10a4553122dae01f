//! Process-wide store of game sessions.
//!
//! The map lock is held only to look up, insert or remove a slot. Each slot
//! has its own lock, so commands for different chats never wait on each
//! other while commands for the same chat run one at a time. Locks are
//! always taken map first, slot second.

use crate::{
    Announcement, Command, GameSession, GomokuConfig, IdentityRegistry, Outcome, PlayerId,
    SessionError, SessionKey,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_gomoku::Board;
use tracing::{debug, info, instrument, warn};

/// A session's lock. Emptied when the session terminates.
type Slot = Arc<Mutex<Option<GameSession>>>;

/// Transitions validate before they mutate, so a poisoned lock never guards
/// half-applied state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read-only copy of a session's visible state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Seated players in slot order.
    pub roster: Vec<PlayerId>,
    /// Player on turn, once the game started.
    pub current_turn: Option<PlayerId>,
    /// Live board, once the game started.
    pub board: Option<Board>,
    /// Ledger length.
    pub history_len: usize,
    /// Requester of an open takeback.
    pub pending_undo: Option<PlayerId>,
}

impl From<&GameSession> for SessionSnapshot {
    fn from(session: &GameSession) -> Self {
        Self {
            roster: session.roster().to_vec(),
            current_turn: session.current_turn().cloned(),
            board: session.board().cloned(),
            history_len: session.history_len(),
            pending_undo: session.pending_undo().cloned(),
        }
    }
}

/// Manages all active game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionKey, Slot>>>,
    identities: IdentityRegistry,
    board_size: usize,
}

impl SessionManager {
    /// Creates a session manager for the given configuration.
    #[instrument(skip(config), fields(board_size = config.board_size()))]
    pub fn new(config: &GomokuConfig) -> Self {
        info!("Creating session manager");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            identities: IdentityRegistry::new(config.placeholder_names().clone()),
            board_size: *config.board_size(),
        }
    }

    /// Shared display-name registry.
    pub fn identities(&self) -> &IdentityRegistry {
        &self.identities
    }

    /// Board size given to new sessions.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Opens a session at `key`. A slot left empty by a terminated session
    /// is replaced.
    #[instrument(skip(self), fields(session = %key))]
    pub fn start(&self, key: &SessionKey) -> Result<Outcome, SessionError> {
        let mut sessions = lock(&self.sessions);
        if sessions.get(key).is_some_and(|slot| lock(slot).is_some()) {
            warn!("Session already exists");
            return Err(SessionError::SessionAlreadyActive);
        }

        let session = GameSession::new(key.clone(), self.board_size);
        sessions.insert(key.clone(), Arc::new(Mutex::new(Some(session))));
        info!("Created new session");
        Ok(Outcome::announce(Announcement::SessionOpened))
    }

    /// Seats `player`, remembering `name` when it is usable.
    #[instrument(skip(self), fields(session = %key))]
    pub fn join(
        &self,
        key: &SessionKey,
        player: &PlayerId,
        name: Option<&str>,
    ) -> Result<Outcome, SessionError> {
        self.with_session(key, SessionError::SessionNotFound, |session, ids| {
            session.join(ids, player.clone(), name)
        })
    }

    /// Places a stone for `player`.
    #[instrument(skip(self), fields(session = %key))]
    pub fn play(
        &self,
        key: &SessionKey,
        player: &PlayerId,
        input: &crate::MoveInput,
    ) -> Result<Outcome, SessionError> {
        self.with_session(key, SessionError::NoActiveSession, |session, ids| {
            session.play(ids, player, input)
        })
    }

    /// Resigns for `player`.
    #[instrument(skip(self), fields(session = %key))]
    pub fn surrender(&self, key: &SessionKey, player: &PlayerId) -> Result<Outcome, SessionError> {
        self.with_session(key, SessionError::NoActiveSession, |session, ids| {
            session.surrender(ids, player)
        })
    }

    /// Closes the session at `key` on behalf of `player`.
    #[instrument(skip(self), fields(session = %key))]
    pub fn end(&self, key: &SessionKey, player: &PlayerId) -> Result<Outcome, SessionError> {
        self.with_session(key, SessionError::NoActiveSession, |session, ids| {
            session.end(ids, player)
        })
    }

    /// Opens a takeback request.
    #[instrument(skip(self), fields(session = %key))]
    pub fn request_undo(
        &self,
        key: &SessionKey,
        player: &PlayerId,
    ) -> Result<Outcome, SessionError> {
        self.with_session(key, SessionError::NoActiveSession, |session, ids| {
            session.request_undo(ids, player)
        })
    }

    /// Grants the pending takeback.
    #[instrument(skip(self), fields(session = %key))]
    pub fn accept_undo(&self, key: &SessionKey, player: &PlayerId) -> Result<Outcome, SessionError> {
        self.with_session(key, SessionError::NoPendingUndo, |session, ids| {
            session.accept_undo(ids, player)
        })
    }

    /// Refuses the pending takeback.
    #[instrument(skip(self), fields(session = %key))]
    pub fn reject_undo(&self, key: &SessionKey, player: &PlayerId) -> Result<Outcome, SessionError> {
        self.with_session(key, SessionError::NoPendingUndo, |session, ids| {
            session.reject_undo(ids, player)
        })
    }

    /// Routes a parsed command to the matching operation.
    #[instrument(skip(self), fields(session = %key))]
    pub fn execute(
        &self,
        key: &SessionKey,
        player: &PlayerId,
        name: Option<&str>,
        command: &Command,
    ) -> Result<Outcome, SessionError> {
        match command {
            Command::Start => self.start(key),
            Command::Join => self.join(key, player, name),
            Command::End => self.end(key, player),
            Command::Surrender => self.surrender(key, player),
            Command::Move(input) => self.play(key, player, input),
            Command::RequestUndo => self.request_undo(key, player),
            Command::AcceptUndo => self.accept_undo(key, player),
            Command::RejectUndo => self.reject_undo(key, player),
        }
    }

    /// Copy of the visible state of the session at `key`.
    #[instrument(skip(self), fields(session = %key))]
    pub fn snapshot(&self, key: &SessionKey) -> Option<SessionSnapshot> {
        let slot = lock(&self.sessions).get(key).cloned()?;
        let guard = lock(&slot);
        let snapshot = guard.as_ref().map(SessionSnapshot::from);
        if snapshot.is_none() {
            debug!("Session not found");
        }
        snapshot
    }

    /// Keys of all live sessions.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionKey> {
        let sessions = lock(&self.sessions);
        let keys: Vec<SessionKey> = sessions
            .iter()
            .filter(|(_, slot)| lock(slot).is_some())
            .map(|(key, _)| key.clone())
            .collect();
        debug!(count = keys.len(), "Listed sessions");
        keys
    }

    /// Runs `f` on the session at `key` under its slot lock and removes the
    /// session when the outcome is terminal.
    fn with_session<F>(
        &self,
        key: &SessionKey,
        missing: SessionError,
        f: F,
    ) -> Result<Outcome, SessionError>
    where
        F: FnOnce(&mut GameSession, &IdentityRegistry) -> Result<Outcome, SessionError>,
    {
        let Some(slot) = lock(&self.sessions).get(key).cloned() else {
            debug!(session = %key, "No session at key");
            return Err(missing);
        };

        let outcome = {
            let mut guard = lock(&slot);
            // Emptied by a terminal command that raced us to the slot.
            let Some(session) = guard.as_mut() else {
                debug!(session = %key, "Session terminated concurrently");
                return Err(missing);
            };
            let outcome = f(session, &self.identities)?;
            if outcome.is_terminal() {
                *guard = None;
            }
            outcome
        };

        if let Some(termination) = outcome.termination() {
            self.evict(key, &slot);
            info!(session = %key, ?termination, "Session removed");
        }
        Ok(outcome)
    }

    /// Drops `slot` from the map unless a newer session already took its key.
    fn evict(&self, key: &SessionKey, slot: &Slot) {
        let mut sessions = lock(&self.sessions);
        if sessions.get(key).is_some_and(|s| Arc::ptr_eq(s, slot)) {
            sessions.remove(key);
        } else {
            debug!(session = %key, "Key already reopened, keeping newer session");
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(&GomokuConfig::default())
    }
}
