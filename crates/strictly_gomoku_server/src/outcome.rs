//! What a successful command produced: ordered output events plus an
//! optional termination record.

use crate::PlayerId;
use derive_getters::Getters;
use serde::Serialize;
use strictly_gomoku::{Board, Coord, Stone};

/// Text the chat layer should post, with the values to interpolate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Announcement {
    /// A session was opened and is waiting for players.
    SessionOpened,
    /// First player seated.
    PlayerJoined {
        /// Name of the seated player.
        name: String,
    },
    /// Second player seated; Black moves first.
    GameStarted {
        /// Name of the player who just joined.
        joined: String,
        /// Name of the Black player.
        first: String,
    },
    /// A stone was placed and play continues.
    TurnPassed {
        /// Name of the player on turn.
        next: String,
        /// Color of the player on turn.
        stone: Stone,
    },
    /// Five in a row.
    Won {
        /// Winner's name.
        winner: String,
        /// Winning placement.
        coord: Coord,
    },
    /// Board full without a winner.
    Draw,
    /// A player resigned.
    Surrendered {
        /// Name of the resigning player.
        loser: String,
        /// Name of the other player, if one had joined.
        winner: Option<String>,
    },
    /// A participant closed the session.
    Ended {
        /// Name of the player who ended it.
        by: String,
    },
    /// A takeback awaits the opponent's answer.
    UndoRequested {
        /// Name of the requesting player.
        requester: String,
        /// Name of the player who must answer.
        opponent: String,
    },
    /// The opponent agreed; the last stone is gone.
    UndoAccepted {
        /// Name of the accepting player.
        accepter: String,
        /// Name of the requesting player, now on turn.
        requester: String,
    },
    /// The opponent refused; play continues unchanged.
    UndoRejected {
        /// Name of the refusing player.
        rejecter: String,
        /// Name of the requesting player.
        requester: String,
    },
}

impl std::fmt::Display for Announcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Announcement::SessionOpened => write!(
                f,
                "PVP game opened! Send /gomoku join to take a seat, /gomoku end to close the game."
            ),
            Announcement::PlayerJoined { name } => {
                write!(f, "{} joined the game! Waiting for a second player.", name)
            }
            Announcement::GameStarted { joined, first } => write!(
                f,
                "{} joined the game! The game begins, {} (Black) moves first with /gomoku (x,y). \
                 /gomoku undo asks for a takeback, /gomoku surrender resigns, /gomoku end closes the game.",
                joined, first
            ),
            Announcement::TurnPassed { next, stone } => {
                write!(f, "{}'s turn ({})!", next, stone)
            }
            Announcement::Won { winner, .. } => write!(f, "🎉 {} wins! Game over.", winner),
            Announcement::Draw => write!(f, "⭕️ The board is full. Game over, it's a draw!"),
            Announcement::Surrendered {
                loser,
                winner: Some(winner),
            } => write!(f, "🏳️ {} resigned! {} wins!", loser, winner),
            Announcement::Surrendered { loser, winner: None } => {
                write!(f, "🏳️ {} resigned! Game over.", loser)
            }
            Announcement::Ended { by } => write!(f, "The game was ended by {}!", by),
            Announcement::UndoRequested { requester, opponent } => write!(
                f,
                "{} asks for a takeback. {}, reply /gomoku accept to agree or /gomoku reject to refuse.",
                requester, opponent
            ),
            Announcement::UndoAccepted { accepter, requester } => write!(
                f,
                "{} accepted {}'s takeback! {} to move.",
                accepter, requester, requester
            ),
            Announcement::UndoRejected { rejecter, requester } => write!(
                f,
                "{} refused {}'s takeback! Play continues.",
                rejecter, requester
            ),
        }
    }
}

/// One item of a command's response, consumed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// Render this board, highlighting a cell if given.
    ShowBoard {
        /// Board to render.
        board: Board,
        /// Cell to highlight (usually the last placement).
        highlight: Option<Coord>,
    },
    /// Post this text.
    Announce(Announcement),
}

/// Why a session was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// A player completed five in a row.
    Won {
        /// The winning player.
        winner: PlayerId,
    },
    /// The board filled up.
    Draw,
    /// A player resigned.
    Surrendered {
        /// The resigning player.
        loser: PlayerId,
        /// The other player, if seated.
        winner: Option<PlayerId>,
    },
    /// A participant closed the game; no winner.
    Ended {
        /// Who closed it.
        by: PlayerId,
    },
}

impl Termination {
    /// Winner, if the termination declares one.
    pub fn winner(&self) -> Option<&PlayerId> {
        match self {
            Termination::Won { winner } => Some(winner),
            Termination::Surrendered { winner, .. } => winner.as_ref(),
            Termination::Draw | Termination::Ended { .. } => None,
        }
    }
}

/// Successful result of a session command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct Outcome {
    /// Events in presentation order (board before text).
    events: Vec<OutputEvent>,
    /// Set when the command removed the session.
    termination: Option<Termination>,
}

impl Outcome {
    /// Outcome consisting of a single announcement.
    pub fn announce(announcement: Announcement) -> Self {
        Self::default().then_announce(announcement)
    }

    /// Outcome that starts by showing a board.
    pub fn show_board(board: &Board, highlight: Option<Coord>) -> Self {
        Self {
            events: vec![OutputEvent::ShowBoard {
                board: board.clone(),
                highlight,
            }],
            termination: None,
        }
    }

    /// Appends an announcement.
    pub fn then_announce(mut self, announcement: Announcement) -> Self {
        self.events.push(OutputEvent::Announce(announcement));
        self
    }

    /// Marks the session as terminated.
    pub fn terminating(mut self, termination: Termination) -> Self {
        self.termination = Some(termination);
        self
    }

    /// True when the session no longer exists after this command.
    pub fn is_terminal(&self) -> bool {
        self.termination.is_some()
    }

    /// Announcements only, in order.
    pub fn announcements(&self) -> impl Iterator<Item = &Announcement> {
        self.events.iter().filter_map(|e| match e {
            OutputEvent::Announce(a) => Some(a),
            OutputEvent::ShowBoard { .. } => None,
        })
    }

    /// The board shown by this outcome, if any.
    pub fn board(&self) -> Option<(&Board, Option<Coord>)> {
        self.events.iter().find_map(|e| match e {
            OutputEvent::ShowBoard { board, highlight } => Some((board, *highlight)),
            OutputEvent::Announce(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_precedes_announcement() {
        let board = Board::new(9);
        let outcome = Outcome::show_board(&board, Some(Coord::new(1, 2))).then_announce(
            Announcement::TurnPassed {
                next: "Bob".into(),
                stone: Stone::White,
            },
        );
        assert!(matches!(outcome.events()[0], OutputEvent::ShowBoard { .. }));
        assert!(matches!(outcome.events()[1], OutputEvent::Announce(_)));
        assert!(!outcome.is_terminal());
        assert_eq!(outcome.board().map(|(_, h)| h), Some(Some(Coord::new(1, 2))));
    }

    #[test]
    fn test_announcement_text() {
        let text = Announcement::TurnPassed {
            next: "Bob".into(),
            stone: Stone::White,
        }
        .to_string();
        assert_eq!(text, "Bob's turn (White)!");

        let text = Announcement::Surrendered {
            loser: "Bob".into(),
            winner: Some("Alice".into()),
        }
        .to_string();
        assert!(text.contains("Alice wins"));
    }

    #[test]
    fn test_termination_winner() {
        let alice = PlayerId::member("g", "1");
        let t = Termination::Won { winner: alice.clone() };
        assert_eq!(t.winner(), Some(&alice));
        assert_eq!(Termination::Draw.winner(), None);
    }
}
