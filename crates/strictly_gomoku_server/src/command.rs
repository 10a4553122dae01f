//! Session commands and the chat-text syntax that produces them.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Opens a session in the current scope.
pub const START_COMMAND: &str = "/gomoku_pvp";

/// Prefix of every in-game command.
pub const GAME_COMMAND: &str = "/gomoku";

static COORDINATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\((\d+),(\d+)\)").expect("coordinate pattern is valid"));

/// Argument of a move command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveInput {
    /// A parsed `(x,y)` pair, not yet range-checked.
    At {
        /// Column.
        x: i64,
        /// Row.
        y: i64,
    },
    /// Anything that is not an `(x,y)` pair, kept verbatim.
    Malformed(String),
}

impl MoveInput {
    /// Parses the text after `/gomoku`.
    #[instrument]
    pub fn parse(arg: &str) -> Self {
        let arg = arg.trim();
        let Some(caps) = COORDINATE.captures(arg) else {
            return MoveInput::Malformed(arg.to_string());
        };
        match (caps[1].parse::<i64>(), caps[2].parse::<i64>()) {
            (Ok(x), Ok(y)) => MoveInput::At { x, y },
            _ => MoveInput::Malformed(arg.to_string()),
        }
    }
}

/// A command addressed to one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Command {
    /// Open a session.
    Start,
    /// Take a seat.
    Join,
    /// Close the session without a winner.
    End,
    /// Resign.
    Surrender,
    /// Place a stone.
    Move(MoveInput),
    /// Ask the opponent to take back the last stone.
    RequestUndo,
    /// Agree to the pending takeback.
    AcceptUndo,
    /// Refuse the pending takeback.
    RejectUndo,
}

impl Command {
    /// Parses one chat message.
    ///
    /// Returns `None` for text that is not a game command. An argument to
    /// `/gomoku` whose first word is not a keyword is treated as a move, so a
    /// bad coordinate surfaces as a malformed move rather than silence.
    #[instrument]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (head, rest) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));

        if head == START_COMMAND {
            return Some(Command::Start);
        }
        if head != GAME_COMMAND {
            debug!("Not a game command");
            return None;
        }

        // Keywords match on the first word; trailing text is ignored.
        let command = match rest.split_whitespace().next().unwrap_or("") {
            "join" => Command::Join,
            "end" => Command::End,
            "surrender" => Command::Surrender,
            "undo" => Command::RequestUndo,
            "accept" => Command::AcceptUndo,
            "reject" => Command::RejectUndo,
            _ => Command::Move(MoveInput::parse(rest)),
        };
        debug!(%command, "Parsed command");
        Some(command)
    }
}
