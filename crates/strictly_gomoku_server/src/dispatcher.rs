//! Turns inbound chat messages into session commands and replies.

use crate::{
    BoardRenderer, ChatScope, Command, OutputEvent, PlayerId, RenderedBoard, SessionKey,
    SessionManager,
};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// A chat message as delivered by the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct InboundMessage {
    /// Where it was sent.
    pub scope: ChatScope,
    /// Platform id of the sender.
    pub sender: String,
    /// Display name the platform reported, if any.
    pub sender_name: Option<String>,
    /// Raw text.
    pub text: String,
}

impl InboundMessage {
    /// Parses a simulated chat line `sender[:Display Name] text`.
    ///
    /// Returns `None` for blank lines and lines without a message body.
    #[instrument(skip(scope))]
    pub fn from_line(scope: &ChatScope, line: &str) -> Option<Self> {
        let (head, text) = line.trim().split_once(char::is_whitespace)?;
        let (sender, name) = match head.split_once(':') {
            Some((sender, name)) => (sender, Some(name.replace('_', " "))),
            None => (head, None),
        };
        if sender.is_empty() {
            return None;
        }
        Some(Self::new(
            scope.clone(),
            sender.to_string(),
            name,
            text.trim().to_string(),
        ))
    }
}

/// One thing to post back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A rendered board.
    Board(RenderedBoard),
    /// A text message.
    Text(String),
}

impl Reply {
    /// Text of a text reply.
    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(text),
            Reply::Board(_) => None,
        }
    }
}

/// Routes chat messages to a [`SessionManager`] and renders the results.
#[derive(Debug, Clone)]
pub struct Dispatcher<R> {
    manager: SessionManager,
    renderer: R,
}

impl<R: BoardRenderer> Dispatcher<R> {
    /// Creates a dispatcher.
    pub fn new(manager: SessionManager, renderer: R) -> Self {
        Self { manager, renderer }
    }

    /// The underlying session store.
    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Handles one message. Text that is not a game command yields no replies.
    #[instrument(skip(self, message), fields(scope = %message.scope, sender = %message.sender))]
    pub fn handle(&self, message: &InboundMessage) -> Vec<Reply> {
        let Some(command) = Command::parse(&message.text) else {
            return Vec::new();
        };

        let key = SessionKey::from(message.scope.clone());
        let player = PlayerId::in_scope(&message.scope, &message.sender);
        debug!(%command, %player, "Dispatching command");

        let outcome = match self.manager.execute(
            &key,
            &player,
            message.sender_name.as_deref(),
            &command,
        ) {
            Ok(outcome) => outcome,
            Err(e) if e.is_invariant_violation() => {
                error!(session = %key, error = %e, "Session invariant violated");
                return vec![Reply::Text(e.to_string())];
            }
            Err(e) => {
                info!(session = %key, error = %e, "Command refused");
                return vec![Reply::Text(e.to_string())];
            }
        };

        outcome
            .events()
            .iter()
            .filter_map(|event| match event {
                OutputEvent::ShowBoard { board, highlight } => {
                    match self.renderer.render(board, *highlight) {
                        Ok(rendered) => Some(Reply::Board(rendered)),
                        Err(e) => {
                            warn!(error = %e, "Board rendering failed, replying with text only");
                            None
                        }
                    }
                }
                OutputEvent::Announce(announcement) => Some(Reply::Text(announcement.to_string())),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderError, TextRenderer};
    use strictly_gomoku::{Board, Coord};

    struct FailingRenderer;

    impl BoardRenderer for FailingRenderer {
        fn render(&self, _: &Board, _: Option<Coord>) -> Result<RenderedBoard, RenderError> {
            Err(RenderError::new("no canvas".to_string()))
        }
    }

    fn msg(sender: &str, text: &str) -> InboundMessage {
        InboundMessage::new(ChatScope::Group("g".into()), sender.into(), None, text.into())
    }

    #[test]
    fn test_from_line() {
        let scope = ChatScope::Group("g".into());
        let m = InboundMessage::from_line(&scope, "42:Alice_B /gomoku join").unwrap();
        assert_eq!(m.sender, "42");
        assert_eq!(m.sender_name.as_deref(), Some("Alice B"));
        assert_eq!(m.text, "/gomoku join");

        let m = InboundMessage::from_line(&scope, "7 hello  ").unwrap();
        assert_eq!(m.sender_name, None);
        assert_eq!(m.text, "hello");

        assert!(InboundMessage::from_line(&scope, "   ").is_none());
        assert!(InboundMessage::from_line(&scope, "lonely").is_none());
        assert!(InboundMessage::from_line(&scope, ":Name hi").is_none());
    }

    #[test]
    fn test_ignores_chatter() {
        let dispatcher = Dispatcher::new(SessionManager::default(), TextRenderer);
        assert!(dispatcher.handle(&msg("1", "good morning")).is_empty());
    }

    #[test]
    fn test_error_becomes_text() {
        let dispatcher = Dispatcher::new(SessionManager::default(), TextRenderer);
        let replies = dispatcher.handle(&msg("1", "/gomoku join"));
        assert_eq!(
            replies,
            vec![Reply::Text(
                "No game is open here. Start one with /gomoku_pvp first!".to_string()
            )]
        );
    }

    #[test]
    fn test_render_failure_degrades_to_text() {
        let dispatcher = Dispatcher::new(SessionManager::default(), FailingRenderer);
        dispatcher.handle(&msg("1", "/gomoku_pvp"));
        dispatcher.handle(&msg("1", "/gomoku join"));
        dispatcher.handle(&msg("2", "/gomoku join"));
        let replies = dispatcher.handle(&msg("1", "/gomoku (7,7)"));
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text(), Some("2's turn (White)!"));
    }
}
