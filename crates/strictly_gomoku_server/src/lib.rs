//! Strictly Gomoku Server - chat-scoped Gomoku sessions.
//!
//! One session per chat scope, two seats, Black moves first. Commands arrive
//! as chat text, are parsed into [`Command`]s and routed through a
//! [`SessionManager`] to the owning [`GameSession`]. Every command either
//! fails with a [`SessionError`] and leaves the session untouched, or yields
//! an [`Outcome`] of ordered output events.
//!
//! # Example
//!
//! ```
//! use strictly_gomoku_server::{ChatScope, Dispatcher, InboundMessage, SessionManager, TextRenderer};
//!
//! let dispatcher = Dispatcher::new(SessionManager::default(), TextRenderer);
//! let scope = ChatScope::Group("lobby".into());
//! for line in ["1:Alice /gomoku_pvp", "1:Alice /gomoku join", "2:Bob /gomoku join"] {
//!     let message = InboundMessage::from_line(&scope, line).unwrap();
//!     dispatcher.handle(&message);
//! }
//! let replies = dispatcher.handle(&InboundMessage::from_line(&scope, "1 /gomoku (7,7)").unwrap());
//! assert_eq!(replies.last().and_then(|r| r.text()), Some("Bob's turn (White)!"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod command;
mod config;
mod dispatcher;
mod error;
mod identity;
mod manager;
mod outcome;
mod render;
mod session;

pub use command::{Command, GAME_COMMAND, MoveInput, START_COMMAND};
pub use config::{BOARD_SIZE_RANGE, CONFIG_ENV, ConfigError, GomokuConfig};
pub use dispatcher::{Dispatcher, InboundMessage, Reply};
pub use error::SessionError;
pub use identity::{ChatScope, IdentityRegistry, PlayerId, SessionKey};
pub use manager::{SessionManager, SessionSnapshot};
pub use outcome::{Announcement, Outcome, OutputEvent, Termination};
pub use render::{BoardRenderer, RenderError, RenderedBoard, TextRenderer};
pub use session::{GameSession, MAX_PLAYERS};
