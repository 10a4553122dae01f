//! Strictly Gomoku - terminal chat simulator
//!
//! Feeds stdin lines to the session engine as if they were chat messages and
//! prints the replies. Logs go to stderr so stdout carries only the chat.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, ScopeArgs};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use strictly_gomoku_server::{
    ChatScope, Dispatcher, GomokuConfig, InboundMessage, Reply, SessionManager, TextRenderer,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            config,
            board_size,
            scope,
        } => run_play(config, board_size, scope),
    }
}

/// Run the stdin chat loop
#[instrument(skip(scope))]
fn run_play(config: Option<PathBuf>, board_size: Option<usize>, scope: ScopeArgs) -> Result<()> {
    let mut config =
        GomokuConfig::resolve(config.as_deref()).context("Failed to load configuration")?;
    if let Some(size) = board_size {
        config = config.with_board_size(size);
        config.validate().context("Invalid --board-size")?;
    }

    let scope = match (scope.group, scope.private) {
        (_, Some(conversation)) => ChatScope::Private(conversation),
        (Some(group), None) => ChatScope::Group(group),
        (None, None) => ChatScope::Group("local".to_string()),
    };
    info!(%scope, board_size = config.board_size(), "Starting chat simulator");

    let dispatcher = Dispatcher::new(SessionManager::new(&config), TextRenderer);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let Some(message) = InboundMessage::from_line(&scope, &line) else {
            debug!(line = %line, "Skipping line without sender and text");
            continue;
        };
        for reply in dispatcher.handle(&message) {
            match reply {
                Reply::Board(board) => write!(stdout, "{}", board)?,
                Reply::Text(text) => writeln!(stdout, "{}", text)?,
            }
        }
        stdout.flush()?;
    }

    info!("Input closed, shutting down");
    Ok(())
}
