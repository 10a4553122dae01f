//! Command-line interface for strictly_gomoku.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Gomoku - chat-scoped five-in-a-row sessions
#[derive(Parser, Debug)]
#[command(name = "strictly_gomoku")]
#[command(about = "Two-player Gomoku sessions driven by chat commands", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a chat on stdin: each line is `sender[:Display Name] message`
    Play {
        /// Path to a TOML config file (falls back to $GOMOKU_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured board size
        #[arg(long)]
        board_size: Option<usize>,

        #[command(flatten)]
        scope: ScopeArgs,
    },
}

/// Which conversation the simulated messages belong to
#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct ScopeArgs {
    /// Group channel id
    #[arg(long)]
    pub group: Option<String>,

    /// Private conversation id
    #[arg(long)]
    pub private: Option<String>,
}
