//! Command-line interface for noughts.

use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};
use noughts_core::{Difficulty, Marker};
use std::path::PathBuf;

/// Noughts - tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play(PlayArgs),

    /// Print the computer's choice for a board and exit
    Suggest(SuggestArgs),
}

/// Options for `play`
#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name for player 1 (X)
    #[arg(long)]
    pub player1: Option<String>,

    /// Name for player 2 (O)
    #[arg(long)]
    pub player2: Option<String>,

    /// Play against the computer
    #[arg(long, conflicts_with = "two_players")]
    pub vs_ai: bool,

    /// Two humans share the keyboard
    #[arg(long)]
    pub two_players: bool,

    /// Computer strength: easy, medium, hard or impossible
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Milliseconds the computer waits before moving
    #[arg(long)]
    pub think_ms: Option<u64>,

    /// Seed for reproducible computer play
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl From<&PlayArgs> for ConfigOverrides {
    fn from(args: &PlayArgs) -> Self {
        let vs_ai = if args.vs_ai {
            Some(true)
        } else if args.two_players {
            Some(false)
        } else {
            None
        };
        Self {
            player1: args.player1.clone(),
            player2: args.player2.clone(),
            vs_ai,
            difficulty: args.difficulty,
            think_delay_ms: args.think_ms,
            seed: args.seed,
        }
    }
}

/// Options for `suggest`
#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    /// Board as nine cells of x, o, . or - (whitespace, | and -+-+- rows are ignored)
    #[arg(short, long)]
    pub board: String,

    /// Marker the computer plays
    #[arg(short, long, default_value = "o")]
    pub marker: Marker,

    /// Computer strength: easy, medium, hard or impossible
    #[arg(short, long, default_value = "impossible")]
    pub difficulty: Difficulty,

    /// Seed for reproducible choices
    #[arg(long)]
    pub seed: Option<u64>,
}
