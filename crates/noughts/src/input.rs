//! Line-oriented player commands.

use derive_more::Display;
use noughts_core::{Difficulty, EngineError};
use tracing::instrument;

/// Help text shown for `help` and at startup.
pub const HELP: &str = "Commands: 1-9 to play a cell, `new` to start a game, \
`mode ai|human`, `difficulty easy|medium|hard|impossible`, \
`name1 <name>`, `name2 <name>`, `help`, `quit`.";

/// A parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Play the cell at this 0-based index.
    Cell(usize),
    /// Start a new game with the pending settings.
    NewGame,
    /// Choose the opponent for the next game; `true` is the computer.
    Mode(bool),
    /// Choose the difficulty for the next game.
    Difficulty(Difficulty),
    /// Rename player 1 for the next game.
    Name1(String),
    /// Rename player 2 for the next game.
    Name2(String),
    /// Show the command list.
    Help,
    /// Leave the program.
    Quit,
}

/// Reasons a line is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
    /// The line was blank.
    #[display("Empty input")]
    Empty,
    /// The first word is not a command.
    #[display("Unknown command: {:?}. Type `help` for commands.", _0)]
    Unknown(String),
    /// A cell number outside 1-9.
    #[display("Cells are numbered 1-9, got {}", _0)]
    CellOutOfRange(String),
    /// `mode` without `ai` or `human`.
    #[display("Mode must be `ai` or `human`, got {:?}", _0)]
    BadMode(String),
    /// `difficulty` with an unknown tier.
    #[display("{}", _0)]
    BadDifficulty(EngineError),
}

impl std::error::Error for InputError {}

/// Parses one line typed by a player.
#[instrument(level = "trace")]
pub fn parse_command(line: &str) -> Result<PlayerCommand, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    if word.is_empty() {
        return Err(InputError::Empty);
    }

    if word.chars().all(|c| c.is_ascii_digit()) {
        return match word.parse::<usize>() {
            Ok(n @ 1..=9) => Ok(PlayerCommand::Cell(n - 1)),
            _ => Err(InputError::CellOutOfRange(word.to_string())),
        };
    }

    match word.to_ascii_lowercase().as_str() {
        "new" | "start" | "restart" => Ok(PlayerCommand::NewGame),
        "mode" => match rest.to_ascii_lowercase().as_str() {
            "ai" | "computer" => Ok(PlayerCommand::Mode(true)),
            "human" | "pvp" => Ok(PlayerCommand::Mode(false)),
            _ => Err(InputError::BadMode(rest.to_string())),
        },
        "difficulty" => Difficulty::from_key(rest)
            .map(PlayerCommand::Difficulty)
            .map_err(InputError::BadDifficulty),
        "name1" => Ok(PlayerCommand::Name1(rest.to_string())),
        "name2" => Ok(PlayerCommand::Name2(rest.to_string())),
        "help" | "?" => Ok(PlayerCommand::Help),
        "quit" | "exit" | "q" => Ok(PlayerCommand::Quit),
        _ => Err(InputError::Unknown(word.to_string())),
    }
}
