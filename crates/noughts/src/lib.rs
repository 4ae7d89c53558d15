//! Terminal front end for the noughts engine.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with command-line overrides
//! - **Input**: one typed line becomes one [`PlayerCommand`]
//! - **Terminal**: a [`TerminalDisplay`] that draws to any writer
//! - **Orchestrator**: the event loop that feeds commands to the engine and
//!   plays the computer after its thinking delay

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod input;
mod orchestrator;
mod terminal;

pub use cli::{Cli, Command, PlayArgs, SuggestArgs};
pub use config::{ConfigError, ConfigOverrides, GameConfig};
pub use input::{HELP, InputError, PlayerCommand, parse_command};
pub use orchestrator::{Event, Orchestrator, spawn_input_reader};
pub use terminal::{PROMPT, TerminalDisplay};
