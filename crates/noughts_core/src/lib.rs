//! Tic-tac-toe decision engine.
//!
//! # Architecture
//!
//! - **Board**: the nine cells; [`Board::try_place`] is the only way to fill one
//! - **Rules**: pure evaluation of a board into in-progress, win, or tie
//! - **AI**: a stateless [`MoveSelector`] with four [`Difficulty`] tiers
//! - **Controller**: the [`TurnController`] state machine that sequences human
//!   and computer moves and reports to a [`GameDisplay`]
//!
//! # Example
//!
//! ```
//! use noughts_core::{Difficulty, GameSetup, MoveSelector, Phase, RecordingDisplay, TurnController};
//!
//! let mut game = TurnController::new(RecordingDisplay::new(), MoveSelector::seeded(7));
//! game.initialize(GameSetup::new("Ada", "").against_computer(Difficulty::Impossible));
//!
//! if let Some(turn) = game.make_move(4) {
//!     // A front end would wait out the thinking delay first.
//!     game.play_computer_move(turn).unwrap();
//! }
//! assert_eq!(game.phase(), Phase::Active);
//! assert_eq!(game.history().len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod ai;
mod controller;
mod display;
mod error;
pub mod rules;
mod types;

pub use action::{CELL_LABELS, Move, cell_label};
pub use ai::{
    BlendPolicy, Difficulty, MoveSelector, Policy, SearchDepth, TierMix, WIN_SCORE,
    find_best_move, heuristic_score, minimax, winning_move,
};
pub use controller::{
    ComputerTurn, DEFAULT_COMPUTER, DEFAULT_PLAYER1, DEFAULT_PLAYER2, GameSetup, NOT_STARTED,
    Phase, TIE_STATUS, TurnController,
};
pub use display::{DisplayEvent, GameDisplay, RecordingDisplay};
pub use error::EngineError;
pub use rules::{Outcome, WIN_PATTERNS, WinPattern, evaluate};
pub use types::{Board, CELL_COUNT, Cell, Cells, Marker, Player};
