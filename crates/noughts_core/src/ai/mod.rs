//! Computer opponent.
//!
//! [`MoveSelector`] maps a board and a [`Difficulty`] to a cell:
//!
//! - `easy` plays uniformly at random,
//! - `medium` and `hard` flip a weighted coin between depth-limited search and random play,
//! - `impossible` searches every line to the end of the game.

mod difficulty;
mod minimax;
mod selector;

pub use difficulty::{BlendPolicy, Difficulty, Policy, TierMix};
pub use minimax::{
    SearchDepth, WIN_SCORE, find_best_move, heuristic_score, minimax, winning_move,
};
pub use selector::MoveSelector;
