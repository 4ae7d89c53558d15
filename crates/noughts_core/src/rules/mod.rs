//! Game rules for tic-tac-toe.
//!
//! Pure functions over raw cells. Rules are separated from board storage so
//! the search can evaluate scratch copies without going through [`Board`].
//!
//! [`Board`]: crate::Board

pub mod draw;
pub mod outcome;
pub mod win;

pub use draw::{is_full, open_cells};
pub use outcome::{Outcome, evaluate};
pub use win::{WIN_PATTERNS, WinPattern, check_winner, winning_line};
