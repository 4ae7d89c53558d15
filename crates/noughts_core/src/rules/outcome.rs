//! Outcome evaluation: in progress, win, or tie.

use super::draw::is_full;
use super::win::{WinPattern, winning_line};
use crate::types::{Cells, Marker};
use serde::{Deserialize, Serialize};

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line is complete and at least one cell is empty.
    InProgress,
    /// `marker` completed `pattern`.
    Win {
        /// The winning marker.
        marker: Marker,
        /// The completed line.
        pattern: WinPattern,
    },
    /// Every cell is filled and no line is complete.
    Tie,
}

impl Outcome {
    /// Returns true for a win or a tie.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Marker> {
        match self {
            Outcome::Win { marker, .. } => Some(*marker),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win { marker, pattern } => write!(f, "{marker} wins on {pattern:?}"),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

/// Evaluates a board.
///
/// Lines are scanned rows first, then columns, then diagonals; the first
/// complete line wins. A win on the last empty cell is a win, not a tie.
pub fn evaluate(cells: &Cells) -> Outcome {
    if let Some((marker, pattern)) = winning_line(cells) {
        Outcome::Win { marker, pattern }
    } else if is_full(cells) {
        Outcome::Tie
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Board;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(Board::new().cells()), Outcome::InProgress);
    }

    #[test]
    fn test_full_board_without_line_is_tie() {
        let board = Board::parse("XOX XOO OXX").unwrap();
        assert_eq!(evaluate(board.cells()), Outcome::Tie);
    }

    #[test]
    fn test_win_on_last_cell_is_win() {
        let board = Board::parse("XOX OXO OXX").unwrap();
        assert_eq!(
            evaluate(board.cells()),
            Outcome::Win {
                marker: Marker::X,
                pattern: [0, 4, 8]
            }
        );
    }

    #[test]
    fn test_two_in_a_row_each_in_progress() {
        let board = Board::parse("XX. .O. ..O").unwrap();
        assert_eq!(evaluate(board.cells()), Outcome::InProgress);
    }

    #[test]
    fn test_winner_accessor() {
        let board = Board::parse("OOO XX. X..").unwrap();
        let outcome = evaluate(board.cells());
        assert!(outcome.is_terminal());
        assert_eq!(outcome.winner(), Some(Marker::O));
        assert_eq!(Outcome::Tie.winner(), None);
        assert!(!Outcome::InProgress.is_terminal());
    }
}
