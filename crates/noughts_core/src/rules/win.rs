//! Win detection logic for tic-tac-toe.

use crate::types::{Cell, Cells, Marker};

/// Three cell indices forming a line.
pub type WinPattern = [usize; 3];

/// The eight winning lines: rows, then columns, then diagonals.
pub const WIN_PATTERNS: [WinPattern; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first completed line in scan order, with its owner.
pub fn winning_line(cells: &Cells) -> Option<(Marker, WinPattern)> {
    WIN_PATTERNS.into_iter().find_map(|pattern| {
        let [a, b, c] = pattern;
        match cells[a] {
            Cell::Occupied(marker) if cells[b] == cells[a] && cells[c] == cells[a] => {
                Some((marker, pattern))
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(marker)` if that marker has three in a row.
pub fn check_winner(cells: &Cells) -> Option<Marker> {
    winning_line(cells).map(|(marker, _)| marker)
}
