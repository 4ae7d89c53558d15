//! Board-fill checks for tic-tac-toe.

use crate::types::Cells;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner is a tie.
pub fn is_full(cells: &Cells) -> bool {
    cells.iter().all(|cell| !cell.is_empty())
}

/// Returns the indices of empty cells in ascending order.
pub fn open_cells(cells: &Cells) -> Vec<usize> {
    cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(index, _)| index)
        .collect()
}
