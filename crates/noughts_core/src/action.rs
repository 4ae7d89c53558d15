//! Moves as first-class records.
//!
//! The turn controller keeps every applied move so a finished game can be
//! logged or replayed.

use super::types::Marker;
use serde::{Deserialize, Serialize};

/// Human-readable names for the nine cells, in index order.
pub const CELL_LABELS: [&str; 9] = [
    "Top-left",
    "Top-center",
    "Top-right",
    "Middle-left",
    "Center",
    "Middle-right",
    "Bottom-left",
    "Bottom-center",
    "Bottom-right",
];

/// Returns the label for a cell index, or `"Off-board"` for anything past 8.
pub fn cell_label(index: usize) -> &'static str {
    CELL_LABELS.get(index).copied().unwrap_or("Off-board")
}

/// A marker placed at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The marker placed.
    pub marker: Marker,
    /// The cell index (0-8).
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(marker: Marker, index: usize) -> Self {
        Self { marker, index }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.marker, cell_label(self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display_uses_label() {
        assert_eq!(Move::new(Marker::X, 4).to_string(), "X -> Center");
        assert_eq!(Move::new(Marker::O, 8).to_string(), "O -> Bottom-right");
    }

    #[test]
    fn test_cell_label_out_of_range() {
        assert_eq!(cell_label(9), "Off-board");
    }
}
