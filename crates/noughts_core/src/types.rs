//! Core domain types for tic-tac-toe.

use crate::error::EngineError;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Raw cell storage in row-major order (index = row * 3 + col).
pub type Cells = [Cell; CELL_COUNT];

/// Marker placed by a player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Marker {
    /// Marker X (moves first).
    X,
    /// Marker O (moves second).
    O,
}

impl Marker {
    /// Returns the opposing marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }

    /// Returns the character drawn for this marker.
    pub fn symbol(self) -> char {
        match self {
            Marker::X => 'X',
            Marker::O => 'O',
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a marker.
    Occupied(Marker),
}

impl Cell {
    /// Returns the marker in this cell, if any.
    pub fn marker(self) -> Option<Marker> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(marker) => Some(marker),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// 3x3 tic-tac-toe board.
///
/// A cell that has been filled keeps its marker until [`Board::reset`].
/// [`Board::try_place`] is the only way to fill a cell on a live board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: Cells,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Creates a board from raw cells.
    pub fn from_cells(cells: Cells) -> Self {
        Self { cells }
    }

    /// Returns an independent copy of the cells.
    pub fn snapshot(&self) -> Cells {
        self.cells
    }

    /// Returns the live cells.
    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns the indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        rules::open_cells(&self.cells)
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.cells)
    }

    /// Places `marker` at `index` if the index is on the board and the cell is empty.
    ///
    /// Returns `false` without touching the board otherwise.
    #[instrument(skip(self))]
    pub fn try_place(&mut self, index: usize, marker: Marker) -> bool {
        let Some(cell) = self.cells.get_mut(index) else {
            debug!("Index out of range");
            return false;
        };
        if !cell.is_empty() {
            debug!("Cell already occupied");
            return false;
        }
        *cell = Cell::Occupied(marker);
        true
    }

    /// Clears every cell.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based number so the grid doubles as a key.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => result.push_str(&(index + 1).to_string()),
                    Cell::Occupied(marker) => result.push(marker.symbol()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    /// Parses a board from text.
    ///
    /// `X`/`O` (any case) are markers; `.`, `-`, `_` and the digits `1`-`9`
    /// are empty cells. Whitespace and `|` are skipped, as are separator
    /// lines made only of `-` and `+` (with at least one `+`), so the output
    /// of [`Board::display`] parses back.
    #[instrument]
    pub fn parse(text: &str) -> Result<Self, EngineError> {
        let mut cells = [Cell::Empty; CELL_COUNT];
        let mut count = 0;

        for ch in text.lines().filter(|line| !is_separator(line)).flat_map(str::chars) {
            let cell = match ch {
                'x' | 'X' => Cell::Occupied(Marker::X),
                'o' | 'O' => Cell::Occupied(Marker::O),
                '.' | '-' | '_' | '1'..='9' => Cell::Empty,
                '|' => continue,
                c if c.is_whitespace() => continue,
                other => {
                    return Err(EngineError::MalformedBoard(format!(
                        "unexpected character {other:?}"
                    )));
                }
            };
            if count == CELL_COUNT {
                return Err(EngineError::MalformedBoard(format!(
                    "more than {CELL_COUNT} cells"
                )));
            }
            cells[count] = cell;
            count += 1;
        }

        if count != CELL_COUNT {
            return Err(EngineError::MalformedBoard(format!(
                "expected {CELL_COUNT} cells, found {count}"
            )));
        }

        Ok(Self { cells })
    }
}

/// A row divider such as `-+-+-`.
fn is_separator(line: &str) -> bool {
    let line = line.trim();
    line.contains('+') && line.chars().all(|c| matches!(c, '-' | '+') || c.is_whitespace())
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A participant in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    marker: Marker,
}

impl Player {
    /// Creates a new player.
    pub fn new(name: impl Into<String>, marker: Marker) -> Self {
        Self {
            name: name.into(),
            marker,
        }
    }

    /// Returns the player's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the player's marker.
    pub fn marker(&self) -> Marker {
        self.marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_place_rejects_occupied() {
        let mut board = Board::new();
        assert!(board.try_place(4, Marker::X));
        let before = board.snapshot();
        assert!(!board.try_place(4, Marker::O));
        assert!(!board.try_place(4, Marker::X));
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_try_place_rejects_out_of_range() {
        let mut board = Board::new();
        assert!(!board.try_place(9, Marker::X));
        assert!(!board.try_place(usize::MAX, Marker::O));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut board = Board::new();
        let mut snapshot = board.snapshot();
        snapshot[0] = Cell::Occupied(Marker::O);
        assert!(board.is_empty(0));

        assert!(board.try_place(1, Marker::X));
        assert!(snapshot[1].is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut board = Board::parse("XOX OXO XOX").unwrap();
        board.reset();
        assert_eq!(board, Board::new());
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display_parses_back() {
        let board = Board::parse("X.O .X. ..O").unwrap();
        assert_eq!(board.display(), "X|2|O\n-+-+-\n4|X|6\n-+-+-\n7|8|O");
        assert_eq!(Board::parse(&board.display()).unwrap(), board);
    }

    #[test]
    fn test_dashes_are_empty_cells() {
        assert_eq!(
            Board::parse("XX-.O...O").unwrap(),
            Board::parse("XX..O...O").unwrap()
        );
        assert_eq!(
            Board::parse("---\n-X-\n---").unwrap().empty_cells(),
            vec![0, 1, 2, 3, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_separator_lines_are_skipped() {
        let board = Board::parse("X|-|O\n-+-+-\n-|X|-\n---+---+---\n-|-|O").unwrap();
        assert_eq!(board, Board::parse("X.O .X. ..O").unwrap());
        assert!(matches!(
            Board::parse("X+O......"),
            Err(EngineError::MalformedBoard(_))
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            Board::parse("XO"),
            Err(EngineError::MalformedBoard(_))
        ));
        assert!(matches!(
            Board::parse("XOXOXOXOXO"),
            Err(EngineError::MalformedBoard(_))
        ));
        assert!(matches!(
            Board::parse("XOXOZOXOX"),
            Err(EngineError::MalformedBoard(_))
        ));
    }

    #[test]
    fn test_marker_from_str_ignores_case() {
        assert_eq!("x".parse::<Marker>().unwrap(), Marker::X);
        assert_eq!("O".parse::<Marker>().unwrap(), Marker::O);
        assert!("z".parse::<Marker>().is_err());
    }
}
