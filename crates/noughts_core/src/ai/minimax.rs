//! Naive minimax with a line-ownership heuristic at the depth cutoff.
//!
//! The search backtracks over a single scratch board: every branch places a
//! marker, recurses, and clears the cell again before the next branch, so the
//! caller's cells are unchanged once a call returns. There is no pruning.

use crate::rules::{Outcome, WIN_PATTERNS, check_winner, evaluate};
use crate::types::{CELL_COUNT, Cell, Cells, Marker};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a won position for the searching side.
pub const WIN_SCORE: i32 = 10;

/// How far the search may look below the candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchDepth {
    /// Stop after this many plies and score the position heuristically.
    Limited(u32),
    /// Search every line to a win or tie.
    Unlimited,
}

impl SearchDepth {
    fn is_exhausted(self) -> bool {
        matches!(self, SearchDepth::Limited(0))
    }

    fn deeper(self) -> Self {
        match self {
            SearchDepth::Limited(plies) => SearchDepth::Limited(plies.saturating_sub(1)),
            SearchDepth::Unlimited => SearchDepth::Unlimited,
        }
    }
}

/// Scores a position by line ownership.
///
/// For each of the eight lines, every cell held by `me` counts +1 and every
/// cell held by the opponent counts -1. Cells shared by several lines count
/// once per line.
pub fn heuristic_score(cells: &Cells, me: Marker) -> i32 {
    WIN_PATTERNS
        .iter()
        .flatten()
        .map(|&index| match cells[index] {
            Cell::Occupied(marker) if marker == me => 1,
            Cell::Occupied(_) => -1,
            Cell::Empty => 0,
        })
        .sum()
}

/// Scores `cells` for `me` with `to_move` about to play.
///
/// Terminal positions score [`WIN_SCORE`], `-WIN_SCORE` or 0 and are checked
/// before the depth cutoff.
pub fn minimax(cells: &mut Cells, depth: SearchDepth, to_move: Marker, me: Marker) -> i32 {
    match evaluate(cells) {
        Outcome::Win { marker, .. } if marker == me => return WIN_SCORE,
        Outcome::Win { .. } => return -WIN_SCORE,
        Outcome::Tie => return 0,
        Outcome::InProgress => {}
    }

    if depth.is_exhausted() {
        return heuristic_score(cells, me);
    }

    let maximizing = to_move == me;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for index in 0..CELL_COUNT {
        if !cells[index].is_empty() {
            continue;
        }
        cells[index] = Cell::Occupied(to_move);
        let score = minimax(cells, depth.deeper(), to_move.opponent(), me);
        cells[index] = Cell::Empty;

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}

/// Returns the lowest empty index that completes a line for `me`.
pub fn winning_move(cells: &mut Cells, me: Marker) -> Option<usize> {
    (0..CELL_COUNT).find(|&index| {
        if !cells[index].is_empty() {
            return false;
        }
        cells[index] = Cell::Occupied(me);
        let wins = check_winner(cells) == Some(me);
        cells[index] = Cell::Empty;
        wins
    })
}

/// Picks the best cell for `me`, or `None` if the board has no empty cell.
///
/// An immediately winning cell is returned without further search. Otherwise
/// each empty cell is tried in ascending order and scored with the opponent
/// to move; the first cell with a strictly higher score than every earlier
/// one is kept, so ties go to the lowest index.
#[instrument(skip(cells), level = "debug")]
pub fn find_best_move(cells: &mut Cells, me: Marker, depth: SearchDepth) -> Option<usize> {
    if let Some(index) = winning_move(cells, me) {
        debug!(index, "Taking immediate win");
        return Some(index);
    }

    let mut best: Option<(usize, i32)> = None;

    for index in 0..CELL_COUNT {
        if !cells[index].is_empty() {
            continue;
        }
        cells[index] = Cell::Occupied(me);
        let score = minimax(cells, depth, me.opponent(), me);
        cells[index] = Cell::Empty;

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    if let Some((index, score)) = best {
        debug!(index, score, "Search chose move");
    }
    best.map(|(index, _)| index)
}
