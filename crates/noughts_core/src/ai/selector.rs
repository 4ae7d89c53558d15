//! Difficulty-tiered move selection.

use super::difficulty::{BlendPolicy, Difficulty, Policy, TierMix};
use super::minimax::{SearchDepth, find_best_move};
use crate::error::EngineError;
use crate::rules::open_cells;
use crate::types::{Cells, Marker};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// Chooses moves for the computer player.
///
/// Holds no game state: every call works on the cells it is given. The
/// random source and the blend parameters are injected so tests can force
/// either branch of the blended tiers.
#[derive(Debug, Clone)]
pub struct MoveSelector<R> {
    rng: R,
    blend: BlendPolicy,
}

impl MoveSelector<ChaCha8Rng> {
    /// Creates a selector with a reproducible random stream.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a selector seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> MoveSelector<R> {
    /// Creates a selector with the default blend.
    pub fn new(rng: R) -> Self {
        Self::with_blend(rng, BlendPolicy::default())
    }

    /// Creates a selector with a custom blend.
    pub fn with_blend(rng: R, blend: BlendPolicy) -> Self {
        Self { rng, blend }
    }

    /// Returns the blend parameters.
    pub fn blend(&self) -> &BlendPolicy {
        &self.blend
    }

    /// Chooses an empty cell for `me` according to `difficulty`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoLegalMoves`] if every cell is occupied.
    #[instrument(skip(self, cells))]
    pub fn select_move(
        &mut self,
        cells: &Cells,
        difficulty: Difficulty,
        me: Marker,
    ) -> Result<usize, EngineError> {
        let open = open_cells(cells);
        if open.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        let index = match difficulty.policy(&self.blend) {
            Policy::Random => self.random_move(&open),
            Policy::Blend(mix) => {
                if self.rng.gen_bool(chance(mix)) {
                    search(cells, me, SearchDepth::Limited(mix.depth))?
                } else {
                    debug!("Blend fell through to random play");
                    self.random_move(&open)
                }
            }
            Policy::Search(depth) => search(cells, me, depth)?,
        };

        debug!(index, "Selected move");
        Ok(index)
    }

    fn random_move(&mut self, open: &[usize]) -> usize {
        open[self.rng.gen_range(0..open.len())]
    }
}

fn search(cells: &Cells, me: Marker, depth: SearchDepth) -> Result<usize, EngineError> {
    let mut scratch = *cells;
    find_best_move(&mut scratch, me, depth).ok_or(EngineError::NoLegalMoves)
}

// Out-of-range probabilities saturate; NaN never searches.
fn chance(mix: TierMix) -> f64 {
    if mix.is_valid() {
        mix.probability
    } else if mix.probability > 1.0 {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Board;
    use rand::rngs::mock::StepRng;

    // X threatens the anti-diagonal; only 6 avoids an immediate loss.
    const BLOCK_AT_SIX: &str = "O.X .X. ...";

    fn cells(text: &str) -> Cells {
        Board::parse(text).unwrap().snapshot()
    }

    fn forced(probability: f64) -> BlendPolicy {
        BlendPolicy {
            medium: TierMix::new(probability, 2),
            hard: TierMix::new(probability, 4),
        }
    }

    #[test]
    fn test_easy_picks_empty_cells() {
        let mut selector = MoveSelector::seeded(7);
        let board = cells("XO. .X. O..");
        for _ in 0..200 {
            let index = selector.select_move(&board, Difficulty::Easy, Marker::X).unwrap();
            assert!(board[index].is_empty(), "index {index} is occupied");
        }
    }

    #[test]
    fn test_easy_covers_every_empty_cell() {
        let mut selector = MoveSelector::seeded(11);
        let board = cells("X.. .O. ...");
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[selector.select_move(&board, Difficulty::Easy, Marker::X).unwrap()] = true;
        }
        assert_eq!(seen, [false, true, true, true, false, true, true, true, true]);
    }

    #[test]
    fn test_forced_search_branch() {
        let board = cells(BLOCK_AT_SIX);
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            let mut selector = MoveSelector::with_blend(StepRng::new(0, 0), forced(1.0));
            assert_eq!(selector.select_move(&board, difficulty, Marker::O), Ok(6));
        }
    }

    #[test]
    fn test_forced_random_branch() {
        // A zero stream makes the random branch pick the first empty cell.
        let board = cells(BLOCK_AT_SIX);
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            let mut selector = MoveSelector::with_blend(StepRng::new(0, 0), forced(0.0));
            assert_eq!(selector.select_move(&board, difficulty, Marker::O), Ok(1));
        }
    }

    #[test]
    fn test_blend_rates_follow_probability() {
        let board = cells(BLOCK_AT_SIX);
        let trials = 2000;

        // P(6) = p + (1 - p) / 6 with six open cells.
        for (difficulty, low, high) in [
            (Difficulty::Medium, 0.50, 0.67),
            (Difficulty::Hard, 0.77, 0.90),
        ] {
            let mut selector = MoveSelector::seeded(42);
            let blocks = (0..trials)
                .filter(|_| selector.select_move(&board, difficulty, Marker::O) == Ok(6))
                .count();
            let rate = blocks as f64 / trials as f64;
            assert!(
                (low..=high).contains(&rate),
                "{difficulty} blocked at rate {rate}"
            );
        }
    }

    #[test]
    fn test_impossible_is_deterministic() {
        let board = cells("... .X. ...");
        let mut a = MoveSelector::seeded(1);
        let mut b = MoveSelector::seeded(2);
        assert_eq!(a.select_move(&board, Difficulty::Impossible, Marker::O), Ok(0));
        assert_eq!(b.select_move(&board, Difficulty::Impossible, Marker::O), Ok(0));
    }

    #[test]
    fn test_full_board_has_no_legal_moves() {
        let board = cells("XOX XOO OXX");
        let mut selector = MoveSelector::seeded(3);
        for difficulty in [
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Impossible,
        ] {
            assert_eq!(
                selector.select_move(&board, difficulty, Marker::O),
                Err(EngineError::NoLegalMoves)
            );
        }
    }

    #[test]
    fn test_out_of_range_probability_saturates() {
        assert_eq!(chance(TierMix::new(3.0, 2)), 1.0);
        assert_eq!(chance(TierMix::new(-1.0, 2)), 0.0);
        assert_eq!(chance(TierMix::new(f64::NAN, 2)), 0.0);
    }
}
