//! Difficulty tiers and the policies they map to.

use super::minimax::SearchDepth;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Strength of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Uniform random play.
    Easy,
    /// Shallow search half of the time.
    #[default]
    Medium,
    /// Deeper search most of the time.
    Hard,
    /// Exhaustive search every move.
    Impossible,
}

impl Difficulty {
    /// Parses a difficulty key (`easy`, `medium`, `hard`, `impossible`), ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDifficulty`] for any other key.
    #[instrument]
    pub fn from_key(key: &str) -> Result<Self, EngineError> {
        match key.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "impossible" => Ok(Difficulty::Impossible),
            _ => Err(EngineError::UnknownDifficulty(key.to_string())),
        }
    }

    /// Resolves the move-selection policy for this tier.
    pub fn policy(self, blend: &BlendPolicy) -> Policy {
        match self {
            Difficulty::Easy => Policy::Random,
            Difficulty::Medium => Policy::Blend(blend.medium),
            Difficulty::Hard => Policy::Blend(blend.hard),
            Difficulty::Impossible => Policy::Search(SearchDepth::Unlimited),
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

/// How often a blended tier searches, and how deep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierMix {
    /// Probability in `[0, 1]` of searching instead of playing randomly.
    pub probability: f64,
    /// Plies searched below the candidate move before the heuristic cutoff.
    pub depth: u32,
}

impl TierMix {
    /// Creates a new tier mix.
    pub fn new(probability: f64, depth: u32) -> Self {
        Self { probability, depth }
    }

    /// Returns true if the probability is a valid Bernoulli parameter.
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.probability)
    }
}

/// Tunable parameters for the blended tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendPolicy {
    /// Mix used by [`Difficulty::Medium`].
    pub medium: TierMix,
    /// Mix used by [`Difficulty::Hard`].
    pub hard: TierMix,
}

impl Default for BlendPolicy {
    fn default() -> Self {
        Self {
            medium: TierMix::new(0.5, 2),
            hard: TierMix::new(0.8, 4),
        }
    }
}

/// A concrete move-selection strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    /// Uniform choice among empty cells.
    Random,
    /// Depth-limited search with the mix's probability, random otherwise.
    Blend(TierMix),
    /// Always search to the given depth.
    Search(SearchDepth),
}
