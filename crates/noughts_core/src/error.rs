//! Engine error types.

/// Error raised by the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The move selector was asked to play on a full board.
    #[display("No legal moves: the board is full")]
    NoLegalMoves,

    /// A difficulty key did not name a known tier.
    #[display("Unknown difficulty: {:?}", _0)]
    UnknownDifficulty(String),

    /// Board text could not be parsed.
    #[display("Malformed board: {}", _0)]
    MalformedBoard(String),
}

impl std::error::Error for EngineError {}
