//! Error types for the fallible internal seams.
//!
//! The presentation-facing session API never returns these: a rejected move
//! is a `false`, a failed analysis is a neutral record. They surface only
//! where a caller can act on the reason (FEN loading, config files, the
//! console reporting why a move was refused).

use thiserror::Error;

/// Errors raised by the board provider.
#[derive(Error, Debug)]
pub enum BoardError {
    /// FEN text could not be parsed or does not describe a legal position
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Square name is not `a1`..`h8`
    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    /// Promotion piece is not one of `q`, `r`, `b`, `n`
    #[error("invalid promotion piece `{0}`")]
    InvalidPromotion(char),

    /// Move is well formed but not legal in the current position
    #[error("illegal move {from}{to}")]
    IllegalMove { from: String, to: String },
}

/// Errors raised while loading a session config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Why the session refused a player move.
#[derive(Error, Debug)]
pub enum MoveRejected {
    #[error("the session has not started")]
    NotReady,

    #[error("the engine is thinking")]
    EngineThinking,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Board(#[from] BoardError),
}
