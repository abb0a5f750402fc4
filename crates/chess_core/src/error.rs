//! Error types for position setup and protocol argument parsing.

use thiserror::Error;

/// Errors raised while turning external input into engine state.
///
/// Every variant describes a rejected request; none of them leaves a
/// half-updated position behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// FEN string could not be parsed into a valid board
    #[error("invalid FEN: {fen}")]
    InvalidFen { fen: String },

    /// Move text is malformed or not legal in the current position
    #[error("illegal move: {mv}")]
    IllegalMove { mv: String },

    /// `position` command without `startpos` or `fen`
    #[error("expected 'startpos' or 'fen', found {found:?}")]
    MissingPositionKind { found: Option<String> },

    /// A numeric argument could not be parsed
    #[error("invalid value {value:?} for '{option}'")]
    InvalidNumber { option: String, value: String },

    /// A keyword expecting a value was the last token
    #[error("missing value for '{option}'")]
    MissingValue { option: String },
}

/// Result type alias for chess_core operations
pub type Result<T> = std::result::Result<T, ChessError>;
