//! UCI protocol errors.

use talon_core::{FenError, MoveParseError};

/// Errors that can occur during UCI protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing `startpos` or `fen` keyword.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// Failed to parse a FEN string.
    #[error("invalid FEN {fen:?}: {source}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
        source: FenError,
    },

    /// A move in the `position` command is malformed or illegal.
    #[error("invalid move: {source}")]
    InvalidMove {
        #[from]
        source: MoveParseError,
    },

    /// A `go` parameter that takes a value was last on the line.
    #[error("missing value for go parameter {param}")]
    MissingGoValue { param: String },

    /// A `go` parameter value is not a number in range.
    #[error("invalid value {value:?} for go parameter {param}")]
    InvalidGoValue { param: String, value: String },

    /// A `setoption` names a known option with an unusable value.
    #[error("invalid value {value:?} for option {name}")]
    InvalidOptionValue { name: String, value: String },

    /// An I/O error occurred while reading from stdin.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
