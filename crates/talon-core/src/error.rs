//! Errors raised while reading positions and moves from text.

use thiserror::Error;

/// A malformed FEN string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 4 to 6 fields, found {found}")]
    WrongFieldCount { found: usize },

    #[error("expected 8 ranks, found {found}")]
    WrongRankCount { found: usize },

    #[error("rank {rank} describes {length} squares")]
    BadRankLength { rank: usize, length: usize },

    #[error("invalid piece character '{character}'")]
    InvalidPiece { character: char },

    #[error("invalid side to move \"{found}\"")]
    InvalidColor { found: String },

    #[error("invalid castling character '{character}'")]
    InvalidCastling { character: char },

    #[error("invalid en passant square \"{found}\"")]
    InvalidEnPassant { found: String },

    #[error("invalid move counter \"{found}\"")]
    InvalidCounter { found: String },

    #[error("{color} must have exactly one king, found {found}")]
    KingCount { color: &'static str, found: usize },

    #[error("pawn on back rank at {square}")]
    PawnOnBackRank { square: String },

    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// A move string that is not a legal move in the current position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("malformed move \"{0}\"")]
    Malformed(String),

    #[error("illegal move \"{0}\"")]
    Illegal(String),
}
