//! Piece values and the bishop pair.

use talon_core::PieceKind;

use super::score::{S, Score};

/// Base value of each piece kind, indexed by [`PieceKind::index`].
pub const PIECE_VALUE: [Score; PieceKind::COUNT] = [
    S(95, 115),
    S(315, 300),
    S(330, 315),
    S(490, 525),
    S(950, 960),
    S(0, 0),
];

/// Bonus for owning two or more bishops.
pub const BISHOP_PAIR: Score = S(40, 55);

#[inline]
pub fn value(kind: PieceKind) -> Score {
    PIECE_VALUE[kind.index()]
}

/// Midgame value in centipawns, used for move ordering.
#[inline]
pub fn centipawns(kind: PieceKind) -> i32 {
    PIECE_VALUE[kind.index()].mg
}
