//! Moves packed into 16 bits.
//!
//! Layout: bits 0-5 origin, 6-11 destination, 12-13 promotion piece,
//! 14-15 move kind. The all-zero word is reserved for [`Move::NULL`].

use std::fmt;

use crate::piece::PieceKind;
use crate::square::Square;

const TO_SHIFT: u16 = 6;
const PROMO_SHIFT: u16 = 12;
const KIND_SHIFT: u16 = 14;
const SQ_MASK: u16 = 0x3F;

/// What a move does beyond relocating a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    Normal = 0,
    Castle = 1,
    EnPassant = 2,
    Promotion = 3,
}

/// A move. `Copy`, two bytes, comparable for equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    /// The "no move" sentinel; also the move stored for null-move entries.
    pub const NULL: Move = Move(0);

    const fn pack(from: Square, to: Square, promo: u16, kind: MoveKind) -> Move {
        Move(
            from.index() as u16
                | (to.index() as u16) << TO_SHIFT
                | promo << PROMO_SHIFT
                | (kind as u16) << KIND_SHIFT,
        )
    }

    /// A plain move or capture.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move::pack(from, to, 0, MoveKind::Normal)
    }

    /// A castling move, encoded as the king's two-square step.
    #[inline]
    pub const fn castle(from: Square, to: Square) -> Move {
        Move::pack(from, to, 0, MoveKind::Castle)
    }

    /// An en passant capture.
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Move {
        Move::pack(from, to, 0, MoveKind::EnPassant)
    }

    /// A promotion to `piece`, which must be a knight, bishop, rook or queen.
    #[inline]
    pub const fn promotion(from: Square, to: Square, piece: PieceKind) -> Move {
        let promo = match piece {
            PieceKind::Knight => 0,
            PieceKind::Bishop => 1,
            PieceKind::Rook => 2,
            _ => 3,
        };
        Move::pack(from, to, promo, MoveKind::Promotion)
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked((self.0 & SQ_MASK) as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked(((self.0 >> TO_SHIFT) & SQ_MASK) as u8)
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        match self.0 >> KIND_SHIFT {
            0 => MoveKind::Normal,
            1 => MoveKind::Castle,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Promotion,
        }
    }

    /// The promotion piece, for promotion moves only.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        if !matches!(self.kind(), MoveKind::Promotion) {
            return None;
        }
        Some(match (self.0 >> PROMO_SHIFT) & 0b11 {
            0 => PieceKind::Knight,
            1 => PieceKind::Bishop,
            2 => PieceKind::Rook,
            _ => PieceKind::Queen,
        })
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind(), MoveKind::Castle)
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind(), MoveKind::Promotion)
    }

    /// The raw 16-bit encoding, as stored in the transposition table.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Move {
        Move(raw)
    }
}

/// UCI long algebraic form, e.g. `e2e4`, `e7e8q`, or `0000` for the null move.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(piece) = self.promotion_piece() {
            write!(f, "{}", piece.fen_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}, {:?})", self.kind())
    }
}
