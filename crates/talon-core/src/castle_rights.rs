//! Castling rights as a four-bit set.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;
use crate::square::Square;

/// Bit 0 white king side, bit 1 white queen side, bit 2 black king side,
/// bit 3 black queen side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);
    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    /// King-side right for `color`.
    #[inline]
    pub const fn king_side(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights::WHITE_KING,
            Color::Black => CastleRights::BLACK_KING,
        }
    }

    /// Queen-side right for `color`.
    #[inline]
    pub const fn queen_side(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights::WHITE_QUEEN,
            Color::Black => CastleRights::BLACK_QUEEN,
        }
    }

    /// Rights left after a piece moves from or to `sq`.
    ///
    /// Touching a king's or rook's home square revokes the rights tied to it.
    #[inline]
    pub const fn after_touching(self, sq: Square) -> CastleRights {
        CastleRights(self.0 & KEEP_MASK[sq.index()])
    }

    /// Parse the FEN castling field (`"-"` or any subset of `KQkq`).
    pub fn from_fen(field: &str) -> Result<CastleRights, FenError> {
        if field == "-" {
            return Ok(CastleRights::NONE);
        }
        let mut bits = 0u8;
        for c in field.chars() {
            bits |= match c {
                'K' => CastleRights::WHITE_KING.0,
                'Q' => CastleRights::WHITE_QUEEN.0,
                'k' => CastleRights::BLACK_KING.0,
                'q' => CastleRights::BLACK_QUEEN.0,
                other => return Err(FenError::InvalidCastling { character: other }),
            };
        }
        Ok(CastleRights(bits))
    }
}

const KEEP_MASK: [u8; 64] = {
    let mut mask = [0b1111u8; 64];
    mask[Square::E1.index()] = 0b1100;
    mask[Square::A1.index()] = 0b1101;
    mask[Square::H1.index()] = 0b1110;
    mask[Square::E8.index()] = 0b0011;
    mask[Square::A8.index()] = 0b0111;
    mask[Square::H8.index()] = 0b1011;
    mask
};

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("-");
        }
        for (right, c) in [
            (CastleRights::WHITE_KING, 'K'),
            (CastleRights::WHITE_QUEEN, 'Q'),
            (CastleRights::BLACK_KING, 'k'),
            (CastleRights::BLACK_QUEEN, 'q'),
        ] {
            if self.contains(right) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::CastleRights;
    use crate::error::FenError;
    use crate::square::Square;

    #[test]
    fn fen_roundtrip() {
        for text in ["-", "K", "Qk", "KQkq", "kq"] {
            assert_eq!(CastleRights::from_fen(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn rejects_unknown_letters() {
        assert_eq!(
            CastleRights::from_fen("KX"),
            Err(FenError::InvalidCastling { character: 'X' })
        );
    }

    #[test]
    fn moving_king_or_rook_revokes() {
        let all = CastleRights::ALL;
        assert_eq!(all.after_touching(Square::E1).to_string(), "kq");
        assert_eq!(all.after_touching(Square::H8).to_string(), "KQq");
        assert_eq!(all.after_touching(Square::A1).to_string(), "Kkq");
        assert_eq!(all.after_touching(Square::E8.offset(0, -4).unwrap()), all);
    }
}
