//! Zobrist keys, generated at compile time.

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::piece::Piece;
use crate::square::Square;

const PIECE_KEYS: usize = Piece::COUNT * Square::COUNT;
const SIDE_KEY: usize = PIECE_KEYS;
const CASTLE_KEYS: usize = SIDE_KEY + 1;
const EP_KEYS: usize = CASTLE_KEYS + 16;
const TOTAL_KEYS: usize = EP_KEYS + 8;

const SEED: u64 = 0x7461_6c6f_6e5f_7a6b;

static KEYS: [u64; TOTAL_KEYS] = {
    let mut keys = [0u64; TOTAL_KEYS];
    let mut state = SEED;
    let mut i = 0;
    while i < TOTAL_KEYS {
        // splitmix64
        state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        keys[i] = z ^ (z >> 31);
        i += 1;
    }
    keys
};

#[inline]
pub(crate) fn piece_square(piece: Piece, sq: Square) -> u64 {
    KEYS[piece.index() * Square::COUNT + sq.index()]
}

#[inline]
pub(crate) fn side_to_move() -> u64 {
    KEYS[SIDE_KEY]
}

#[inline]
pub(crate) fn castling(rights: CastleRights) -> u64 {
    KEYS[CASTLE_KEYS + rights.bits() as usize]
}

#[inline]
pub(crate) fn en_passant(sq: Square) -> u64 {
    KEYS[EP_KEYS + sq.file() as usize]
}

/// Hash a full position description from scratch.
pub(crate) fn hash(
    squares: &[Option<Piece>; 64],
    side: Color,
    rights: CastleRights,
    ep: Option<Square>,
) -> u64 {
    let mut key = castling(rights);
    for sq in Square::all() {
        if let Some(piece) = squares[sq.index()] {
            key ^= piece_square(piece, sq);
        }
    }
    if side == Color::Black {
        key ^= side_to_move();
    }
    if let Some(sq) = ep {
        key ^= en_passant(sq);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::KEYS;

    #[test]
    fn keys_are_distinct_and_nonzero() {
        let mut keys = KEYS.to_vec();
        assert!(keys.iter().all(|&k| k != 0));
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), KEYS.len(), "zobrist keys collide");
    }
}
