//! Mailbox position with incremental hashing and a repetition history.

use std::fmt;

use crate::attacks;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::error::MoveParseError;
use crate::fen::STARTING_FEN;
use crate::movegen;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;
use crate::zobrist;

/// Number of position keys the repetition history retains.
pub const REPETITION_CAPACITY: usize = 1024;
const REPETITION_MASK: usize = REPETITION_CAPACITY - 1;

/// State needed to take back a move made with [`Position::make_move`]
/// or [`Position::make_null`].
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    pub(crate) captured: Option<Piece>,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) rev_moves: u16,
    pub(crate) fullmove: u16,
    pub(crate) key: u64,
}

/// A chess position that can be searched in place.
///
/// Every made move pushes the previous key onto a ring of
/// [`REPETITION_CAPACITY`] entries indexed by a monotonically increasing
/// head, so keys from before a ring wrap are simply no longer reachable.
#[derive(Clone)]
pub struct Position {
    pub(crate) squares: [Option<Piece>; 64],
    pub(crate) side: Color,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) rev_moves: u16,
    pub(crate) fullmove: u16,
    pub(crate) key: u64,
    pub(crate) kings: [Square; 2],
    pub(crate) history: Vec<u64>,
    pub(crate) head: usize,
}

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Position {
        STARTING_FEN
            .parse()
            .expect("starting FEN is well formed")
    }

    /// Assemble a position from validated parts. Kings must be present.
    pub(crate) fn from_parts(
        squares: [Option<Piece>; 64],
        side: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        rev_moves: u16,
        fullmove: u16,
    ) -> Position {
        let mut kings = [Square::E1, Square::E8];
        for sq in Square::all() {
            if let Some(piece) = squares[sq.index()]
                && piece.kind() == PieceKind::King
            {
                kings[piece.color().index()] = sq;
            }
        }
        Position {
            key: zobrist::hash(&squares, side, castling, en_passant),
            squares,
            side,
            castling,
            en_passant,
            rev_moves,
            fullmove,
            kings,
            history: vec![0; REPETITION_CAPACITY],
            head: 0,
        }
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Plies since the last capture or pawn move.
    #[inline]
    pub fn rev_moves(&self) -> u16 {
        self.rev_moves
    }

    #[inline]
    pub fn fullmove(&self) -> u16 {
        self.fullmove
    }

    /// Zobrist key of the current position.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Occupied squares with their pieces, in square order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.squares[sq.index()].map(|p| (sq, p)))
    }

    /// Is `sq` attacked by any piece of `by`?
    #[inline]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        attacks::is_square_attacked(self, sq, by)
    }

    /// Is the side to move in check?
    #[inline]
    pub fn in_check(&self) -> bool {
        self.is_attacked(self.king_square(self.side), !self.side)
    }

    /// Did the last move leave the mover's own king attacked?
    #[inline]
    pub fn is_illegal(&self) -> bool {
        self.is_attacked(self.king_square(!self.side), self.side)
    }

    /// Does the side to move own at least one knight, bishop, rook or queen?
    ///
    /// Passing is unsound in pawn-and-king endings, where zugzwang is common.
    pub fn may_null(&self) -> bool {
        let side = self.side;
        self.squares
            .iter()
            .flatten()
            .any(|p| p.color() == side && p.kind().is_officer())
    }

    /// Does `mv` capture something in this position?
    #[inline]
    pub fn is_capture(&self, mv: Move) -> bool {
        mv.kind() == MoveKind::EnPassant
            || self.squares[mv.to().index()].is_some_and(|p| p.color() != self.side)
    }

    /// How many plies back [`repetition_key`](Self::repetition_key) can see.
    #[inline]
    pub fn repetition_depth(&self) -> usize {
        self.head.min(REPETITION_CAPACITY)
    }

    /// The key of the position `plies_ago` plies before the current one.
    ///
    /// Returns `None` when that position is older than the retained history.
    #[inline]
    pub fn repetition_key(&self, plies_ago: usize) -> Option<u64> {
        if plies_ago == 0 || plies_ago > self.repetition_depth() {
            return None;
        }
        Some(self.history[(self.head - plies_ago) & REPETITION_MASK])
    }

    #[inline]
    pub(crate) fn push_history(&mut self) {
        self.history[self.head & REPETITION_MASK] = self.key;
        self.head += 1;
    }

    #[inline]
    pub(crate) fn pop_history(&mut self) {
        self.head -= 1;
    }

    /// Resolve UCI text such as `e2e4` or `a7a8q` to a legal move.
    pub fn parse_uci_move(&self, text: &str) -> Result<Move, MoveParseError> {
        let bytes = text.as_bytes();
        if !text.is_ascii()
            || !(4..=5).contains(&bytes.len())
            || Square::from_algebraic(&text[..2]).is_none()
            || Square::from_algebraic(&text[2..4]).is_none()
        {
            return Err(MoveParseError::Malformed(text.to_owned()));
        }
        movegen::legal_moves(self)
            .iter()
            .copied()
            .find(|mv| mv.to_string() == text)
            .ok_or_else(|| MoveParseError::Illegal(text.to_owned()))
    }

    /// Parse and play a UCI move for good, keeping it in the repetition history.
    pub fn play_uci_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_uci_move(text)?;
        self.make_move(mv);
        Ok(mv)
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::startpos()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, REPETITION_CAPACITY};

    #[test]
    fn startpos_basics() {
        let pos = Position::startpos();
        assert!(!pos.in_check());
        assert!(!pos.is_illegal());
        assert!(pos.may_null());
        assert_eq!(pos.repetition_depth(), 0);
        assert_eq!(pos.repetition_key(1), None);
    }

    #[test]
    fn repetition_keys_walk_backwards() {
        let mut pos = Position::startpos();
        let k0 = pos.key();
        pos.play_uci_move("g1f3").unwrap();
        let k1 = pos.key();
        pos.play_uci_move("g8f6").unwrap();
        assert_eq!(pos.repetition_key(1), Some(k1));
        assert_eq!(pos.repetition_key(2), Some(k0));
        assert_eq!(pos.repetition_key(3), None);
    }

    #[test]
    fn history_wraps_without_panicking() {
        let mut pos = Position::startpos();
        let cycle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        for i in 0..REPETITION_CAPACITY + 10 {
            pos.play_uci_move(cycle[i % 4]).unwrap();
        }
        assert_eq!(pos.repetition_depth(), REPETITION_CAPACITY);
        assert_eq!(pos.repetition_key(4), Some(pos.key()));
        assert_eq!(pos.repetition_key(REPETITION_CAPACITY + 1), None);
    }

    #[test]
    fn may_null_requires_officers() {
        let pawns: Position = "4k3/4p3/8/8/8/8/4P3/4K3 w - - 0 1".parse().unwrap();
        assert!(!pawns.may_null());
        let knight: Position = "4k3/4p3/8/8/8/8/4P3/4KN2 w - - 0 1".parse().unwrap();
        assert!(knight.may_null());
    }

    #[test]
    fn parse_uci_move_rejects_illegal_and_malformed() {
        let pos = Position::startpos();
        assert!(pos.parse_uci_move("e2e4").is_ok());
        assert!(pos.parse_uci_move("e2e5").is_err());
        assert!(pos.parse_uci_move("zz").is_err());
        assert!(pos.parse_uci_move("e2").is_err());
    }

    #[test]
    fn is_capture_sees_en_passant() {
        let pos: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let ep = pos.parse_uci_move("e5d6").unwrap();
        assert!(pos.is_capture(ep));
        let push = pos.parse_uci_move("e5e6").unwrap();
        assert!(!pos.is_capture(push));
    }
}
