//! Pseudo-legal move generation, split into tactical and quiet moves.
//!
//! Tactical moves are captures, en passant and every promotion; quiet moves
//! are everything else, castling included. Generated moves may leave the
//! mover in check: play them and test [`Position::is_illegal`].

mod pawns;
mod pieces;

use crate::chess_move::Move;
use crate::position::Position;

/// Capacity of a [`MoveList`]; above the 218-move maximum of any legal position.
pub const MAX_MOVES: usize = 256;

/// Stack-allocated buffer of generated moves.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES);
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.moves[..self.len].swap(a, b);
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Append captures, en passant captures and promotions to `list`.
pub fn generate_tactical(pos: &Position, list: &mut MoveList) {
    pawns::tactical(pos, list);
    pieces::generate(pos, list, pieces::Targets::Captures);
}

/// Append non-capturing, non-promoting moves (castling included) to `list`.
pub fn generate_quiet(pos: &Position, list: &mut MoveList) {
    pawns::quiet(pos, list);
    pieces::generate(pos, list, pieces::Targets::Quiet);
    pieces::castling(pos, list);
}

/// All pseudo-legal moves, tactical first.
pub fn generate_all(pos: &Position) -> MoveList {
    let mut list = MoveList::new();
    generate_tactical(pos, &mut list);
    generate_quiet(pos, &mut list);
    list
}

/// Strictly legal moves of `pos`.
pub fn legal_moves(pos: &Position) -> MoveList {
    let mut scratch = pos.clone();
    let mut legal = MoveList::new();
    for &mv in generate_all(pos).iter() {
        let undo = scratch.make_move(mv);
        if !scratch.is_illegal() {
            legal.push(mv);
        }
        scratch.unmake_move(mv, undo);
    }
    legal
}
