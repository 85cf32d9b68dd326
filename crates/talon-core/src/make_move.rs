//! Make/unmake of real and null moves.
//!
//! Legality is not checked here: callers make a pseudo-legal move and ask
//! [`Position::is_illegal`] afterwards.

use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::position::{Position, Undo};
use crate::square::Square;
use crate::zobrist;

/// Rook origin and destination for the castle whose king lands on `king_to`.
fn castle_rook(king_to: Square) -> (Square, Square) {
    match king_to {
        Square::G1 => (Square::H1, Square::F1),
        Square::C1 => (Square::A1, Square::D1),
        Square::G8 => (Square::H8, Square::F8),
        _ => (Square::A8, Square::D8),
    }
}

/// Square of the pawn removed by an en passant capture.
#[inline]
fn en_passant_victim(mv: Move) -> Square {
    Square::new(mv.to().file(), mv.from().rank())
}

impl Position {
    #[inline]
    fn put(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
        self.key ^= zobrist::piece_square(piece, sq);
    }

    #[inline]
    fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index()].take();
        if let Some(p) = piece {
            self.key ^= zobrist::piece_square(p, sq);
        }
        piece
    }

    fn snapshot(&self) -> Undo {
        Undo {
            captured: None,
            castling: self.castling,
            en_passant: self.en_passant,
            rev_moves: self.rev_moves,
            fullmove: self.fullmove,
            key: self.key,
        }
    }

    /// Play `mv` on the board. The move must be pseudo-legal here.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let mut undo = self.snapshot();
        self.push_history();

        let us = self.side;
        let (from, to) = (mv.from(), mv.to());
        let piece = self.take(from).expect("move origin holds a piece");

        if let Some(ep) = self.en_passant.take() {
            self.key ^= zobrist::en_passant(ep);
        }
        self.key ^= zobrist::castling(self.castling);
        // Counters saturate: FEN accepts any u16.
        self.rev_moves = self.rev_moves.saturating_add(1);

        match mv.kind() {
            MoveKind::EnPassant => {
                undo.captured = self.take(en_passant_victim(mv));
            }
            MoveKind::Castle => {
                let (rook_from, rook_to) = castle_rook(to);
                if let Some(rook) = self.take(rook_from) {
                    self.put(rook_to, rook);
                }
            }
            MoveKind::Normal | MoveKind::Promotion => {
                undo.captured = self.take(to);
            }
        }
        if undo.captured.is_some() {
            self.rev_moves = 0;
        }

        let placed = match mv.promotion_piece() {
            Some(kind) => Piece::new(kind, us),
            None => piece,
        };
        self.put(to, placed);

        match piece.kind() {
            PieceKind::Pawn => {
                self.rev_moves = 0;
                if from.rank().abs_diff(to.rank()) == 2 {
                    let ep = Square::new(from.file(), (from.rank() + to.rank()) / 2);
                    self.en_passant = Some(ep);
                    self.key ^= zobrist::en_passant(ep);
                }
            }
            PieceKind::King => self.kings[us.index()] = to,
            _ => {}
        }

        self.castling = self.castling.after_touching(from).after_touching(to);
        self.key ^= zobrist::castling(self.castling);

        self.side = !us;
        self.key ^= zobrist::side_to_move();
        if us == Color::Black {
            self.fullmove = self.fullmove.saturating_add(1);
        }
        undo
    }

    /// Take back `mv`, which must be the last move made with `undo` as its token.
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side = !self.side;
        let us = self.side;

        let (from, to) = (mv.from(), mv.to());
        let moved = self.squares[to.index()]
            .take()
            .expect("move destination holds a piece");
        let origin = if mv.is_promotion() {
            Piece::new(PieceKind::Pawn, us)
        } else {
            moved
        };
        self.squares[from.index()] = Some(origin);

        match mv.kind() {
            MoveKind::EnPassant => {
                self.squares[en_passant_victim(mv).index()] = undo.captured;
            }
            MoveKind::Castle => {
                let (rook_from, rook_to) = castle_rook(to);
                self.squares[rook_from.index()] = self.squares[rook_to.index()].take();
            }
            MoveKind::Normal | MoveKind::Promotion => {
                self.squares[to.index()] = undo.captured;
            }
        }

        if origin.kind() == PieceKind::King {
            self.kings[us.index()] = from;
        }

        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.rev_moves = undo.rev_moves;
        self.fullmove = undo.fullmove;
        self.key = undo.key;
        self.pop_history();
    }

    /// Pass the turn. The reversible-move counter restarts, so no
    /// repetition is ever matched across a null move.
    pub fn make_null(&mut self) -> Undo {
        let undo = self.snapshot();
        self.push_history();
        if let Some(ep) = self.en_passant.take() {
            self.key ^= zobrist::en_passant(ep);
        }
        self.rev_moves = 0;
        self.side = !self.side;
        self.key ^= zobrist::side_to_move();
        undo
    }

    /// Take back a null move made with [`make_null`](Self::make_null).
    pub fn unmake_null(&mut self, undo: Undo) {
        self.side = !self.side;
        self.en_passant = undo.en_passant;
        self.rev_moves = undo.rev_moves;
        self.key = undo.key;
        self.pop_history();
    }
}
