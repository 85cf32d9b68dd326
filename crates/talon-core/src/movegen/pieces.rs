//! Knight, slider, king and castling moves.

use crate::attacks::{BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

/// Which destinations to emit.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(super) enum Targets {
    Captures,
    Quiet,
}

pub(super) fn generate(pos: &Position, list: &mut MoveList, targets: Targets) {
    let us = pos.side_to_move();
    let mut emit = |from: Square, to: Square| -> bool {
        match pos.piece_on(to) {
            None => {
                if targets == Targets::Quiet {
                    list.push(Move::new(from, to));
                }
                true
            }
            Some(victim) => {
                if victim.color() != us && targets == Targets::Captures {
                    list.push(Move::new(from, to));
                }
                false
            }
        }
    };

    for (from, piece) in pos.pieces().filter(|(_, p)| p.color() == us) {
        match piece.kind() {
            PieceKind::Pawn => {}
            PieceKind::Knight => leap(from, &KNIGHT_OFFSETS, &mut emit),
            PieceKind::King => leap(from, &KING_OFFSETS, &mut emit),
            PieceKind::Bishop => slide(from, &BISHOP_DIRECTIONS, &mut emit),
            PieceKind::Rook => slide(from, &ROOK_DIRECTIONS, &mut emit),
            PieceKind::Queen => {
                slide(from, &ROOK_DIRECTIONS, &mut emit);
                slide(from, &BISHOP_DIRECTIONS, &mut emit);
            }
        }
    }
}

fn leap(from: Square, offsets: &[(i8, i8)], emit: &mut impl FnMut(Square, Square) -> bool) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            emit(from, to);
        }
    }
}

/// `emit` returns whether the ray continues past `to`.
fn slide(from: Square, directions: &[(i8, i8)], emit: &mut impl FnMut(Square, Square) -> bool) {
    for &(df, dr) in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(df, dr) {
            if !emit(from, to) {
                break;
            }
            cursor = to;
        }
    }
}

pub(super) fn castling(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let them = !us;
    let rank = if us == Color::White { 0 } else { 7 };
    let king_from = Square::new(4, rank);
    let rook = Some(Piece::new(PieceKind::Rook, us));

    if pos.piece_on(king_from) != Some(Piece::new(PieceKind::King, us)) {
        return;
    }

    if pos.castling().contains(CastleRights::king_side(us))
        && pos.piece_on(Square::new(7, rank)) == rook
        && empty(pos, rank, &[5, 6])
        && safe(pos, rank, them, &[4, 5, 6])
    {
        list.push(Move::castle(king_from, Square::new(6, rank)));
    }
    if pos.castling().contains(CastleRights::queen_side(us))
        && pos.piece_on(Square::new(0, rank)) == rook
        && empty(pos, rank, &[1, 2, 3])
        && safe(pos, rank, them, &[4, 3, 2])
    {
        list.push(Move::castle(king_from, Square::new(2, rank)));
    }
}

fn empty(pos: &Position, rank: u8, files: &[u8]) -> bool {
    files
        .iter()
        .all(|&f| pos.piece_on(Square::new(f, rank)).is_none())
}

fn safe(pos: &Position, rank: u8, them: Color, files: &[u8]) -> bool {
    files
        .iter()
        .all(|&f| !pos.is_attacked(Square::new(f, rank), them))
}
