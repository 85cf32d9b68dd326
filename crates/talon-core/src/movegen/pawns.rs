//! Pawn pushes, captures and promotions.

use crate::chess_move::Move;
use crate::piece::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

fn own_pawns(pos: &Position) -> impl Iterator<Item = Square> + '_ {
    let us = pos.side_to_move();
    pos.pieces()
        .filter(move |(_, p)| p.color() == us && p.kind() == PieceKind::Pawn)
        .map(|(sq, _)| sq)
}

fn push_promotions(list: &mut MoveList, from: Square, to: Square) {
    for kind in PROMOTIONS {
        list.push(Move::promotion(from, to, kind));
    }
}

pub(super) fn tactical(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let step = us.pawn_step();
    let last_rank = if step > 0 { 7 } else { 0 };

    for from in own_pawns(pos) {
        for df in [-1, 1] {
            let Some(to) = from.offset(df, step) else {
                continue;
            };
            if pos.piece_on(to).is_some_and(|p| p.color() != us) {
                if to.rank() == last_rank {
                    push_promotions(list, from, to);
                } else {
                    list.push(Move::new(from, to));
                }
            } else if pos.en_passant() == Some(to) {
                list.push(Move::en_passant(from, to));
            }
        }

        if let Some(to) = from.offset(0, step)
            && to.rank() == last_rank
            && pos.piece_on(to).is_none()
        {
            push_promotions(list, from, to);
        }
    }
}

pub(super) fn quiet(pos: &Position, list: &mut MoveList) {
    let step = pos.side_to_move().pawn_step();
    let (start_rank, last_rank) = if step > 0 { (1, 7) } else { (6, 0) };

    for from in own_pawns(pos) {
        let Some(to) = from.offset(0, step) else {
            continue;
        };
        if to.rank() == last_rank || pos.piece_on(to).is_some() {
            continue;
        }
        list.push(Move::new(from, to));
        if from.rank() == start_rank
            && let Some(two) = to.offset(0, step)
            && pos.piece_on(two).is_none()
        {
            list.push(Move::new(from, two));
        }
    }
}
