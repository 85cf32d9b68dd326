//! Game phase from remaining officer material.

use talon_core::PieceKind;

/// Phase of a full opening complement of knights, bishops, rooks and queens.
pub const MAX_PHASE: i32 = 24;

/// Phase contribution of one piece: knight and bishop 1, rook 2, queen 4.
#[inline]
pub const fn weight(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Knight | PieceKind::Bishop => 1,
        PieceKind::Rook => 2,
        PieceKind::Queen => 4,
        PieceKind::Pawn | PieceKind::King => 0,
    }
}

#[cfg(test)]
mod tests {
    use talon_core::{PieceKind, Position};

    use super::{MAX_PHASE, weight};

    #[test]
    fn starting_material_is_max_phase() {
        let pos = Position::startpos();
        let phase: i32 = pos.pieces().map(|(_, p)| weight(p.kind())).sum();
        assert_eq!(phase, MAX_PHASE);
    }

    #[test]
    fn pawns_and_kings_carry_no_phase() {
        assert_eq!(weight(PieceKind::Pawn), 0);
        assert_eq!(weight(PieceKind::King), 0);
    }
}
