//! Square attack detection by ray and offset scanning.

use crate::color::Color;
use crate::piece::PieceKind;
use crate::position::Position;
use crate::square::Square;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Is `sq` attacked by any piece of colour `by`?
pub(crate) fn is_square_attacked(pos: &Position, sq: Square, by: Color) -> bool {
    let holds = |target: Option<Square>, kind: PieceKind| {
        target
            .and_then(|t| pos.piece_on(t))
            .is_some_and(|p| p.color() == by && p.kind() == kind)
    };

    // A pawn of `by` attacks diagonally forward, so look one rank behind.
    let back = -by.pawn_step();
    if holds(sq.offset(-1, back), PieceKind::Pawn) || holds(sq.offset(1, back), PieceKind::Pawn) {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(sq.offset(df, dr), PieceKind::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(sq.offset(df, dr), PieceKind::King))
    {
        return true;
    }

    slider_hits(pos, sq, by, &ROOK_DIRECTIONS, PieceKind::Rook)
        || slider_hits(pos, sq, by, &BISHOP_DIRECTIONS, PieceKind::Bishop)
}

fn slider_hits(
    pos: &Position,
    sq: Square,
    by: Color,
    directions: &[(i8, i8)],
    kind: PieceKind,
) -> bool {
    for &(df, dr) in directions {
        let mut cursor = sq;
        while let Some(next) = cursor.offset(df, dr) {
            if let Some(piece) = pos.piece_on(next) {
                if piece.color() == by
                    && (piece.kind() == kind || piece.kind() == PieceKind::Queen)
                {
                    return true;
                }
                break;
            }
            cursor = next;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::color::Color;
    use crate::position::Position;
    use crate::square::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn pawn_attacks_point_forward() {
        let pos: Position = "4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1".parse().unwrap();
        assert!(pos.is_attacked(sq("d3"), Color::White));
        assert!(pos.is_attacked(sq("f3"), Color::White));
        assert!(!pos.is_attacked(sq("e3"), Color::White));
        assert!(pos.is_attacked(sq("e3"), Color::Black));
        assert!(!pos.is_attacked(sq("d3"), Color::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let pos: Position = "4k3/8/8/8/8/8/4P3/R3K2Q w - - 0 1".parse().unwrap();
        assert!(pos.is_attacked(sq("a8"), Color::White));
        assert!(pos.is_attacked(sq("d1"), Color::White));
        assert!(pos.is_attacked(sq("b7"), Color::White));
        assert!(pos.is_attacked(sq("e4"), Color::White));
        assert!(!pos.is_attacked(sq("e3"), Color::Black));
    }

    #[test]
    fn knights_and_kings() {
        let pos: Position = "4k3/8/8/8/8/8/8/1N2K3 w - - 0 1".parse().unwrap();
        assert!(pos.is_attacked(sq("c3"), Color::White));
        assert!(pos.is_attacked(sq("d2"), Color::White));
        assert!(pos.is_attacked(sq("f2"), Color::White));
        assert!(!pos.is_attacked(sq("b2"), Color::White));
        assert!(pos.is_attacked(sq("d7"), Color::Black));
    }
}
