//! Piece-square tables, built at compile time from simple placement rules.
//!
//! Tables are written from White's point of view in a1 = 0 order; Black
//! reads them through a vertical flip.

use talon_core::{Color, PieceKind, Square};

use super::score::{S, Score};

/// Distance of a file or rank from the board centre, doubled (1, 3, 5 or 7).
const fn edge_distance(x: i32) -> i32 {
    let d = 2 * x - 7;
    if d < 0 { -d } else { d }
}

/// 0 in the four centre squares up to 6 in the corners.
const fn centre_distance(sq: usize) -> i32 {
    (edge_distance((sq % 8) as i32) + edge_distance((sq / 8) as i32)) / 2 - 1
}

const fn build(kind: PieceKind) -> [Score; 64] {
    let mut table = [S(0, 0); 64];
    let mut sq = 0;
    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let centre = centre_distance(sq);
        let file_edge = edge_distance(file);
        table[sq] = match kind {
            PieceKind::Pawn => {
                if rank == 0 || rank == 7 {
                    S(0, 0)
                } else {
                    let advance = rank - 1;
                    let capped = if advance > 3 { 3 } else { advance };
                    let central = if file_edge == 1 { 6 * capped } else { 0 };
                    S(3 * advance + central - 2, 8 * advance + 2 * advance * advance)
                }
            }
            PieceKind::Knight => S(-8 * centre + 10, -7 * centre + 8),
            PieceKind::Bishop => S(-4 * centre + 5, -4 * centre + 5),
            PieceKind::Rook => {
                let seventh = if rank == 6 { 18 } else { 0 };
                let central = if file_edge <= 3 { 4 } else { 0 };
                S(seventh + central, seventh / 2)
            }
            PieceKind::Queen => S(-2 * centre + 2, -4 * centre + 6),
            PieceKind::King => {
                let shelter = if file_edge >= 5 { 12 } else { -6 };
                S(shelter - 22 * rank, -10 * centre + 20)
            }
        };
        sq += 1;
    }
    table
}

static TABLES: [[Score; 64]; PieceKind::COUNT] = [
    build(PieceKind::Pawn),
    build(PieceKind::Knight),
    build(PieceKind::Bishop),
    build(PieceKind::Rook),
    build(PieceKind::Queen),
    build(PieceKind::King),
];

/// Placement bonus for a `color` piece of `kind` on `sq`.
#[inline]
pub fn value(kind: PieceKind, color: Color, sq: Square) -> Score {
    let sq = match color {
        Color::White => sq,
        Color::Black => sq.flip_rank(),
    };
    TABLES[kind.index()][sq.index()]
}

#[cfg(test)]
mod tests {
    use talon_core::{Color, PieceKind, Square};

    use super::value;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn colours_mirror_each_other() {
        for kind in PieceKind::ALL {
            for square in Square::all() {
                assert_eq!(
                    value(kind, Color::White, square),
                    value(kind, Color::Black, square.flip_rank())
                );
            }
        }
    }

    #[test]
    fn knights_prefer_the_centre() {
        let centre = value(PieceKind::Knight, Color::White, sq("d4"));
        let corner = value(PieceKind::Knight, Color::White, sq("a1"));
        assert!(centre.mg > corner.mg);
        assert!(centre.eg > corner.eg);
    }

    #[test]
    fn advanced_pawns_are_worth_more_late() {
        let home = value(PieceKind::Pawn, Color::White, sq("e2"));
        let far = value(PieceKind::Pawn, Color::White, sq("e7"));
        assert!(far.eg > home.eg);
    }

    #[test]
    fn kings_shelter_in_the_middlegame() {
        let castled = value(PieceKind::King, Color::White, sq("g1"));
        let exposed = value(PieceKind::King, Color::White, sq("e4"));
        assert!(castled.mg > exposed.mg);
        assert!(exposed.eg > castled.eg);
    }
}
