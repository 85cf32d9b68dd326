//! Static evaluation: tapered material and piece-square tables.

pub mod material;
pub mod phase;
pub mod pst;
pub mod score;

use talon_core::{Color, PieceKind, Position};

use crate::search::MAX_EVAL;

use self::phase::MAX_PHASE;
use self::score::Score;

/// Evaluate `pos` in centipawns from the side to move's point of view.
///
/// The result lies in `-MAX_EVAL..=MAX_EVAL`, below every mate score, and
/// a colour-flipped position evaluates identically for its side to move.
pub fn evaluate(pos: &Position) -> i32 {
    let mut score = Score::ZERO;
    let mut phase = 0;
    let mut bishops = [0u8; Color::COUNT];

    for (sq, piece) in pos.pieces() {
        let kind = piece.kind();
        let term = material::value(kind) + pst::value(kind, piece.color(), sq);
        match piece.color() {
            Color::White => score += term,
            Color::Black => score -= term,
        }
        phase += phase::weight(kind);
        if kind == PieceKind::Bishop {
            bishops[piece.color().index()] += 1;
        }
    }

    if bishops[Color::White.index()] >= 2 {
        score += material::BISHOP_PAIR;
    }
    if bishops[Color::Black.index()] >= 2 {
        score -= material::BISHOP_PAIR;
    }

    let white = score.taper(phase.min(MAX_PHASE));
    (white * pos.side_to_move().sign()).clamp(-MAX_EVAL, MAX_EVAL)
}

#[cfg(test)]
mod tests {
    use talon_core::Position;

    use super::evaluate;

    /// Swap colours and flip the board vertically.
    fn mirror(fen: &str) -> String {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let swap = |s: &str| -> String {
            s.chars()
                .map(|c| {
                    if c.is_ascii_uppercase() {
                        c.to_ascii_lowercase()
                    } else {
                        c.to_ascii_uppercase()
                    }
                })
                .collect()
        };
        let placement: Vec<String> = fields[0].split('/').rev().map(swap).collect();
        let side = if fields[1] == "w" { "b" } else { "w" };
        let castling = if fields[2] == "-" { "-".to_string() } else { swap(fields[2]) };
        format!("{} {} {} - 0 1", placement.join("/"), side, castling)
    }

    #[test]
    fn startpos_is_balanced() {
        assert_eq!(evaluate(&Position::startpos()), 0);
    }

    #[test]
    fn side_to_move_perspective() {
        let white: Position = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        let black: Position = "4k3/8/8/8/8/8/8/3QK3 b - - 0 1".parse().unwrap();
        assert!(evaluate(&white) > 800);
        assert_eq!(evaluate(&black), -evaluate(&white));
    }

    #[test]
    fn mirrored_positions_agree() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkb1r/pp1p1ppp/4pn2/2p5/2PP4/2N5/PP2PPPP/R1BQKBNR w KQkq - 0 4",
        ] {
            let pos: Position = fen.parse().unwrap();
            let flipped: Position = mirror(fen).parse().unwrap();
            assert_eq!(evaluate(&pos), evaluate(&flipped), "{fen}");
        }
    }
}
