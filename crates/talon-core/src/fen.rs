//! FEN reading and writing for [`Position`].

use std::fmt;
use std::str::FromStr;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;
use crate::square::Square;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn parse_placement(field: &str) -> Result<[Option<Piece>; 64], FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut squares = [None; 64];
    for (i, text) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file = 0usize;
        for c in text.chars() {
            if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += run as usize;
                continue;
            }
            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { character: c })?;
            if file < 8 {
                squares[Square::new(file as u8, rank).index()] = Some(piece);
            }
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankLength {
                rank: rank as usize + 1,
                length: file,
            });
        }
    }
    Ok(squares)
}

fn parse_counter(field: Option<&str>, default: u16) -> Result<u16, FenError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| FenError::InvalidCounter {
            found: text.to_owned(),
        }),
    }
}

fn validate(squares: &[Option<Piece>; 64]) -> Result<(), FenError> {
    for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
        let kings = squares
            .iter()
            .flatten()
            .filter(|p| p.color() == color && p.kind() == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(FenError::KingCount { color: name, found: kings });
        }
    }
    for sq in Square::all().filter(|sq| sq.rank() == 0 || sq.rank() == 7) {
        if squares[sq.index()].is_some_and(|p| p.kind() == PieceKind::Pawn) {
            return Err(FenError::PawnOnBackRank { square: sq.to_string() });
        }
    }
    Ok(())
}

impl FromStr for Position {
    type Err = FenError;

    /// Parse a FEN string. The move counters may be omitted and default to `0 1`.
    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let squares = parse_placement(fields[0])?;
        validate(&squares)?;

        let side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidColor { found: other.to_owned() }),
        };
        let castling = CastleRights::from_fen(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            text => {
                let expected_rank = if side == Color::White { 5 } else { 2 };
                match Square::from_algebraic(text) {
                    Some(sq) if sq.rank() == expected_rank => Some(sq),
                    _ => return Err(FenError::InvalidEnPassant { found: text.to_owned() }),
                }
            }
        };

        let rev_moves = parse_counter(fields.get(4).copied(), 0)?;
        let fullmove = parse_counter(fields.get(5).copied(), 1)?.max(1);

        let pos = Position::from_parts(squares, side, castling, en_passant, rev_moves, fullmove);
        if pos.is_illegal() {
            return Err(FenError::OpponentInCheck);
        }
        Ok(pos)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_on(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }
        write!(f, " {} {} ", self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", self.rev_moves(), self.fullmove())
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::error::FenError;
    use crate::position::Position;

    #[test]
    fn roundtrip() {
        for fen in [
            STARTING_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ] {
            let pos: Position = fen.parse().unwrap();
            assert_eq!(pos.to_string(), fen);
        }
    }

    #[test]
    fn counters_are_optional() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K3 b - -".parse().unwrap();
        assert_eq!(pos.to_string(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn rejects_malformed_input() {
        let cases: [(&str, FenError); 6] = [
            ("8/8/8 w - -", FenError::WrongRankCount { found: 3 }),
            ("4k3/8/8/8/8/8/8/4K3", FenError::WrongFieldCount { found: 1 }),
            (
                "4k3/8/8/8/8/8/8/4K3 x - -",
                FenError::InvalidColor { found: "x".into() },
            ),
            (
                "4k4/8/8/8/8/8/8/4K3 w - -",
                FenError::BadRankLength { rank: 8, length: 9 },
            ),
            (
                "8/8/8/8/8/8/8/4K3 w - -",
                FenError::KingCount { color: "black", found: 0 },
            ),
            (
                "4k3/8/8/8/8/8/8/4K3 w - e3",
                FenError::InvalidEnPassant { found: "e3".into() },
            ),
        ];
        for (fen, expected) in cases {
            assert_eq!(fen.parse::<Position>().unwrap_err(), expected, "{fen}");
        }
    }

    #[test]
    fn rejects_capturable_king() {
        let err = "4k3/8/8/8/8/8/8/4R2K w - -".parse::<Position>().unwrap_err();
        assert_eq!(err, FenError::OpponentInCheck);
    }

    #[test]
    fn rejects_pawn_on_back_rank() {
        let err = "4k2P/8/8/8/8/8/8/4K3 w - -".parse::<Position>().unwrap_err();
        assert!(matches!(err, FenError::PawnOnBackRank { .. }));
    }
}
