//! Chess rules for the talon engine: positions, moves, FEN and move generation.

mod attacks;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod make_move;
pub mod movegen;
mod perft;
mod piece;
mod position;
mod square;
mod zobrist;

pub use castle_rights::CastleRights;
pub use chess_move::{Move, MoveKind};
pub use color::Color;
pub use error::{FenError, MoveParseError};
pub use fen::STARTING_FEN;
pub use movegen::{MAX_MOVES, MoveList};
pub use perft::{divide, perft};
pub use piece::{Piece, PieceKind};
pub use position::{Position, REPETITION_CAPACITY, Undo};
pub use square::Square;
