//! Killer moves and the history table for quiet move ordering.

use talon_core::{Move, Piece, Position};

use super::MAX_PLY;

/// Once an entry passes this, every entry is halved.
const HISTORY_LIMIT: i32 = 1 << 16;

/// Quiet moves that caused cutoffs, by ply and by `[piece][to]`.
pub struct History {
    killers: [[Move; 2]; MAX_PLY],
    table: [[i32; 64]; Piece::COUNT],
}

impl History {
    pub fn new() -> History {
        History {
            killers: [[Move::NULL; 2]; MAX_PLY],
            table: [[0; 64]; Piece::COUNT],
        }
    }

    /// Forget everything learned; called at the start of each search.
    pub fn clear(&mut self) {
        *self = History::new();
    }

    /// Credit `mv`, played in `pos` at `ply`, with a cutoff or a best move.
    ///
    /// Captures and promotions are already ordered by material and are ignored.
    pub fn record_cutoff(&mut self, pos: &Position, mv: Move, depth: i32, ply: usize) {
        if mv.is_null() || mv.is_promotion() || pos.is_capture(mv) {
            return;
        }
        let Some(piece) = pos.piece_on(mv.from()) else {
            return;
        };

        if let Some(slots) = self.killers.get_mut(ply)
            && slots[0] != mv
        {
            slots[1] = slots[0];
            slots[0] = mv;
        }

        let entry = &mut self.table[piece.index()][mv.to().index()];
        *entry += depth * depth;
        if *entry > HISTORY_LIMIT {
            for row in self.table.iter_mut() {
                for value in row.iter_mut() {
                    *value /= 2;
                }
            }
        }
    }

    /// Killer slots at `ply`, most recent first.
    #[inline]
    pub fn killers(&self, ply: usize) -> [Move; 2] {
        self.killers.get(ply).copied().unwrap_or([Move::NULL; 2])
    }

    #[inline]
    pub fn score(&self, piece: Piece, mv: Move) -> i32 {
        self.table[piece.index()][mv.to().index()]
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
