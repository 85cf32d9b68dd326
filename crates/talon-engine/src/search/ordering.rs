//! Staged move ordering: hash move, tactical moves, killers, quiet moves.

use talon_core::movegen::{generate_quiet, generate_tactical};
use talon_core::{MAX_MOVES, Move, MoveKind, MoveList, PieceKind, Position};

use super::heuristics::History;
use crate::eval::material;

/// Where a move came from in the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStage {
    TtMove,
    Tactical,
    Killer,
    Quiet,
}

impl MoveStage {
    /// A plain quiet move: the only kind late-move reductions and pruning touch.
    #[inline]
    pub fn is_normal(self) -> bool {
        self == MoveStage::Quiet
    }
}

const TT_SCORE: i32 = i32::MAX;
const TACTICAL_BASE: i32 = 2_000_000;
const KILLER_SCORE: [i32; 2] = [1_000_001, 1_000_000];

/// Most valuable victim, then least valuable attacker.
fn mvv_lva(pos: &Position, mv: Move) -> i32 {
    let victim = match mv.kind() {
        MoveKind::EnPassant => PieceKind::Pawn,
        _ => pos.piece_on(mv.to()).map_or(PieceKind::Pawn, |p| p.kind()),
    };
    let attacker = pos.piece_on(mv.from()).map_or(PieceKind::Pawn, |p| p.kind());
    let mut score = 16 * material::centipawns(victim) - attacker.index() as i32;
    if let Some(promo) = mv.promotion_piece() {
        score += 16 * material::centipawns(promo);
    }
    if !pos.is_capture(mv) {
        // Quiet promotions: ranked by the promoted piece alone.
        score -= 16 * material::centipawns(PieceKind::Pawn);
    }
    score
}

/// Yields every pseudo-legal move of a position once, best first.
pub struct MovePicker {
    moves: [Move; MAX_MOVES],
    scores: [i32; MAX_MOVES],
    stages: [MoveStage; MAX_MOVES],
    len: usize,
    cursor: usize,
}

impl MovePicker {
    fn empty() -> MovePicker {
        MovePicker {
            moves: [Move::NULL; MAX_MOVES],
            scores: [0; MAX_MOVES],
            stages: [MoveStage::Quiet; MAX_MOVES],
            len: 0,
            cursor: 0,
        }
    }

    fn push(&mut self, mv: Move, score: i32, stage: MoveStage) {
        self.moves[self.len] = mv;
        self.scores[self.len] = score;
        self.stages[self.len] = stage;
        self.len += 1;
    }

    /// Picker for a full-width node at `ply`, trying `tt_move` first when it
    /// is a move of this position.
    pub fn new(pos: &Position, tt_move: Move, history: &History, ply: usize) -> MovePicker {
        let mut picker = MovePicker::empty();
        let killers = history.killers(ply);

        let mut tactical = MoveList::new();
        generate_tactical(pos, &mut tactical);
        for &mv in tactical.iter() {
            if mv == tt_move {
                picker.push(mv, TT_SCORE, MoveStage::TtMove);
            } else {
                picker.push(mv, TACTICAL_BASE + mvv_lva(pos, mv), MoveStage::Tactical);
            }
        }

        let mut quiet = MoveList::new();
        generate_quiet(pos, &mut quiet);
        for &mv in quiet.iter() {
            if mv == tt_move {
                picker.push(mv, TT_SCORE, MoveStage::TtMove);
            } else if let Some(slot) = killers.iter().position(|&k| k == mv) {
                picker.push(mv, KILLER_SCORE[slot], MoveStage::Killer);
            } else {
                let score = pos
                    .piece_on(mv.from())
                    .map_or(0, |piece| history.score(piece, mv));
                picker.push(mv, score, MoveStage::Quiet);
            }
        }
        picker
    }

    /// Picker over tactical moves only, for quiescence.
    pub fn tactical(pos: &Position) -> MovePicker {
        let mut picker = MovePicker::empty();
        let mut tactical = MoveList::new();
        generate_tactical(pos, &mut tactical);
        for &mv in tactical.iter() {
            picker.push(mv, mvv_lva(pos, mv), MoveStage::Tactical);
        }
        picker
    }

    /// Next move by selection sort, with its stage. Ties keep generation order.
    pub fn next(&mut self) -> Option<(Move, MoveStage)> {
        if self.cursor >= self.len {
            return None;
        }
        let mut best = self.cursor;
        for i in self.cursor + 1..self.len {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }
        self.moves.swap(self.cursor, best);
        self.scores.swap(self.cursor, best);
        self.stages.swap(self.cursor, best);
        let picked = (self.moves[self.cursor], self.stages[self.cursor]);
        self.cursor += 1;
        Some(picked)
    }
}
