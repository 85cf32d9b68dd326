//! Principal variation search with null-move pruning, late-move
//! reductions and pruning, and a capture-only quiescence search.
//!
//! Once the session is aborted every frame returns 0 straight away; that
//! score is never stored, reported or used by the driver.

use talon_core::{Move, Position};

use super::control::SearchControl;
use super::draw::is_draw;
use super::heuristics::History;
use super::ordering::MovePicker;
use super::reduction::ReductionTable;
use super::report::{ReportedScore, Reporter, SearchInfo};
use super::tt::{Bound, TranspositionTable};
use super::{INF, MATE, MAX_EVAL, MAX_PLY, SearchOptions};
use crate::eval::evaluate;

/// Depth taken off the verification search after a null move.
const NULL_MOVE_REDUCTION: i32 = 3;

/// Late-move pruning applies below this depth...
const LMP_DEPTH: i32 = 4;
/// ...once more than this many quiet moves per ply of depth were tried.
const LMP_QUIETS_PER_PLY: i32 = 3;

/// Late-move reductions need more remaining depth than this...
const LMR_MIN_DEPTH: i32 = 2;
/// ...and more legal moves already tried than this.
const LMR_MIN_TRIED: usize = 3;

/// A principal variation, root-most move first.
#[derive(Clone)]
pub struct Pv {
    moves: [Move; MAX_PLY],
    len: usize,
}

impl Pv {
    pub fn new() -> Pv {
        Pv {
            moves: [Move::NULL; MAX_PLY],
            len: 0,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Become `mv` followed by `child`.
    pub fn build(&mut self, mv: Move, child: &Pv) {
        let tail = child.len.min(MAX_PLY - 1);
        self.moves[0] = mv;
        self.moves[1..=tail].copy_from_slice(&child.moves[..tail]);
        self.len = tail + 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }
}

impl Default for Pv {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a search node reads or updates besides the position.
pub struct SearchContext<'a> {
    pub control: SearchControl<'a>,
    pub tt: &'a mut TranspositionTable,
    pub history: &'a mut History,
    pub reductions: &'a ReductionTable,
    pub options: SearchOptions,
    pub reporter: &'a mut dyn Reporter,
}

impl SearchContext<'_> {
    fn report_root(&mut self, score: i32, pv: &Pv) {
        let info = SearchInfo {
            depth: self.control.root_depth(),
            elapsed: self.control.elapsed(),
            nodes: self.control.nodes(),
            score: ReportedScore::from_raw(score),
            pv: pv.as_slice(),
        };
        self.reporter.root_improved(&info);
    }
}

/// Search `pos` to `depth` plies within the window `(alpha, beta)`.
///
/// `pv` receives the best line found when a move raises alpha. Non-root
/// nodes that are drawn by rule score 0; the root is always searched.
pub fn search(
    pos: &mut Position,
    ply: usize,
    mut alpha: i32,
    beta: i32,
    depth: i32,
    pv: &mut Pv,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    if depth <= 0 {
        return quiesce(pos, ply, alpha, beta, pv, ctx);
    }

    ctx.control.count_node();
    if ctx.control.check(ply) {
        return 0;
    }
    if ply > 0 {
        pv.clear();
        if is_draw(pos) {
            return 0;
        }
    }

    let pv_node = alpha != beta - 1;
    let key = pos.key();

    let mut tt_move = Move::NULL;
    if let Some(entry) = ctx.tt.probe(key, ply) {
        tt_move = entry.mv;
        if !pv_node && let Some(score) = entry.cutoff(depth, alpha, beta) {
            return score;
        }
    }

    if ply >= MAX_PLY - 1 {
        return evaluate(pos);
    }

    let in_check = pos.in_check();

    if ctx.options.null_move
        && depth > 1
        && !in_check
        && pos.may_null()
        && evaluate(pos) >= beta
    {
        let undo = pos.make_null();
        let mut child = Pv::new();
        let score = -search(
            pos,
            ply + 1,
            -beta,
            -beta + 1,
            depth - NULL_MOVE_REDUCTION,
            &mut child,
            ctx,
        );
        pos.unmake_null(undo);

        if ctx.control.aborted() {
            return 0;
        }
        if score >= beta {
            ctx.tt.store(key, Move::NULL, score, Bound::Lower, depth, ply);
            return score;
        }
    }

    let mut best = -INF;
    let mut best_move = Move::NULL;
    let mut tried = 0usize;
    let mut quiet_tried = 0i32;
    let mut child = Pv::new();
    let mut picker = MovePicker::new(pos, tt_move, ctx.history, ply);

    while let Some((mv, stage)) = picker.next() {
        let undo = pos.make_move(mv);
        if pos.is_illegal() {
            pos.unmake_move(mv, undo);
            continue;
        }

        tried += 1;
        let normal = stage.is_normal();
        if normal {
            quiet_tried += 1;
        }

        let gives_check = pos.in_check();
        let mut new_depth = depth - 1 + gives_check as i32;

        if ctx.options.late_move_pruning
            && !in_check
            && !pv_node
            && alpha > -MAX_EVAL
            && beta < MAX_EVAL
            && depth < LMP_DEPTH
            && quiet_tried > LMP_QUIETS_PER_PLY * depth
            && !gives_check
            && normal
        {
            pos.unmake_move(mv, undo);
            continue;
        }

        let mut reduction = 0;
        if ctx.options.late_move_reductions
            && depth > LMR_MIN_DEPTH
            && tried > LMR_MIN_TRIED
            && !in_check
            && !gives_check
            && normal
            && !mv.is_castle()
        {
            reduction = ctx.reductions.get(pv_node, depth, tried);
            new_depth -= reduction;
        }

        // At most two passes: reduced, then at full depth if it beat alpha.
        let score = loop {
            let mut score;
            if best == -INF {
                score = -search(pos, ply + 1, -beta, -alpha, new_depth, &mut child, ctx);
            } else {
                score = -search(pos, ply + 1, -alpha - 1, -alpha, new_depth, &mut child, ctx);
                if !ctx.control.aborted() && score > alpha && score < beta {
                    score = -search(pos, ply + 1, -beta, -alpha, new_depth, &mut child, ctx);
                }
            }

            if reduction > 0 && score > alpha && !ctx.control.aborted() {
                new_depth += reduction;
                reduction = 0;
                continue;
            }
            break score;
        };

        pos.unmake_move(mv, undo);
        if ctx.control.aborted() {
            return 0;
        }

        if score >= beta {
            ctx.history.record_cutoff(pos, mv, depth, ply);
            ctx.tt.store(key, mv, score, Bound::Lower, depth, ply);
            return score;
        }

        if score > best {
            best = score;
            if score > alpha {
                alpha = score;
                best_move = mv;
                pv.build(mv, &child);
                if ply == 0 {
                    ctx.report_root(score, pv);
                }
            }
        }
    }

    if tried == 0 {
        return if in_check { -MATE + ply as i32 } else { 0 };
    }

    if best_move.is_null() {
        ctx.tt.store(key, Move::NULL, best, Bound::Upper, depth, ply);
    } else {
        ctx.history.record_cutoff(pos, best_move, depth, ply);
        ctx.tt.store(key, best_move, best, Bound::Exact, depth, ply);
    }
    best
}

/// Resolve captures and promotions until the position is quiet.
///
/// The side to move may always stand pat on its static evaluation, so no
/// mate is ever detected here.
pub fn quiesce(
    pos: &mut Position,
    ply: usize,
    mut alpha: i32,
    beta: i32,
    pv: &mut Pv,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.control.count_node();
    if ctx.control.check(ply) {
        return 0;
    }
    pv.clear();
    if is_draw(pos) {
        return 0;
    }
    if ply >= MAX_PLY - 1 {
        return evaluate(pos);
    }

    let mut best = evaluate(pos);
    if best >= beta {
        return best;
    }
    if best > alpha {
        alpha = best;
    }

    let mut child = Pv::new();
    let mut picker = MovePicker::tactical(pos);
    while let Some((mv, _)) = picker.next() {
        let undo = pos.make_move(mv);
        if pos.is_illegal() {
            pos.unmake_move(mv, undo);
            continue;
        }

        let score = -quiesce(pos, ply + 1, -beta, -alpha, &mut child, ctx);
        pos.unmake_move(mv, undo);
        if ctx.control.aborted() {
            return 0;
        }

        if score >= beta {
            return score;
        }
        if score > best {
            best = score;
            if score > alpha {
                alpha = score;
                pv.build(mv, &child);
            }
        }
    }
    best
}
