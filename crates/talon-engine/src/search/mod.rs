//! Iterative-deepening alpha-beta search.

pub mod control;
pub mod draw;
pub mod heuristics;
pub mod negamax;
pub mod ordering;
pub mod reduction;
pub mod report;
pub mod tt;

use std::time::Duration;

use talon_core::{Move, Position};
use tracing::debug;

use control::{SearchControl, StopSource};
use heuristics::History;
use negamax::{Pv, SearchContext};
use reduction::ReductionTable;
use report::{ReportedScore, Reporter, SearchInfo};
use tt::TranspositionTable;

/// Deepest ply the search reaches; also bounds the root depth.
pub const MAX_PLY: usize = 64;

/// Wider than any score the search can return.
pub const INF: i32 = 32_767;

/// Score of delivering mate at the root; mate at ply `k` is `MATE - k`.
pub const MATE: i32 = 32_000;

/// Static evaluations are clamped to `±MAX_EVAL`; beyond it lie mate scores.
pub const MAX_EVAL: i32 = 29_999;

/// Switches for the selective parts of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub null_move: bool,
    pub late_move_reductions: bool,
    pub late_move_pruning: bool,
}

impl SearchOptions {
    /// Plain alpha-beta with PVS and quiescence only.
    pub const fn unpruned() -> SearchOptions {
        SearchOptions {
            null_move: false,
            late_move_reductions: false,
            late_move_pruning: false,
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            null_move: true,
            late_move_reductions: true,
            late_move_pruning: true,
        }
    }
}

/// Budget of one `think` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Deepest root iteration, clamped to `1..MAX_PLY`.
    pub depth: u8,
    /// Wall-clock budget; `None` searches until depth or stop.
    pub move_time: Option<Duration>,
    /// Ignore the clock until a ponderhit arrives.
    pub ponder: bool,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> SearchLimits {
        SearchLimits {
            depth,
            ..SearchLimits::default()
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            depth: (MAX_PLY - 1) as u8,
            move_time: None,
            ponder: false,
        }
    }
}

/// Outcome of the deepest fully completed iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `Move::NULL` when no iteration completed or the root has no legal move.
    pub best_move: Move,
    /// Expected reply, for pondering.
    pub ponder_move: Option<Move>,
    pub pv: Vec<Move>,
    pub score: i32,
    /// Nodes visited by the whole session.
    pub nodes: u64,
    /// Depth of the iteration the result comes from; 0 if none completed.
    pub depth: u8,
}

impl SearchResult {
    fn none() -> SearchResult {
        SearchResult {
            best_move: Move::NULL,
            ponder_move: None,
            pv: Vec::new(),
            score: 0,
            nodes: 0,
            depth: 0,
        }
    }
}

/// Owns the tables that outlive a single search.
pub struct Searcher {
    tt: TranspositionTable,
    history: History,
    reductions: Box<ReductionTable>,
    options: SearchOptions,
}

impl Searcher {
    /// A searcher with a transposition table of `hash_mb` megabytes.
    pub fn new(hash_mb: usize) -> Searcher {
        Searcher {
            tt: TranspositionTable::new(hash_mb),
            history: History::new(),
            reductions: ReductionTable::new(),
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Searcher {
        self.options = options;
        self
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Forget all transposition entries.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Reallocate the transposition table; its contents are lost.
    pub fn resize_tt(&mut self, mb: usize) {
        self.tt = TranspositionTable::new(mb);
    }

    /// Per-mille fill of the transposition table.
    pub fn hashfull(&self) -> usize {
        self.tt.hashfull()
    }

    /// Search `pos` by iterative deepening within `limits`.
    ///
    /// `pos` is searched in place and is restored before returning. The
    /// result always comes from the deepest iteration that finished; an
    /// iteration cut short by `signals` or the clock is thrown away.
    pub fn think(
        &mut self,
        pos: &mut Position,
        limits: &SearchLimits,
        signals: &mut dyn StopSource,
        reporter: &mut dyn Reporter,
    ) -> SearchResult {
        self.history.clear();
        self.tt.new_generation();

        let mut ctx = SearchContext {
            control: SearchControl::new(limits, signals),
            tt: &mut self.tt,
            history: &mut self.history,
            reductions: &self.reductions,
            options: self.options,
            reporter,
        };

        let mut result = SearchResult::none();
        let max_depth = limits.depth.clamp(1, (MAX_PLY - 1) as u8);

        for depth in 1..=max_depth {
            ctx.control.set_root_depth(depth);
            ctx.reporter.depth_started(depth);

            let mut pv = Pv::new();
            let score = negamax::search(pos, 0, -INF, INF, depth as i32, &mut pv, &mut ctx);

            let nodes = ctx.control.nodes();
            let elapsed = ctx.control.elapsed();
            if ctx.control.aborted() {
                debug!(depth, nodes, elapsed_ms = elapsed.as_millis() as u64, "search aborted");
                break;
            }

            let line = pv.as_slice();
            result = SearchResult {
                best_move: line.first().copied().unwrap_or(Move::NULL),
                ponder_move: line.get(1).copied(),
                pv: line.to_vec(),
                score,
                nodes,
                depth,
            };
            ctx.reporter.depth_completed(&SearchInfo {
                depth,
                elapsed,
                nodes,
                score: ReportedScore::from_raw(score),
                pv: line,
            });
            debug!(depth, score, nodes, elapsed_ms = elapsed.as_millis() as u64, "depth completed");
        }

        result.nodes = ctx.control.nodes();
        result
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("tt", &self.tt)
            .field("options", &self.options)
            .finish()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(16)
    }
}
