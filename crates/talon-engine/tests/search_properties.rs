//! End-to-end properties of the iterative-deepening search.
//!
//! Determinism, clean aborts, agreement between the pruned and unpruned
//! searches, and draw handling.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use talon_core::{Move, Position};
use talon_engine::search::{MATE, MAX_EVAL};
use talon_engine::{
    Reporter, SearchInfo, SearchLimits, SearchOptions, SearchResult, Searcher, Signal, StopSource,
};

const SCHOLARS_MATE_FEN: &str =
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

const RUY_LOPEZ_FEN: &str =
    "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3";

/// Every reported line, minus the wall-clock time.
#[derive(Debug, Default, PartialEq, Eq)]
struct Transcript {
    lines: Vec<(&'static str, u8, u64, String, Vec<Move>)>,
}

impl Reporter for Transcript {
    fn root_improved(&mut self, info: &SearchInfo<'_>) {
        self.lines.push((
            "improved",
            info.depth,
            info.nodes,
            info.score.to_string(),
            info.pv.to_vec(),
        ));
    }

    fn depth_completed(&mut self, info: &SearchInfo<'_>) {
        self.lines.push((
            "completed",
            info.depth,
            info.nodes,
            info.score.to_string(),
            info.pv.to_vec(),
        ));
    }
}

fn think(fen: &str, depth: u8, options: SearchOptions) -> SearchResult {
    let mut pos: Position = fen.parse().unwrap();
    Searcher::new(1)
        .with_options(options)
        .think(&mut pos, &SearchLimits::depth(depth), &mut (), &mut ())
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn fresh_searchers_report_identical_lines() {
    for fen in [KIWIPETE_FEN, RUY_LOPEZ_FEN] {
        let run = || {
            let mut pos: Position = fen.parse().unwrap();
            let mut transcript = Transcript::default();
            let result =
                Searcher::new(1).think(&mut pos, &SearchLimits::depth(5), &mut (), &mut transcript);
            (result, transcript)
        };
        let (first, first_lines) = run();
        let (second, second_lines) = run();
        assert_eq!(first, second, "{fen}");
        assert_eq!(first_lines, second_lines, "{fen}");
        assert!(!first_lines.lines.is_empty());
    }
}

// ── Aborts ────────────────────────────────────────────────────────────────────

/// Raises a stop as soon as the watched depth starts.
struct StopAtDepth {
    depth: u8,
    current: Rc<Cell<u8>>,
}

impl Reporter for StopAtDepth {
    fn depth_started(&mut self, depth: u8) {
        self.current.set(depth);
    }

    fn root_improved(&mut self, info: &SearchInfo<'_>) {
        assert!(info.depth < self.depth, "aborted depth {} reported", info.depth);
    }
}

impl StopSource for StopAtDepth {
    fn poll(&mut self) -> Option<Signal> {
        (self.current.get() >= self.depth).then_some(Signal::Stop)
    }
}

fn think_until(fen: &str, stop_depth: u8) -> SearchResult {
    let current = Rc::new(Cell::new(0));
    let mut reporter = StopAtDepth {
        depth: stop_depth,
        current: Rc::clone(&current),
    };
    let mut signals = StopAtDepth {
        depth: stop_depth,
        current,
    };
    let mut pos: Position = fen.parse().unwrap();
    let result = Searcher::new(1).think(&mut pos, &SearchLimits::depth(10), &mut signals, &mut reporter);
    assert_eq!(pos.to_string(), fen, "position restored after abort");
    result
}

#[test]
fn abort_keeps_the_last_completed_depth() {
    for stop_depth in [2, 4] {
        let aborted = think_until(KIWIPETE_FEN, stop_depth);
        let reference = think(KIWIPETE_FEN, stop_depth - 1, SearchOptions::default());
        assert_eq!(aborted.depth, stop_depth - 1);
        assert_eq!(aborted.best_move, reference.best_move);
        assert_eq!(aborted.score, reference.score);
        assert_eq!(aborted.pv, reference.pv);
    }
}

#[test]
fn abort_during_first_depth_yields_no_move() {
    let result = think_until(KIWIPETE_FEN, 1);
    assert_eq!(result.depth, 0);
    assert!(result.best_move.is_null());
    assert!(result.pv.is_empty());
}

/// Stops after a number of polls inside the watched depth and checks that
/// nothing is reported once it has.
struct StopInsideDepth {
    depth: u8,
    after: u32,
    polls: u32,
    current: Rc<Cell<u8>>,
    stopped: Rc<Cell<bool>>,
}

impl StopSource for StopInsideDepth {
    fn poll(&mut self) -> Option<Signal> {
        if self.current.get() < self.depth {
            return None;
        }
        self.polls += 1;
        if self.polls >= self.after {
            self.stopped.set(true);
            return Some(Signal::Stop);
        }
        None
    }
}

struct SilentAfterStop {
    current: Rc<Cell<u8>>,
    stopped: Rc<Cell<bool>>,
    completed: Vec<u8>,
}

impl Reporter for SilentAfterStop {
    fn depth_started(&mut self, depth: u8) {
        self.current.set(depth);
    }

    fn root_improved(&mut self, info: &SearchInfo<'_>) {
        assert!(!self.stopped.get(), "root line at depth {} after stop", info.depth);
    }

    fn depth_completed(&mut self, info: &SearchInfo<'_>) {
        assert!(!self.stopped.get(), "depth {} completed after stop", info.depth);
        self.completed.push(info.depth);
    }
}

#[test]
fn abort_inside_a_depth_reports_nothing_further() {
    let reference = think(KIWIPETE_FEN, 3, SearchOptions::default());
    for after in [5, 40, 400] {
        let current = Rc::new(Cell::new(0));
        let stopped = Rc::new(Cell::new(false));
        let mut signals = StopInsideDepth {
            depth: 4,
            after,
            polls: 0,
            current: Rc::clone(&current),
            stopped: Rc::clone(&stopped),
        };
        let mut reporter = SilentAfterStop {
            current,
            stopped: Rc::clone(&stopped),
            completed: Vec::new(),
        };
        let mut pos: Position = KIWIPETE_FEN.parse().unwrap();
        let result =
            Searcher::new(1).think(&mut pos, &SearchLimits::depth(10), &mut signals, &mut reporter);

        assert!(stopped.get(), "stop after {after} polls never fired");
        assert_eq!(reporter.completed, [1, 2, 3]);
        assert_eq!(result.depth, 3);
        assert_eq!(result.best_move, reference.best_move);
        assert_eq!(result.score, reference.score);
        assert_eq!(pos.to_string(), KIWIPETE_FEN);
    }
}

#[test]
fn expired_clock_stops_the_search() {
    let mut pos = Position::startpos();
    let limits = SearchLimits {
        move_time: Some(Duration::from_millis(50)),
        ..SearchLimits::default()
    };
    let result = Searcher::new(1).think(&mut pos, &limits, &mut (), &mut ());
    assert!(result.depth >= 1);
    assert!((result.depth as usize) < talon_engine::search::MAX_PLY - 1);
    assert!(!result.best_move.is_null());
}

// ── Pruning agreement ─────────────────────────────────────────────────────────

#[test]
fn pruned_and_unpruned_agree_on_mate() {
    let pruned = think(SCHOLARS_MATE_FEN, 3, SearchOptions::default());
    let unpruned = think(SCHOLARS_MATE_FEN, 3, SearchOptions::unpruned());
    assert_eq!(pruned.score, MATE - 1);
    assert_eq!(unpruned.score, MATE - 1);
    assert_eq!(pruned.best_move, unpruned.best_move);
}

#[test]
fn pruned_and_unpruned_agree_on_sign() {
    // White is a queen up in both.
    for fen in ["4k3/8/8/8/8/8/3Q4/4K3 w - - 0 1", "4k3/8/8/8/8/8/3Q4/4K3 b - - 0 1"] {
        let pruned = think(fen, 4, SearchOptions::default());
        let unpruned = think(fen, 4, SearchOptions::unpruned());
        assert_eq!(pruned.score.signum(), unpruned.score.signum(), "{fen}");
        assert!(pruned.score.abs() > 500 && pruned.score.abs() <= MAX_EVAL, "{fen}");
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[test]
fn startpos_depth_one_returns_a_legal_move() {
    let pos = Position::startpos();
    let result = think(talon_core::STARTING_FEN, 1, SearchOptions::default());
    assert_eq!(result.depth, 1);
    assert!(talon_core::movegen::legal_moves(&pos).contains(result.best_move));
}

/// Collects the first PV move of each completed depth.
#[derive(Default)]
struct BestMoves(Vec<Move>);

impl Reporter for BestMoves {
    fn depth_completed(&mut self, info: &SearchInfo<'_>) {
        self.0.push(info.pv[0]);
    }
}

#[test]
fn single_legal_move_is_reported_at_every_depth() {
    // The king must take the checking queen.
    let mut pos: Position = "k7/8/8/8/8/8/1q6/K7 w - - 0 1".parse().unwrap();
    let only = pos.parse_uci_move("a1b2").unwrap();
    assert_eq!(talon_core::movegen::legal_moves(&pos).len(), 1);

    let mut best = BestMoves::default();
    let result = Searcher::new(1).think(&mut pos, &SearchLimits::depth(5), &mut (), &mut best);
    assert_eq!(best.0, [only; 5]);
    assert_eq!(result.best_move, only);
}

// ── Draws ─────────────────────────────────────────────────────────────────────

#[test]
fn fifty_move_rule_draws_every_reply() {
    let lost = think("7k/8/8/8/8/8/8/K2Q4 b - - 0 80", 3, SearchOptions::default());
    assert!(lost.score < -500);

    let drawn = think("7k/8/8/8/8/8/8/K2Q4 b - - 100 80", 3, SearchOptions::default());
    assert_eq!(drawn.score, 0);
    assert!(!drawn.best_move.is_null());
}

#[test]
fn saturated_move_counters_are_searched() {
    // Both counters sit at the top of their range.
    let drawn = think("4k3/8/8/8/8/8/8/R3K3 w - - 65535 1", 2, SearchOptions::default());
    assert_eq!(drawn.depth, 2);
    assert_eq!(drawn.score, 0);

    let late = think("r3k3/8/8/8/8/8/8/4K3 b - - 0 65535", 2, SearchOptions::default());
    assert_eq!(late.depth, 2);
    assert!(!late.best_move.is_null());
    assert!(late.score > 300);
}

#[test]
fn capture_resets_the_fifty_move_clock() {
    // Qxf7# is a capture; every other reply is drawn by the clock.
    let result = think(
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 100 40",
        2,
        SearchOptions::default(),
    );
    assert_eq!(result.best_move.to_string(), "h5f7");
}
