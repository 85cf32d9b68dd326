//! Event-driven UCI engine with a worker search thread and pondering support.

use std::io::{self, BufRead};
use std::sync::mpsc;

use tracing::{debug, info, warn};

use talon_core::{Move, Position, movegen};
use talon_engine::{Reporter, SearchInfo, SearchResult, Searcher, SharedSignals, limits_from_go};

use crate::command::{Command, GoParams, HASH_RANGE, UciOption, parse_command};
use crate::error::UciError;

/// Configuration knobs adjustable via `setoption`.
struct EngineConfig {
    /// Transposition table size in megabytes.
    hash_mb: usize,
    /// Whether the GUI allows pondering.
    ponder: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hash_mb: 16,
            ponder: false,
        }
    }
}

/// Whether the engine is idle, searching, or pondering.
enum EngineState {
    Idle,
    Searching,
    Pondering,
}

/// Events processed by the main engine loop.
enum EngineEvent {
    UciCommand(Result<Command, UciError>),
    SearchDone(SearchDone),
    InputClosed,
}

/// Payload returned by the search thread when it finishes.
struct SearchDone {
    bestmove: String,
    searcher: Searcher,
}

/// Prints `info` lines to stdout as the search progresses.
struct UciReporter;

impl Reporter for UciReporter {
    fn depth_started(&mut self, depth: u8) {
        println!("info depth {depth}");
    }

    fn root_improved(&mut self, info: &SearchInfo<'_>) {
        println!("{}", info_line(info));
    }
}

/// `info depth N time T nodes K score … pv …` for a new root best line.
fn info_line(info: &SearchInfo<'_>) -> String {
    let pv: Vec<String> = info.pv.iter().map(Move::to_string).collect();
    format!(
        "info depth {} time {} nodes {} score {} pv {}",
        info.depth,
        info.elapsed.as_millis(),
        info.nodes,
        info.score,
        pv.join(" ")
    )
}

/// The `bestmove` line for `result`.
///
/// When no depth completed the first legal move of `root` is played, and
/// `0000` when there is none.
fn bestmove_line(result: &SearchResult, root: &Position) -> String {
    if !result.best_move.is_null() {
        return match result.ponder_move {
            Some(pm) if !pm.is_null() => format!("bestmove {} ponder {pm}", result.best_move),
            _ => format!("bestmove {}", result.best_move),
        };
    }
    match movegen::legal_moves(root).iter().next() {
        Some(mv) => format!("bestmove {mv}"),
        None => "bestmove 0000".to_string(),
    }
}

/// The UCI engine, holding the current position and the searcher.
///
/// Runs an event-driven loop on the main thread, dispatching searches
/// to a worker thread and processing UCI commands concurrently.
pub struct UciEngine {
    position: Position,
    /// `None` while a worker thread owns it.
    searcher: Option<Searcher>,
    state: EngineState,
    signals: SharedSignals,
    config: EngineConfig,
    pending_clear_tt: bool,
    /// Pending TT resize (MB) to apply when the search thread returns the searcher.
    pending_resize_tt: Option<usize>,
    /// A finished ponder search waiting for `stop` or `ponderhit`.
    deferred_bestmove: Option<String>,
}

impl UciEngine {
    /// Create a new engine with the starting position.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            position: Position::startpos(),
            searcher: Some(Searcher::new(config.hash_mb)),
            state: EngineState::Idle,
            signals: SharedSignals::new(),
            config,
            pending_clear_tt: false,
            pending_resize_tt: None,
            deferred_bestmove: None,
        }
    }

    /// Run the UCI event loop, reading from stdin until `quit` or input closes.
    pub fn run(mut self) -> Result<(), UciError> {
        let (tx, rx) = mpsc::channel::<EngineEvent>();

        let stdin_tx = tx.clone();
        std::thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        debug!(cmd = %trimmed, "received UCI command");
                        if stdin_tx
                            .send(EngineEvent::UciCommand(parse_command(trimmed)))
                            .is_err()
                        {
                            return;
                        }
                    }
                    Err(e) => {
                        let e = UciError::from(e);
                        warn!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
            let _ = stdin_tx.send(EngineEvent::InputClosed);
        });

        for event in &rx {
            match event {
                EngineEvent::UciCommand(Ok(cmd)) => match cmd {
                    Command::Uci => self.handle_uci(),
                    Command::IsReady => println!("readyok"),
                    Command::UciNewGame => self.handle_ucinewgame(),
                    Command::Position(pos) => self.position = pos,
                    Command::Go(params) => self.handle_go(params, &tx),
                    Command::SetOption(opt) => self.handle_setoption(opt),
                    Command::PonderHit => self.handle_ponderhit(),
                    Command::Stop => self.handle_stop(),
                    Command::Quit => {
                        if !matches!(self.state, EngineState::Idle) {
                            self.signals.request_stop();
                            for ev in &rx {
                                if let EngineEvent::SearchDone(done) = ev {
                                    self.finish_search(done);
                                    break;
                                }
                            }
                        }
                        break;
                    }
                    Command::Unknown(cmd) => debug!(%cmd, "ignoring unknown command"),
                },
                EngineEvent::UciCommand(Err(e)) => {
                    warn!(error = %e, "UCI parse error");
                }
                EngineEvent::SearchDone(done) => self.finish_search(done),
                EngineEvent::InputClosed => break,
            }
        }

        info!("talon shutting down");
        Ok(())
    }

    fn handle_uci(&self) {
        println!("id name talon {}", env!("CARGO_PKG_VERSION"));
        println!("id author the talon developers");
        println!(
            "option name Hash type spin default {} min {} max {}",
            EngineConfig::default().hash_mb,
            HASH_RANGE.start(),
            HASH_RANGE.end()
        );
        println!("option name Ponder type check default false");
        println!("option name Clear Hash type button");
        println!("uciok");
    }

    fn handle_ucinewgame(&mut self) {
        self.position = Position::startpos();
        self.clear_tt();
    }

    fn clear_tt(&mut self) {
        match self.searcher {
            Some(ref mut searcher) => searcher.clear_tt(),
            // Search thread owns the searcher; clear once it comes back
            None => self.pending_clear_tt = true,
        }
    }

    fn handle_setoption(&mut self, option: UciOption) {
        match option {
            UciOption::Hash(mb) => {
                self.config.hash_mb = mb;
                match self.searcher {
                    Some(ref mut searcher) => searcher.resize_tt(mb),
                    None => self.pending_resize_tt = Some(mb),
                }
            }
            UciOption::Ponder(enabled) => self.config.ponder = enabled,
            UciOption::ClearHash => self.clear_tt(),
        }
        debug!(hash_mb = self.config.hash_mb, ponder = self.config.ponder, "options updated");
    }

    fn handle_go(&mut self, params: GoParams, tx: &mpsc::Sender<EngineEvent>) {
        if !matches!(self.state, EngineState::Idle) {
            warn!("go received while not idle, ignoring");
            return;
        }
        let Some(mut searcher) = self.searcher.take() else {
            warn!("go received while the searcher is busy, ignoring");
            return;
        };

        self.signals.reset();
        self.deferred_bestmove = None;

        let limits = limits_from_go(
            params.wtime,
            params.btime,
            params.winc,
            params.binc,
            params.movestogo,
            params.movetime,
            params.depth,
            params.infinite,
            params.ponder,
            self.position.side_to_move(),
        );
        debug!(?limits, "starting search");

        let mut position = self.position.clone();
        let mut signals = self.signals.clone();
        let tx = tx.clone();

        std::thread::spawn(move || {
            let result = searcher.think(&mut position, &limits, &mut signals, &mut UciReporter);
            let bestmove = bestmove_line(&result, &position);
            let _ = tx.send(EngineEvent::SearchDone(SearchDone { bestmove, searcher }));
        });

        self.state = if params.ponder {
            EngineState::Pondering
        } else {
            EngineState::Searching
        };
    }

    fn handle_ponderhit(&mut self) {
        if !matches!(self.state, EngineState::Pondering) {
            warn!("ponderhit received while not pondering, ignoring");
            return;
        }
        self.signals.ponder_hit();
        self.state = EngineState::Searching;
        self.flush_deferred();
    }

    fn handle_stop(&mut self) {
        self.signals.request_stop();
        if matches!(self.state, EngineState::Pondering) {
            self.state = EngineState::Searching;
        }
        self.flush_deferred();
    }

    /// Print a bestmove held back while pondering.
    fn flush_deferred(&mut self) {
        if let Some(line) = self.deferred_bestmove.take() {
            println!("{line}");
            self.state = EngineState::Idle;
        }
    }

    fn finish_search(&mut self, done: SearchDone) {
        let mut searcher = done.searcher;

        if let Some(mb) = self.pending_resize_tt.take() {
            // Resize supersedes clear: a fresh allocation is already empty
            searcher.resize_tt(mb);
            self.pending_clear_tt = false;
        } else if self.pending_clear_tt {
            searcher.clear_tt();
            self.pending_clear_tt = false;
        }
        self.searcher = Some(searcher);

        match self.state {
            // A ponder search may not answer until the GUI says so.
            EngineState::Pondering => self.deferred_bestmove = Some(done.bestmove),
            _ => {
                println!("{}", done.bestmove);
                self.state = EngineState::Idle;
            }
        }
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use talon_core::Position;
    use talon_engine::search::MATE;
    use talon_engine::{ReportedScore, SearchInfo, SearchResult};

    use super::{bestmove_line, info_line};

    fn result(best: Option<&str>, ponder: Option<&str>, pos: &Position) -> SearchResult {
        let parse = |text: &str| pos.parse_uci_move(text).unwrap();
        SearchResult {
            best_move: best.map(parse).unwrap_or(talon_core::Move::NULL),
            ponder_move: ponder.map(|text| {
                let mut next = pos.clone();
                next.play_uci_move(best.unwrap()).unwrap();
                next.parse_uci_move(text).unwrap()
            }),
            pv: Vec::new(),
            score: 0,
            nodes: 0,
            depth: 0,
        }
    }

    #[test]
    fn bestmove_with_and_without_ponder() {
        let pos = Position::startpos();
        assert_eq!(
            bestmove_line(&result(Some("e2e4"), Some("e7e5"), &pos), &pos),
            "bestmove e2e4 ponder e7e5"
        );
        assert_eq!(
            bestmove_line(&result(Some("g1f3"), None, &pos), &pos),
            "bestmove g1f3"
        );
    }

    #[test]
    fn bestmove_falls_back_to_a_legal_move() {
        let pos = Position::startpos();
        let line = bestmove_line(&result(None, None, &pos), &pos);
        let mv = line.strip_prefix("bestmove ").unwrap();
        assert!(pos.parse_uci_move(mv).is_ok());

        let mated: Position = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert_eq!(bestmove_line(&result(None, None, &mated), &mated), "bestmove 0000");
    }

    #[test]
    fn info_line_format() {
        let pos = Position::startpos();
        let pv = [pos.parse_uci_move("e2e4").unwrap()];
        let info = SearchInfo {
            depth: 3,
            elapsed: Duration::from_millis(42),
            nodes: 1234,
            score: ReportedScore::from_raw(MATE - 3),
            pv: &pv,
        };
        assert_eq!(info_line(&info), "info depth 3 time 42 nodes 1234 score mate 2 pv e2e4");
    }
}
