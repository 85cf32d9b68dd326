//! Per-session search state and the cooperative abort monitor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::SearchLimits;

/// Only every 4096th node polls for signals once past shallow plies.
const POLL_MASK: u64 = 4095;

/// Nodes at or above this ply are always polled.
const SHALLOW_PLY: usize = 3;

/// An external event delivered to a running search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Abandon the search as soon as possible.
    Stop,
    /// The pondered move was played: start honouring the clock.
    PonderHit,
}

/// Non-blocking source of [`Signal`]s, polled from inside the search.
pub trait StopSource {
    fn poll(&mut self) -> Option<Signal>;
}

/// Never signals.
impl StopSource for () {
    fn poll(&mut self) -> Option<Signal> {
        None
    }
}

/// Flags shared between an input thread and a searching thread.
#[derive(Debug, Clone, Default)]
pub struct SharedSignals {
    stop: Arc<AtomicBool>,
    ponderhit: Arc<AtomicBool>,
}

impl SharedSignals {
    pub fn new() -> SharedSignals {
        SharedSignals::default()
    }

    /// Ask the search to stop. Stays set until [`reset`](Self::reset).
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Report that the opponent played the pondered move.
    pub fn ponder_hit(&self) {
        self.ponderhit.store(true, Ordering::Release);
    }

    /// Clear both flags before a new search starts.
    pub fn reset(&self) {
        self.stop.store(false, Ordering::Release);
        self.ponderhit.store(false, Ordering::Release);
    }
}

impl StopSource for SharedSignals {
    fn poll(&mut self) -> Option<Signal> {
        if self.stop.load(Ordering::Acquire) {
            Some(Signal::Stop)
        } else if self.ponderhit.swap(false, Ordering::AcqRel) {
            Some(Signal::PonderHit)
        } else {
            None
        }
    }
}

/// Node counter, abort flag and clock of one `think` call.
///
/// Once the abort flag is raised it stays raised for the rest of the session.
pub struct SearchControl<'a> {
    nodes: u64,
    aborted: bool,
    start: Instant,
    root_depth: u8,
    move_time: Option<Duration>,
    pondering: bool,
    signals: &'a mut dyn StopSource,
}

impl<'a> SearchControl<'a> {
    pub fn new(limits: &SearchLimits, signals: &'a mut dyn StopSource) -> SearchControl<'a> {
        SearchControl {
            nodes: 0,
            aborted: false,
            start: Instant::now(),
            root_depth: 0,
            move_time: limits.move_time,
            pondering: limits.ponder,
            signals,
        }
    }

    #[inline]
    pub fn count_node(&mut self) {
        self.nodes += 1;
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    #[inline]
    pub fn root_depth(&self) -> u8 {
        self.root_depth
    }

    pub(crate) fn set_root_depth(&mut self, depth: u8) {
        self.root_depth = depth;
    }

    /// Time since the session started; pondering does not reset it.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Poll for signals and the clock at a node `ply` plies from the root.
    ///
    /// Deep nodes poll only when the node count hits the poll mask, and never
    /// during the first root depth. Returns whether the session is aborted.
    pub fn check(&mut self, ply: usize) -> bool {
        if self.aborted {
            return true;
        }
        if (self.nodes & POLL_MASK != 0 || self.root_depth == 1) && ply > SHALLOW_PLY {
            return false;
        }

        match self.signals.poll() {
            Some(Signal::Stop) => self.aborted = true,
            Some(Signal::PonderHit) => self.pondering = false,
            None => {}
        }

        if !self.pondering
            && let Some(limit) = self.move_time
            && self.elapsed() >= limit
        {
            self.aborted = true;
        }
        self.aborted
    }
}
