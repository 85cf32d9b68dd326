//! Reporting sink for root progress.

use std::fmt;
use std::time::Duration;

use talon_core::Move;

use super::{MATE, MAX_EVAL};

/// A score as shown to a user: centipawns, or moves until mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedScore {
    Centipawns(i32),
    /// Positive when the side to move mates, negative when it is mated.
    Mate(i32),
}

impl ReportedScore {
    /// Classify a raw search score.
    pub fn from_raw(score: i32) -> ReportedScore {
        if score < -MAX_EVAL {
            ReportedScore::Mate((-MATE - score) / 2)
        } else if score > MAX_EVAL {
            ReportedScore::Mate((MATE - score + 1) / 2)
        } else {
            ReportedScore::Centipawns(score)
        }
    }
}

/// UCI form: `cp 35` or `mate -2`.
impl fmt::Display for ReportedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportedScore::Centipawns(cp) => write!(f, "cp {cp}"),
            ReportedScore::Mate(moves) => write!(f, "mate {moves}"),
        }
    }
}

/// Snapshot of the root line.
#[derive(Debug, Clone)]
pub struct SearchInfo<'a> {
    pub depth: u8,
    pub elapsed: Duration,
    pub nodes: u64,
    pub score: ReportedScore,
    pub pv: &'a [Move],
}

/// Receives search progress. Every method defaults to doing nothing.
pub trait Reporter {
    /// A new root iteration begins.
    fn depth_started(&mut self, _depth: u8) {}

    /// The root principal variation changed inside the current iteration.
    fn root_improved(&mut self, _info: &SearchInfo<'_>) {}

    /// An iteration finished without being aborted.
    fn depth_completed(&mut self, _info: &SearchInfo<'_>) {}
}

/// Discards everything.
impl Reporter for () {}

#[cfg(test)]
mod tests {
    use super::ReportedScore;
    use crate::search::MATE;

    #[test]
    fn mate_distance_in_moves() {
        assert_eq!(ReportedScore::from_raw(MATE - 1), ReportedScore::Mate(1));
        assert_eq!(ReportedScore::from_raw(MATE - 3), ReportedScore::Mate(2));
        assert_eq!(ReportedScore::from_raw(-MATE + 2), ReportedScore::Mate(-1));
        assert_eq!(ReportedScore::from_raw(-MATE + 4), ReportedScore::Mate(-2));
    }

    #[test]
    fn ordinary_scores_pass_through() {
        assert_eq!(ReportedScore::from_raw(-45), ReportedScore::Centipawns(-45));
        assert_eq!(ReportedScore::from_raw(0).to_string(), "cp 0");
        assert_eq!(ReportedScore::from_raw(MATE - 5).to_string(), "mate 3");
    }
}
