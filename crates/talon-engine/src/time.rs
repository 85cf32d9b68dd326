//! Time management: turn `go` clock parameters into search limits.

use std::time::Duration;

use talon_core::Color;

use crate::search::{MAX_PLY, SearchLimits};

/// Moves assumed left in the game when the GUI does not say.
const DEFAULT_MOVES_TO_GO: u32 = 30;

/// Kept in reserve for process and GUI latency.
const OVERHEAD: Duration = Duration::from_millis(10);

/// Time to spend on one move from `remaining` clock time.
///
/// An even share of the remaining time over `moves_to_go` moves plus three
/// quarters of the increment, capped at half the clock minus the overhead.
/// Never less than a millisecond.
pub fn move_budget(remaining: Duration, increment: Duration, moves_to_go: Option<u32>) -> Duration {
    let one_ms = Duration::from_millis(1);
    let mtg = moves_to_go.unwrap_or(DEFAULT_MOVES_TO_GO).max(1);

    let share = remaining / mtg + increment * 3 / 4;
    let cap = (remaining / 2).saturating_sub(OVERHEAD);

    share.min(cap).max(one_ms)
}

/// Build [`SearchLimits`] from UCI `go` parameters for the side to move.
///
/// Priority order:
/// 1. `infinite` -> no clock
/// 2. `movetime` -> exactly that budget
/// 3. `wtime`/`btime` for `side` -> [`move_budget`]
/// 4. depth-only or bare `go` -> no clock
///
/// `ponder` keeps whatever budget was derived but holds the clock off
/// until a ponderhit.
#[allow(clippy::too_many_arguments)]
pub fn limits_from_go(
    wtime: Option<Duration>,
    btime: Option<Duration>,
    winc: Option<Duration>,
    binc: Option<Duration>,
    movestogo: Option<u32>,
    movetime: Option<Duration>,
    depth: Option<u8>,
    infinite: bool,
    ponder: bool,
    side: Color,
) -> SearchLimits {
    let (remaining, increment) = match side {
        Color::White => (wtime, winc),
        Color::Black => (btime, binc),
    };

    let move_time = if infinite {
        None
    } else if let Some(mt) = movetime {
        Some(mt)
    } else {
        remaining.map(|rem| move_budget(rem, increment.unwrap_or(Duration::ZERO), movestogo))
    };

    SearchLimits {
        depth: depth.unwrap_or((MAX_PLY - 1) as u8),
        move_time,
        ponder,
    }
}
