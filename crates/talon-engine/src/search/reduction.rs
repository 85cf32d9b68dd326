//! Late-move reduction table.

use super::MAX_PLY;
use talon_core::MAX_MOVES;

/// Reductions below this are not worth applying.
const MIN_REDUCTION: f64 = 0.80;

/// Plies to reduce a late move by, per node type, remaining depth and move index.
///
/// Built once and shared read-only by every search of a [`Searcher`](super::Searcher).
pub struct ReductionTable {
    // [zero-window, pv][depth][moves tried]
    plies: [[[u8; MAX_MOVES]; MAX_PLY]; 2],
}

impl ReductionTable {
    pub fn new() -> Box<ReductionTable> {
        let mut table = Box::new(ReductionTable {
            plies: [[[0; MAX_MOVES]; MAX_PLY]; 2],
        });

        for depth in 1..MAX_PLY {
            for moves in 1..MAX_MOVES {
                let r = (depth as f64).ln() * (moves.min(63) as f64).ln() / 2.0;
                let r = if r < MIN_REDUCTION { 0.0 } else { r };
                let zero_window = r as i32;
                let pv = (r - 1.0).max(0.0) as i32;

                let cap = depth as i32 - 1;
                for (node, value) in [(0, zero_window), (1, pv)] {
                    let value = if value < 1 { 0 } else { value.min(cap) };
                    table.plies[node][depth][moves] = value as u8;
                }
            }
        }
        table
    }

    /// Reduction for the `tried`-th legal move at `depth`.
    #[inline]
    pub fn get(&self, pv_node: bool, depth: i32, tried: usize) -> i32 {
        let depth = depth.clamp(0, MAX_PLY as i32 - 1) as usize;
        let tried = tried.min(MAX_MOVES - 1);
        self.plies[pv_node as usize][depth][tried] as i32
    }
}

#[cfg(test)]
mod tests {
    use super::ReductionTable;
    use crate::search::MAX_PLY;
    use talon_core::MAX_MOVES;

    #[test]
    fn never_removes_the_whole_depth() {
        let table = ReductionTable::new();
        for depth in 1..MAX_PLY as i32 {
            for tried in 1..MAX_MOVES {
                for pv in [false, true] {
                    let r = table.get(pv, depth, tried);
                    assert!(r >= 0 && r <= depth - 1, "d={depth} m={tried} r={r}");
                }
            }
        }
    }

    #[test]
    fn pv_nodes_reduce_less() {
        let table = ReductionTable::new();
        for depth in 1..MAX_PLY as i32 {
            for tried in 1..MAX_MOVES {
                assert!(table.get(true, depth, tried) <= table.get(false, depth, tried));
            }
        }
    }

    #[test]
    fn known_values() {
        let table = ReductionTable::new();
        // ln(3) * ln(4) / 2 = 0.76, under the floor
        assert_eq!(table.get(false, 3, 4), 0);
        // ln(10) * ln(20) / 2 = 3.45
        assert_eq!(table.get(false, 10, 20), 3);
        assert_eq!(table.get(true, 10, 20), 2);
        // capped at depth - 1
        assert_eq!(table.get(false, 3, 200), 2);
        // move index saturates at 63
        assert_eq!(table.get(false, 20, 63), table.get(false, 20, 250));
    }

    #[test]
    fn first_move_and_depth_zero_are_unreduced() {
        let table = ReductionTable::new();
        for depth in 0..MAX_PLY as i32 {
            assert_eq!(table.get(false, depth, 0), 0);
        }
        for tried in 0..MAX_MOVES {
            assert_eq!(table.get(false, 0, tried), 0);
        }
    }
}
