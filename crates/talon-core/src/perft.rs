//! Leaf-node counting for move generator verification.

use crate::movegen::{generate_all, legal_moves};
use crate::position::Position;

/// Count leaf nodes of the legal move tree `depth` plies deep.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for &mv in generate_all(pos).iter() {
        let undo = pos.make_move(mv);
        if !pos.is_illegal() {
            nodes += if depth == 1 { 1 } else { perft(pos, depth - 1) };
        }
        pos.unmake_move(mv, undo);
    }
    nodes
}

/// Per-move perft breakdown as `(uci_move, nodes)`, sorted by move text.
pub fn divide(pos: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = legal_moves(pos)
        .iter()
        .map(|&mv| {
            let undo = pos.make_move(mv);
            let count = perft(pos, depth.saturating_sub(1));
            pos.unmake_move(mv, undo);
            (mv.to_string(), count)
        })
        .collect();
    results.sort();
    results
}
