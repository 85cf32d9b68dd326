//! Draws by the fifty-move rule and by repetition.

use talon_core::Position;

/// Is `pos` drawn by rule?
///
/// Repetitions are looked for among same-side positions, starting four
/// plies back and going no further than the last irreversible move.
pub fn is_draw(pos: &Position) -> bool {
    let rev_moves = pos.rev_moves() as usize;
    if rev_moves > 100 {
        return true;
    }
    let key = pos.key();
    (4..=rev_moves)
        .step_by(2)
        .any(|plies_ago| pos.repetition_key(plies_ago) == Some(key))
}
