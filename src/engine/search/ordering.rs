//! Move ordering: captures first.

use crate::board::GameState;

/// Stable partition of `moves` with captures in front. Both halves keep the
/// generation order, so the same position always yields the same order.
pub fn order_moves<S: GameState>(state: &S, moves: Vec<S::Move>) -> Vec<S::Move> {
    let (mut ordered, quiet): (Vec<_>, Vec<_>) =
        moves.into_iter().partition(|mv| state.is_capture(mv));
    ordered.extend(quiet);
    ordered
}
