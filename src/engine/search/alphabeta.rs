//! Depth-limited minimax with alpha-beta pruning.

use crate::board::GameState;
use crate::engine::eval::Evaluate;

use super::ordering::order_moves;
use super::searcher::Searcher;
use super::types::INFINITY;

impl<E> Searcher<E> {
    /// Value of `state` searched `depth` plies deep, from White's point of
    /// view. `maximizing` is true when White is to move in this subtree.
    ///
    /// `state` is walked in place; it is identical to the input on return.
    pub fn minimax<S>(
        &mut self,
        state: &mut S,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32
    where
        S: GameState,
        E: Evaluate<S>,
    {
        self.stats.nodes += 1;

        if depth <= 0 || state.is_game_over() {
            self.stats.leaves += 1;
            return self.evaluator.evaluate(state);
        }

        let moves = order_moves(state, state.moves());

        if maximizing {
            let mut best = -INFINITY;
            for mv in &moves {
                let Some(mut child) = state.play(mv) else {
                    continue;
                };
                let value = self.minimax(&mut *child, depth - 1, alpha, beta, false);
                drop(child);

                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for mv in &moves {
                let Some(mut child) = state.play(mv) else {
                    continue;
                };
                let value = self.minimax(&mut *child, depth - 1, alpha, beta, true);
                drop(child);

                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }
}
