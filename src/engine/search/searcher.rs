//! Searcher: root move selection and search entry point.

use std::time::Instant;

use shakmaty::Color;
use tracing::debug;

use crate::board::GameState;
use crate::engine::eval::{Evaluate, Evaluator};

use super::ordering::order_moves;
use super::types::{SearchResult, SearchStats, INFINITY};

/// Runs root searches with an evaluator.
///
/// A searcher holds no state between searches other than the statistics of
/// the last one; the result depends only on the state and depth passed in.
pub struct Searcher<E = Evaluator> {
    pub(super) evaluator: E,
    pub(super) stats: SearchStats,
}

impl Searcher<Evaluator> {
    pub fn new() -> Self {
        Self::with_evaluator(Evaluator)
    }
}

impl<E> Searcher<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        Searcher {
            evaluator,
            stats: SearchStats::default(),
        }
    }

    /// Statistics of the most recent `search`.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Picks the best move for the side to move, searching `depth` plies.
    ///
    /// White maximises, Black minimises; on equal scores the first move in
    /// search order is kept. A depth below 1 scores each root move by its
    /// static evaluation. A position without legal moves yields no move and
    /// a score of 0.
    pub fn search<S>(&mut self, state: &mut S, depth: i32) -> SearchResult<S::Move>
    where
        S: GameState,
        E: Evaluate<S>,
    {
        self.stats = SearchStats::default();
        let start = Instant::now();

        let moves = order_moves(state, state.moves());
        if moves.is_empty() {
            return SearchResult::none();
        }

        let depth = depth.max(0);
        let maximizing = state.side_to_move() == Color::White;
        let mut best_move = moves[0].clone();
        let mut best_value = if maximizing { -INFINITY } else { INFINITY };

        for mv in &moves {
            let value = match state.play(mv) {
                Some(mut child) => {
                    self.minimax(&mut *child, depth - 1, -INFINITY, INFINITY, !maximizing)
                }
                None => continue,
            };

            let improves = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improves {
                best_value = value;
                best_move = mv.clone();
            }
        }

        debug!(
            depth,
            score = best_value,
            nodes = self.stats.nodes,
            leaves = self.stats.leaves,
            cutoffs = self.stats.cutoffs,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );

        SearchResult {
            best_move: Some(best_move),
            score: best_value,
        }
    }
}

impl Default for Searcher<Evaluator> {
    fn default() -> Self {
        Self::new()
    }
}
