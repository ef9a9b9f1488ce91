//! On-demand position analysis.

use std::panic::{self, AssertUnwindSafe};

use shakmaty::Color;
use tracing::{debug, warn};

use crate::board::Board;
use crate::engine::{Evaluate, Searcher};

use super::view::Analysis;

/// Searches a copy of `board` `depth` plies deep with `evaluator` and
/// reports the verdict for the side to move, in pawns.
///
/// `board` itself is never touched. Mate scores are reported as 0. If the
/// search panics the result is `Analysis::neutral()`.
pub fn analyze_board<E: Evaluate<Board>>(board: &Board, evaluator: E, depth: i32) -> Analysis {
    let side = board.side_to_move();
    let snapshot = board.clone();
    let outcome = panic::catch_unwind(AssertUnwindSafe(move || {
        let mut board = snapshot;
        let result = Searcher::with_evaluator(evaluator).search(&mut board, depth);
        let best_move = result
            .best_move
            .as_ref()
            .and_then(|mv| board.apply(mv))
            .map(|info| info.san)
            .unwrap_or_default();
        (result.pawns(), best_move)
    }));

    let analysis = match outcome {
        Ok((raw, best_move)) => {
            let score = match side {
                Color::White => raw,
                Color::Black => -raw,
            };
            Analysis {
                score: if score.is_finite() { score } else { 0.0 },
                best_move,
                depth: depth.max(0) as u32,
            }
        }
        Err(_) => {
            warn!("analysis failed, reporting a neutral result");
            Analysis::neutral()
        }
    };
    debug!(score = analysis.score, best = %analysis.best_move, "analysis");
    analysis
}
