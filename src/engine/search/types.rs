//! Search results, statistics and score constants.

/// Score sentinel for a forced mate. Larger than any material sum, so a mate
/// always outranks a material swing.
pub const INFINITY: i32 = 1_000_000;

/// Centipawns per pawn when scores are reported to callers.
pub const CENTIPAWNS_PER_PAWN: f64 = 100.0;

/// Outcome of a root search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// `None` only when the root has no legal moves.
    pub best_move: Option<M>,
    /// Raw centipawn score from White's point of view.
    pub score: i32,
}

impl<M> SearchResult<M> {
    pub fn none() -> Self {
        SearchResult {
            best_move: None,
            score: 0,
        }
    }

    /// Score in pawn units. Mate sentinels become infinities.
    pub fn pawns(&self) -> f64 {
        to_pawns(self.score)
    }

    pub fn is_mate(&self) -> bool {
        self.score.abs() >= INFINITY
    }
}

pub fn to_pawns(score: i32) -> f64 {
    if score >= INFINITY {
        f64::INFINITY
    } else if score <= -INFINITY {
        f64::NEG_INFINITY
    } else {
        score as f64 / CENTIPAWNS_PER_PAWN
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Every call into the recursive search, leaves included.
    pub nodes: u64,
    /// Calls that returned a static evaluation.
    pub leaves: u64,
    /// Sibling loops left early by an alpha-beta cutoff.
    pub cutoffs: u64,
}
