//! Search: minimax with alpha-beta pruning and capture-first ordering.

mod alphabeta;
mod ordering;
mod searcher;
mod types;

pub use ordering::order_moves;
pub use searcher::Searcher;
pub use types::{to_pawns, SearchResult, SearchStats, CENTIPAWNS_PER_PAWN, INFINITY};
