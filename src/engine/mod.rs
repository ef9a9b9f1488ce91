//! Chess engine components
//!
//! - Static evaluation (material, piece-square tables, mobility)
//! - Minimax search with alpha-beta pruning

pub mod eval;
pub mod search;

pub use eval::{evaluate, Evaluate, Evaluator, MOBILITY_WEIGHT};
pub use search::{SearchResult, SearchStats, Searcher, INFINITY};
