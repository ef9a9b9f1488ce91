//! Game session controller
//!
//! Drives a game between a human and the engine: turn-taking, difficulty,
//! background engine turns, on-demand analysis, and the read-only view the
//! presentation layer renders.

mod analysis;
mod controller;
mod difficulty;
pub mod pgn;
mod view;
mod worker;

pub use analysis::analyze_board;
pub use controller::{GameSession, Phase};
pub use difficulty::Difficulty;
pub use view::{
    derive_session_view, Analysis, GameStatus, LastMove, SessionView, Side, ViewContext, Winner,
};
