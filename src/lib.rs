pub mod board;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod session;

pub use board::{Board, GameState, MoveInfo};
pub use config::{PlayerColor, SessionConfig};
pub use console::Console;
pub use engine::{evaluate, SearchResult, Searcher};
pub use session::{Analysis, Difficulty, GameSession, Phase, SessionView};
pub use shakmaty;
