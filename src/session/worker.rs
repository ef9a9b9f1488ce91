//! Background engine search for the engine's turn.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver};
use shakmaty::Move;
use tracing::debug;

use crate::board::Board;
use crate::engine::{SearchResult, Searcher};

use super::difficulty::Difficulty;

pub(crate) struct EngineReply {
    /// FEN of the position that was searched.
    pub(crate) fen: String,
    pub(crate) depth: i32,
    pub(crate) result: SearchResult<Move>,
}

/// A search running on its own thread.
pub(crate) struct EngineJob {
    pub(crate) rx: Receiver<EngineReply>,
}

/// Starts searching a copy of `board` after `delay`.
///
/// The depth is read from `difficulty` when the search starts, not when it
/// is scheduled, so a level change during the delay still applies.
pub(crate) fn spawn_search(
    board: Board,
    difficulty: Arc<AtomicU8>,
    max_depth: i32,
    delay: Duration,
) -> EngineJob {
    let (tx, rx) = bounded(1);

    thread::spawn(move || {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        let level = Difficulty::new(difficulty.load(Ordering::Acquire));
        let depth = level.search_depth(max_depth);
        debug!(%level, depth, "engine search started");

        let mut board = board;
        let result = Searcher::new().search(&mut board, depth);
        let reply = EngineReply {
            fen: board.fen(),
            depth,
            result,
        };
        // The session may have been dropped meanwhile.
        let _ = tx.send(reply);
    });

    EngineJob { rx }
}
