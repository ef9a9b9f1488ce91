//! Game session: turn-taking between a human and the engine.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use chrono::Local;
use crossbeam_channel::TryRecvError;
use shakmaty::{Color, Role};
use tracing::{debug, info, warn};

use crate::board::{Board, MoveInfo};
use crate::config::SessionConfig;
use crate::engine::Evaluator;
use crate::error::MoveRejected;

use super::analysis::analyze_board;
use super::difficulty::Difficulty;
use super::pgn;
use super::view::{derive_session_view, Analysis, SessionView, ViewContext};
use super::worker::{self, EngineJob, EngineReply};

/// Where the session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Created but not started.
    Idle,
    PlayerTurn,
    EngineTurn,
    GameOver,
}

pub struct GameSession {
    board: Board,
    /// Position a reset returns to.
    origin: Board,
    config: SessionConfig,
    player_color: Color,
    /// Shared with the worker, which reads it when a search starts.
    difficulty: Arc<AtomicU8>,
    analysis: Option<Analysis>,
    /// The in-flight engine search. `Some` exactly while thinking.
    pending: Option<EngineJob>,
    ready: bool,
    view: SessionView,
}

impl GameSession {
    /// A session on the standard initial position.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_board(Board::new(), config)
    }

    /// A session starting from `board`. Call `start` before playing.
    pub fn with_board(board: Board, config: SessionConfig) -> Self {
        let difficulty = Difficulty::new(config.difficulty);
        let player_color = config.player_color.into();
        let ctx = ViewContext {
            player_color,
            difficulty,
            thinking: false,
            engine_ready: false,
            analysis: None,
        };
        let view = derive_session_view(&board, &ctx);
        GameSession {
            origin: board.clone(),
            board,
            config,
            player_color,
            difficulty: Arc::new(AtomicU8::new(difficulty.level())),
            analysis: None,
            pending: None,
            ready: false,
            view,
        }
    }

    /// Marks the engine available and enters the first turn. If the engine
    /// moves first its search is scheduled immediately.
    pub fn start(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        info!(player = ?self.player_color, difficulty = %self.difficulty(), "session started");
        self.after_change();
    }

    pub fn phase(&self) -> Phase {
        if !self.ready {
            Phase::Idle
        } else if self.board.is_game_over() {
            Phase::GameOver
        } else if self.board.side_to_move() == self.player_color {
            Phase::PlayerTurn
        } else {
            Phase::EngineTurn
        }
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn player_color(&self) -> Color {
        self.player_color
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::new(self.difficulty.load(Ordering::Acquire))
    }

    /// Plays the human move `from`-`to`; pawns reaching the last rank become
    /// queens. Returns `false`, with nothing changed, if the move is refused.
    pub fn make_move(&mut self, from: &str, to: &str) -> bool {
        self.try_move(from, to, None).is_ok()
    }

    /// Like `make_move`, with an explicit promotion piece and the reason for
    /// a refusal.
    pub fn try_move(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<Role>,
    ) -> Result<MoveInfo, MoveRejected> {
        if self.is_thinking() {
            return Err(MoveRejected::EngineThinking);
        }
        match self.phase() {
            Phase::PlayerTurn => {}
            Phase::Idle => return Err(MoveRejected::NotReady),
            Phase::EngineTurn => return Err(MoveRejected::NotYourTurn),
            Phase::GameOver => return Err(MoveRejected::GameOver),
        }

        let played = self.board.try_apply_uci(from, to, promotion).inspect_err(|err| {
            debug!(%err, "player move rejected");
        })?;
        info!(san = %played.san, uci = %played.uci, "player move");
        self.after_change();
        Ok(played)
    }

    /// Applies a finished engine search if there is one. Never blocks.
    /// Returns `true` when an engine result was consumed.
    pub fn poll(&mut self) -> bool {
        let Some(job) = &self.pending else {
            return false;
        };
        match job.rx.try_recv() {
            Ok(reply) => {
                self.pending = None;
                self.finish_engine_turn(reply);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                warn!("engine worker exited without a result, rescheduling");
                self.pending = None;
                self.after_change();
                false
            }
        }
    }

    /// Blocks until the in-flight engine search finishes and applies it.
    /// Returns `false` immediately if the engine is not thinking.
    pub fn wait_for_engine(&mut self) -> bool {
        let Some(job) = self.pending.take() else {
            return false;
        };
        match job.rx.recv() {
            Ok(reply) => {
                self.finish_engine_turn(reply);
                true
            }
            Err(_) => {
                warn!("engine worker exited without a result, rescheduling");
                self.after_change();
                false
            }
        }
    }

    /// Searches a copy of the current position at the analysis depth and
    /// stores the verdict, scored for the side to move. The live board is
    /// never touched.
    pub fn analyze_position(&mut self) -> Option<Analysis> {
        if !self.ready || self.is_thinking() {
            return None;
        }

        let analysis = analyze_board(&self.board, Evaluator, self.config.analysis_depth);
        self.analysis = Some(analysis.clone());
        self.refresh_view();
        Some(analysis)
    }

    /// Takes back the last player move and the engine reply together.
    /// Needs at least two half-moves of history.
    pub fn undo_move(&mut self) -> bool {
        if !self.ready || self.is_thinking() || self.board.ply_count() < 2 {
            return false;
        }
        self.board.undo();
        self.board.undo();
        self.analysis = None;
        info!(ply = self.board.ply_count(), "took back two half-moves");
        self.after_change();
        true
    }

    /// Returns to the starting position and clears analysis.
    pub fn reset_game(&mut self) -> bool {
        if !self.ready || self.is_thinking() {
            return false;
        }
        self.board = self.origin.clone();
        self.analysis = None;
        info!("new game");
        self.after_change();
        true
    }

    /// Swaps the color the human plays. If that hands the move to the
    /// engine, it starts thinking.
    pub fn flip_board(&mut self) -> bool {
        if !self.ready || self.is_thinking() {
            return false;
        }
        self.player_color = !self.player_color;
        info!(player = ?self.player_color, "board flipped");
        self.after_change();
        true
    }

    /// Sets the level used by the next engine search. A search already
    /// running keeps its depth.
    pub fn set_difficulty(&mut self, level: u8) -> Difficulty {
        let difficulty = Difficulty::new(level);
        self.difficulty.store(difficulty.level(), Ordering::Release);
        debug!(%difficulty, "difficulty changed");
        self.refresh_view();
        difficulty
    }

    pub fn export_pgn(&self) -> String {
        pgn::export_pgn(&self.board, self.player_color, Local::now().date_naive())
    }

    fn finish_engine_turn(&mut self, reply: EngineReply) {
        if reply.fen != self.board.fen() {
            warn!("discarding engine result for a position no longer on the board");
            self.after_change();
            return;
        }

        match reply.result.best_move.as_ref() {
            Some(mv) => match self.board.apply(mv) {
                Some(played) => {
                    info!(
                        san = %played.san,
                        score = reply.result.pawns(),
                        depth = reply.depth,
                        "engine move"
                    );
                    self.analysis = Some(Analysis {
                        score: reply.result.pawns(),
                        best_move: played.san,
                        depth: reply.depth.max(0) as u32,
                    });
                }
                None => warn!(?mv, "engine returned an illegal move"),
            },
            None => debug!("engine had no legal move"),
        }
        self.after_change();
    }

    fn after_change(&mut self) {
        if self.phase() == Phase::EngineTurn && !self.is_thinking() {
            self.schedule_engine();
        }
        let was_over = self.view.game_over;
        self.refresh_view();
        if self.view.game_over && !was_over {
            info!(status = ?self.view.status, winner = ?self.view.winner, "game over");
        }
    }

    fn schedule_engine(&mut self) {
        debug!(delay_ms = self.config.engine_delay_ms, "engine turn scheduled");
        self.pending = Some(worker::spawn_search(
            self.board.clone(),
            Arc::clone(&self.difficulty),
            self.config.max_engine_depth,
            self.config.engine_delay(),
        ));
    }

    fn refresh_view(&mut self) {
        let ctx = ViewContext {
            player_color: self.player_color,
            difficulty: self.difficulty(),
            thinking: self.is_thinking(),
            engine_ready: self.ready,
            analysis: self.analysis.clone(),
        };
        self.view = derive_session_view(&self.board, &ctx);
    }
}
