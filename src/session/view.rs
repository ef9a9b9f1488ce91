//! Immutable snapshot of a session for the presentation layer.

use serde::Serialize;
use shakmaty::Color;

use crate::board::Board;

use super::difficulty::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Color> for Side {
    fn from(color: Color) -> Side {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Checkmate,
    Stalemate,
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LastMove {
    pub from: String,
    pub to: String,
}

/// An engine verdict on a position.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    /// Pawn units.
    pub score: f64,
    /// SAN of the suggested move, empty when there is none.
    pub best_move: String,
    pub depth: u32,
}

impl Analysis {
    /// The fallback reported when analysis could not run.
    pub fn neutral() -> Self {
        Analysis {
            score: 0.0,
            best_move: String::new(),
            depth: 0,
        }
    }
}

/// Session fields that do not live on the board.
#[derive(Clone, Debug)]
pub struct ViewContext {
    pub player_color: Color,
    pub difficulty: Difficulty,
    pub thinking: bool,
    pub engine_ready: bool,
    pub analysis: Option<Analysis>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionView {
    pub fen: String,
    pub turn: Side,
    pub status: GameStatus,
    pub game_over: bool,
    pub winner: Option<Winner>,
    pub move_history: Vec<String>,
    pub last_move: Option<LastMove>,
    pub in_check: bool,
    pub thinking: bool,
    pub analysis: Option<Analysis>,
    pub player_color: Side,
    pub difficulty: u8,
    pub difficulty_label: String,
    pub engine_ready: bool,
    pub can_undo: bool,
    pub status_message: String,
}

impl SessionView {
    pub fn is_player_turn(&self) -> bool {
        self.engine_ready && !self.thinking && !self.game_over && self.turn == self.player_color
    }
}

/// Builds the snapshot for `board` and the session context around it.
pub fn derive_session_view(board: &Board, ctx: &ViewContext) -> SessionView {
    let checkmate = board.is_checkmate();
    let stalemate = board.is_stalemate();
    let draw = board.is_draw();

    let status = if checkmate {
        GameStatus::Checkmate
    } else if stalemate {
        GameStatus::Stalemate
    } else if draw {
        GameStatus::Draw
    } else {
        GameStatus::Playing
    };

    let winner = match status {
        GameStatus::Checkmate => Some(match board.side_to_move() {
            Color::White => Winner::Black,
            Color::Black => Winner::White,
        }),
        GameStatus::Stalemate | GameStatus::Draw => Some(Winner::Draw),
        GameStatus::Playing => None,
    };

    let last_move = board.last_move().map(|info| LastMove {
        from: info.from.to_string(),
        to: info.to.to_string(),
    });

    let game_over = status != GameStatus::Playing;
    let turn = board.side_to_move();

    SessionView {
        fen: board.fen(),
        turn: turn.into(),
        status,
        game_over,
        winner,
        move_history: board.history_san(),
        last_move,
        in_check: board.in_check(),
        thinking: ctx.thinking,
        analysis: ctx.analysis.clone(),
        player_color: ctx.player_color.into(),
        difficulty: ctx.difficulty.level(),
        difficulty_label: ctx.difficulty.label().to_owned(),
        engine_ready: ctx.engine_ready,
        can_undo: ctx.engine_ready && !ctx.thinking && board.ply_count() >= 2,
        status_message: status_message(winner, turn, ctx).to_owned(),
    }
}

fn status_message(winner: Option<Winner>, turn: Color, ctx: &ViewContext) -> &'static str {
    if !ctx.engine_ready {
        return "Loading engine...";
    }
    match winner {
        Some(Winner::Draw) => "Draw",
        Some(winner) => {
            let player_won = winner == Winner::from_color(ctx.player_color);
            if player_won { "You win!" } else { "Engine wins!" }
        }
        None if ctx.thinking => "Engine is thinking...",
        None if turn == ctx.player_color => "Your turn",
        None => "Engine's turn",
    }
}

impl Winner {
    fn from_color(color: Color) -> Winner {
        match color {
            Color::White => Winner::White,
            Color::Black => Winner::Black,
        }
    }
}
