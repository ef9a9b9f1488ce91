//! PGN export of a session's move history.

use chrono::NaiveDate;
use shakmaty::{Color, Position};

use crate::board::Board;

pub const PLAYER_NAME: &str = "Player";
pub const ENGINE_NAME: &str = "deskchess";

/// PGN result token for the current state of `board`.
pub fn result_token(board: &Board) -> &'static str {
    if board.is_checkmate() {
        match board.side_to_move() {
            Color::White => "0-1",
            Color::Black => "1-0",
        }
    } else if board.is_draw() {
        "1/2-1/2"
    } else {
        "*"
    }
}

/// Renders the game on `board` as PGN, with the human on `player_color`.
pub fn export_pgn(board: &Board, player_color: Color, date: NaiveDate) -> String {
    let result = result_token(board);
    let (white, black) = match player_color {
        Color::White => (PLAYER_NAME, ENGINE_NAME),
        Color::Black => (ENGINE_NAME, PLAYER_NAME),
    };

    let mut out = String::new();
    out.push_str("[Event \"Casual game\"]\n");
    out.push_str(&format!("[Date \"{}\"]\n", date.format("%Y.%m.%d")));
    out.push_str(&format!("[White \"{white}\"]\n"));
    out.push_str(&format!("[Black \"{black}\"]\n"));
    out.push_str(&format!("[Result \"{result}\"]\n"));
    let initial_fen = board.initial_fen();
    if initial_fen != Board::new().fen() {
        out.push_str("[SetUp \"1\"]\n");
        out.push_str(&format!("[FEN \"{initial_fen}\"]\n"));
    }
    out.push('\n');

    let start = board.initial_position();
    let mut number = start.fullmoves().get();
    let mut turn = start.turn();
    let mut tokens = Vec::with_capacity(board.ply_count() + 1);
    for (i, san) in board.history_san().into_iter().enumerate() {
        match turn {
            Color::White => tokens.push(format!("{number}. {san}")),
            Color::Black => {
                if i == 0 {
                    tokens.push(format!("{number}... {san}"));
                } else {
                    tokens.push(san);
                }
                number += 1;
            }
        }
        turn = !turn;
    }
    tokens.push(result.to_owned());

    out.push_str(&tokens.join(" "));
    out.push('\n');
    out
}
