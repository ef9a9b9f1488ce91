//! Static evaluation: material, piece-square tables and mobility.
//!
//! Scores are centipawns from White's point of view.

use shakmaty::{Color, Position, Role};

use crate::board::Board;

use super::search::INFINITY;

/// Centipawns per legal move of the side to move.
pub const MOBILITY_WEIGHT: i32 = 2;

/// Something that can score a state for the search.
pub trait Evaluate<S> {
    /// Score of `state`, positive when White is better.
    fn evaluate(&self, state: &S) -> i32;
}

/// The chess evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl Evaluate<Board> for Evaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        evaluate(board)
    }
}

// Tables are laid out as seen from White: row 0 is the eighth rank.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,   0,   0,   0,   0,  0,  0,
    50, 50,  50,  50,  50,  50, 50, 50,
    10, 10,  20,  30,  30,  20, 10, 10,
     5,  5,  10,  25,  25,  10,  5,  5,
     0,  0,   0,  20,  20,   0,  0,  0,
     5, -5, -10,   0,   0, -10, -5,  5,
     5, 10,  10, -20, -20,  10, 10,  5,
     0,  0,   0,   0,   0,   0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

pub fn role_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight => 320,
        Role::Bishop => 330,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 20000,
    }
}

fn piece_square_table(role: Role) -> Option<&'static [i32; 64]> {
    match role {
        Role::Pawn => Some(&PAWN_TABLE),
        Role::Knight => Some(&KNIGHT_TABLE),
        Role::Bishop => Some(&BISHOP_TABLE),
        _ => None,
    }
}

/// Evaluate the current position of `board`.
///
/// Checkmate scores `-INFINITY` when White is mated and `INFINITY` when
/// Black is; any draw scores 0.
pub fn evaluate(board: &Board) -> i32 {
    let pos = board.position();

    if pos.is_checkmate() {
        return match pos.turn() {
            Color::White => -INFINITY,
            Color::Black => INFINITY,
        };
    }
    if board.is_draw() {
        return 0;
    }

    let mut score = 0;
    let placement = pos.board();
    for sq in placement.occupied() {
        let Some(piece) = placement.piece_at(sq) else {
            continue;
        };
        // a1 is square 0, so White reads the table through a rank flip and
        // Black reads it directly.
        let idx = match piece.color {
            Color::White => sq.flip_vertical() as usize,
            Color::Black => sq as usize,
        };
        let bonus = piece_square_table(piece.role).map_or(0, |table| table[idx]);
        let value = role_value(piece.role) + bonus;
        score += match piece.color {
            Color::White => value,
            Color::Black => -value,
        };
    }

    let mobility = pos.legal_moves().len() as i32 * MOBILITY_WEIGHT;
    score += match pos.turn() {
        Color::White => mobility,
        Color::Black => -mobility,
    };

    score
}
