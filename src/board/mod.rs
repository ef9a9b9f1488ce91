//! Board state provider.
//!
//! `shakmaty` owns the rules; `Board` layers in-place apply/undo on top of
//! its copy-make `Chess` positions by keeping a stack of them, together with
//! the moves that connect them and the position keys used for repetition.

mod state;

pub use state::{GameState, Played};

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus, Suffix};
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position, Rank, Role, Square};

use crate::error::BoardError;

fn position_hash(pos: &Chess) -> u64 {
    let z: Zobrist64 = pos.zobrist_hash(EnPassantMode::Legal);
    z.0
}

/// A move together with the notation the presentation layer shows for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveInfo {
    pub mv: Move,
    pub from: Square,
    /// Destination as the player sees it (the king's square for castling).
    pub to: Square,
    pub promotion: Option<Role>,
    pub capture: bool,
    /// Standard algebraic notation with check/mate suffix.
    pub san: String,
    pub uci: String,
}

fn describe(before: &Chess, after: &Chess, mv: &Move) -> MoveInfo {
    let uci = mv.to_uci(CastlingMode::Standard);
    let (from, to) = match uci {
        UciMove::Normal { from, to, .. } => (from, to),
        _ => (mv.from().unwrap_or_else(|| mv.to()), mv.to()),
    };
    let suffix = if after.is_checkmate() {
        Some(Suffix::Checkmate)
    } else if after.is_check() {
        Some(Suffix::Check)
    } else {
        None
    };
    let san = SanPlus {
        san: San::from_move(before, mv),
        suffix,
    };
    MoveInfo {
        mv: mv.clone(),
        from,
        to,
        promotion: mv.promotion(),
        capture: mv.is_capture(),
        san: san.to_string(),
        uci: uci.to_string(),
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    /// `stack[0]` is the position the game started from; the last entry is
    /// the current position. Always non-empty.
    stack: Vec<Chess>,
    /// `moves[i]` leads from `stack[i]` to `stack[i + 1]`.
    moves: Vec<Move>,
    /// Position keys, parallel to `stack`.
    keys: Vec<u64>,
}

impl Board {
    /// The standard initial position.
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    pub fn from_position(pos: Chess) -> Self {
        let key = position_hash(&pos);
        Board {
            stack: vec![pos],
            moves: Vec::new(),
            keys: vec![key],
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let invalid = |reason: String| BoardError::InvalidFen {
            fen: fen.to_owned(),
            reason,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        Ok(Self::from_position(pos))
    }

    /// The current position.
    pub fn position(&self) -> &Chess {
        &self.stack[self.stack.len() - 1]
    }

    /// The position the history starts from.
    pub fn initial_position(&self) -> &Chess {
        &self.stack[0]
    }

    pub fn fen(&self) -> String {
        fen_of(self.position())
    }

    pub fn initial_fen(&self) -> String {
        fen_of(self.initial_position())
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.position().legal_moves().into_iter().collect()
    }

    /// Legal moves with capture flag and notation.
    pub fn legal_moves_verbose(&self) -> Vec<MoveInfo> {
        let pos = self.position();
        pos.legal_moves()
            .into_iter()
            .filter_map(|mv| {
                let after = pos.clone().play(&mv).ok()?;
                Some(describe(pos, &after, &mv))
            })
            .collect()
    }

    /// Plays `mv` in place. Returns `None` and leaves the board unchanged if
    /// the move is illegal.
    pub fn apply(&mut self, mv: &Move) -> Option<MoveInfo> {
        if !self.push(mv) {
            return None;
        }
        self.last_move()
    }

    /// Plays the move given by its squares. A pawn moving to the last rank
    /// without an explicit promotion piece becomes a queen.
    pub fn try_apply_uci(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<Role>,
    ) -> Result<MoveInfo, BoardError> {
        let from_sq: Square = from
            .trim()
            .parse()
            .map_err(|_| BoardError::InvalidSquare(from.to_owned()))?;
        let to_sq: Square = to
            .trim()
            .parse()
            .map_err(|_| BoardError::InvalidSquare(to.to_owned()))?;
        let illegal = || BoardError::IllegalMove {
            from: from_sq.to_string(),
            to: to_sq.to_string(),
        };

        let pos = self.position();
        let promotion = promotion.or_else(|| {
            let is_pawn = pos
                .board()
                .piece_at(from_sq)
                .is_some_and(|piece| piece.role == Role::Pawn);
            let last_rank = matches!(to_sq.rank(), Rank::First | Rank::Eighth);
            (is_pawn && last_rank).then_some(Role::Queen)
        });
        let uci = UciMove::Normal {
            from: from_sq,
            to: to_sq,
            promotion,
        };
        let mv = uci.to_move(pos).map_err(|_| illegal())?;
        self.apply(&mv).ok_or_else(illegal)
    }

    pub fn apply_uci(&mut self, from: &str, to: &str, promotion: Option<Role>) -> Option<MoveInfo> {
        self.try_apply_uci(from, to, promotion).ok()
    }

    /// Parses a UCI move string (`e2e4`, `e7e8q`) against the current position.
    pub fn parse_move(&self, move_str: &str) -> Option<Move> {
        let uci: UciMove = move_str.trim().parse().ok()?;
        let mv = uci.to_move(self.position()).ok()?;
        if self.position().is_legal(&mv) {
            Some(mv)
        } else {
            None
        }
    }

    /// Reverts the most recent move. A no-op returning `None` on an empty
    /// history.
    pub fn undo(&mut self) -> Option<MoveInfo> {
        let info = self.last_move()?;
        self.pop();
        Some(info)
    }

    pub fn last_move(&self) -> Option<MoveInfo> {
        let n = self.moves.len();
        let mv = self.moves.last()?;
        Some(describe(&self.stack[n - 1], &self.stack[n], mv))
    }

    pub fn history(&self) -> Vec<MoveInfo> {
        self.moves
            .iter()
            .enumerate()
            .map(|(i, mv)| describe(&self.stack[i], &self.stack[i + 1], mv))
            .collect()
    }

    pub fn history_san(&self) -> Vec<String> {
        self.history().into_iter().map(|info| info.san).collect()
    }

    /// Number of half-moves played since the starting position.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    pub fn side_to_move(&self) -> Color {
        self.position().turn()
    }

    pub fn in_check(&self) -> bool {
        self.position().is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.position().is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position().is_stalemate()
    }

    /// Stalemate, insufficient material, fifty-move rule or threefold
    /// repetition.
    pub fn is_draw(&self) -> bool {
        let pos = self.position();
        pos.is_stalemate()
            || pos.is_insufficient_material()
            || pos.halfmoves() >= 100
            || self.is_threefold_repetition()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let Some(&key) = self.keys.last() else {
            return false;
        };
        self.keys.iter().filter(|&&k| k == key).count() >= 3
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    fn push(&mut self, mv: &Move) -> bool {
        match self.position().clone().play(mv) {
            Ok(next) => {
                self.keys.push(position_hash(&next));
                self.stack.push(next);
                self.moves.push(mv.clone());
                true
            }
            Err(_) => false,
        }
    }

    fn pop(&mut self) {
        if self.moves.pop().is_some() {
            self.stack.pop();
            self.keys.pop();
        }
    }
}

/// Promotion piece from its UCI letter, `q`, `r`, `b` or `n` in either case.
pub fn parse_promotion(c: char) -> Result<Role, BoardError> {
    match c.to_ascii_lowercase() {
        'q' => Ok(Role::Queen),
        'r' => Ok(Role::Rook),
        'b' => Ok(Role::Bishop),
        'n' => Ok(Role::Knight),
        _ => Err(BoardError::InvalidPromotion(c)),
    }
}

fn fen_of(pos: &Chess) -> String {
    Fen(pos.clone().into_setup(EnPassantMode::Legal)).to_string()
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Board {
    type Move = Move;

    fn moves(&self) -> Vec<Move> {
        self.legal_moves()
    }

    fn is_capture(&self, mv: &Move) -> bool {
        mv.is_capture()
    }

    fn make(&mut self, mv: &Move) -> bool {
        self.push(mv)
    }

    fn unmake(&mut self) {
        self.pop();
    }

    fn is_game_over(&self) -> bool {
        Board::is_game_over(self)
    }

    fn side_to_move(&self) -> Color {
        Board::side_to_move(self)
    }
}
