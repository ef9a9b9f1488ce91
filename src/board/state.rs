//! The narrow contract the search consumes, and the scoped make/unmake guard.

use std::ops::{Deref, DerefMut};

use shakmaty::Color;

/// A game position that can be walked in place with make/unmake.
///
/// `Board` implements this for chess; tests implement it for small
/// synthetic trees.
pub trait GameState {
    type Move: Clone;

    /// All legal moves for the side to move, in generation order.
    fn moves(&self) -> Vec<Self::Move>;

    fn is_capture(&self, mv: &Self::Move) -> bool;

    /// Plays `mv` in place. Returns `false` and leaves the state untouched if
    /// the move is not legal here.
    fn make(&mut self, mv: &Self::Move) -> bool;

    /// Reverts the most recent successful `make`.
    fn unmake(&mut self);

    fn is_game_over(&self) -> bool;

    fn side_to_move(&self) -> Color;

    /// Plays `mv` and returns a guard that unmakes it when dropped.
    fn play(&mut self, mv: &Self::Move) -> Option<Played<'_, Self>>
    where
        Self: Sized,
    {
        if self.make(mv) {
            Some(Played { state: self })
        } else {
            None
        }
    }
}

/// A move that is on the board for as long as the guard lives.
///
/// Dropping the guard unmakes the move exactly once, whichever way the
/// enclosing scope is left.
pub struct Played<'a, S: GameState> {
    state: &'a mut S,
}

impl<S: GameState> Deref for Played<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.state
    }
}

impl<S: GameState> DerefMut for Played<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.state
    }
}

impl<S: GameState> Drop for Played<'_, S> {
    fn drop(&mut self) {
        self.state.unmake();
    }
}
