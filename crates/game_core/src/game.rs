//! The narrow interface a player uses to talk to the game it is playing.
//!
//! Board representation, move generation and rule enforcement all live behind
//! these traits. A player never mutates a position: every applied move yields
//! a new value.

use std::fmt::Debug;

use crate::types::{Color, Piece};

/// A game position as seen by a player.
pub trait Game: Clone {
    /// Identifies a single legal transition between two positions.
    type Move: Clone + PartialEq + Debug;

    /// All legal moves for the side to move. Non-empty unless the game has ended.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Returns the position reached by playing `mv`, leaving `self` untouched.
    fn apply(&self, mv: &Self::Move) -> Self;

    /// True once the game is decided or drawn.
    fn has_ended(&self) -> bool;

    fn is_draw(&self) -> bool;

    /// True if `color` has won in this position.
    fn is_win(&self, color: Color) -> bool;

    fn is_in_check(&self, color: Color) -> bool;

    /// Every piece currently on the board.
    fn pieces(&self) -> Vec<Piece>;
}

/// Source of the remaining time budget, in milliseconds.
///
/// The budget is decremented by whoever owns the clock, never by the player.
pub trait Clock {
    fn time_left_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn time_left_ms(&self) -> u64 {
        (**self).time_left_ms()
    }
}

/// The game loop side of a move request.
pub trait Controller: Clock {
    type Game: Game;

    /// Current position the player must move from.
    fn game(&self) -> &Self::Game;

    /// Reports a move to the controller. Called with provisional bests while
    /// searching and once more with the final choice.
    fn update_move(&mut self, mv: &<Self::Game as Game>::Move);
}
