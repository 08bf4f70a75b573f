//! Randomized move ordering

use rand::seq::SliceRandom;
use rand::Rng;

/// Returns `moves` in a uniformly random order drawn from `rng`.
///
/// Callers pass the player's single generator so that, for a fixed seed, the
/// orderings depend only on the sequence of move lists seen.
pub fn shuffled<M, R: Rng + ?Sized>(mut moves: Vec<M>, rng: &mut R) -> Vec<M> {
    moves.shuffle(rng);
    moves
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
