//! Material-based position evaluation

use game_core::{Color, FigureValues, Game, MaterialBalance};

/// Score of a decided game, positive for the evaluating side's win.
pub const WIN_VALUE: f64 = 20_000.0;

/// Bonus for the opponent being in check, penalty for being in check.
pub const CHECK_VALUE: f64 = 20.0;

/// Static evaluator scoring positions from one fixed side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluator {
    values: FigureValues,
    balance: MaterialBalance,
}

impl Evaluator {
    pub fn new(values: FigureValues, balance: MaterialBalance) -> Self {
        Self { values, balance }
    }

    pub fn figure_values(&self) -> &FigureValues {
        &self.values
    }

    /// Evaluates `game` for `color`.
    ///
    /// Returns:
    /// - `WIN_VALUE` / `-WIN_VALUE` for a decided game, regardless of material
    /// - 0 for a draw
    /// - otherwise material plus or minus `CHECK_VALUE` for check states
    ///
    /// The caller always passes its own color, never the side to move, so
    /// min and max layers compare scores on the same scale.
    pub fn evaluate<G: Game>(&self, game: &G, color: Color) -> f64 {
        if game.is_win(color) {
            return WIN_VALUE;
        }
        if game.is_win(color.other()) {
            return -WIN_VALUE;
        }
        if game.is_draw() {
            return 0.0;
        }

        let mut score = 0.0;
        if game.is_in_check(color) {
            score -= CHECK_VALUE;
        }
        if game.is_in_check(color.other()) {
            score += CHECK_VALUE;
        }

        for piece in game.pieces() {
            let value = f64::from(self.values.get(piece.kind));
            score += match self.balance {
                MaterialBalance::Signed if piece.color != color => -value,
                _ => value,
            };
        }
        score
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
