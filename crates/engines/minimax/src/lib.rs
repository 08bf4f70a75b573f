//! Minimax Player
//!
//! Fixed-depth minimax with alpha-beta pruning over any game exposed through
//! `game_core::Game`, scored by a material and check evaluator.

mod eval;
mod ordering;
mod search;

use std::time::Instant;

use game_core::{
    CancelToken, Color, Controller, Game, Player, PlayerConfig, PlayerError, SearchConfig,
    SearchResult, ThinkingDelay, TimeGovernor,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Player using minimax with alpha-beta pruning.
///
/// This player uses:
/// - Alternating min/max layers scored from its own color
/// - Material evaluation with check bonuses
/// - Seeded random move ordering and tie-breaking
/// - A remaining-time cutoff and a minimum thinking delay
#[derive(Debug, Clone)]
pub struct MinimaxPlayer {
    config: SearchConfig,
    evaluator: Evaluator,
    /// Shared by move ordering and the final tie-break
    rng: StdRng,
    color: Option<Color>,
}

impl Default for MinimaxPlayer {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl MinimaxPlayer {
    /// Creates a player with the default material table.
    pub fn new(config: SearchConfig) -> Self {
        Self::from_config(PlayerConfig::new(config))
    }

    pub fn from_config(config: PlayerConfig) -> Self {
        Self {
            config: config.search,
            evaluator: Evaluator::new(config.figure_values, config.material),
            rng: StdRng::seed_from_u64(config.search.seed()),
            color: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// The side assigned by `initialize`, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

impl Player for MinimaxPlayer {
    fn initialize(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn select_move<C: Controller>(
        &mut self,
        controller: &mut C,
        cancel: &CancelToken,
    ) -> Result<SearchResult<<C::Game as Game>::Move>, PlayerError> {
        let started = Instant::now();
        let color = self.color.ok_or(PlayerError::Uninitialized)?;

        let mut searcher = Searcher::new(
            &self.evaluator,
            &mut self.rng,
            cancel,
            TimeGovernor::new(self.config.time_threshold_ms()),
            color,
        );
        let result = search::pick_best_move(controller, self.config.depth(), &mut searcher)?;

        info!(
            score = ?result.score,
            candidates = result.candidates,
            nodes = result.nodes,
            cancelled = result.is_cancelled(),
            seconds = started.elapsed().as_secs_f64(),
            "selected move"
        );

        ThinkingDelay::from_millis(self.config.delay_ms()).wait_out(started, cancel);
        Ok(result)
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }
}

// Re-export for direct use if needed
pub use eval::{Evaluator, CHECK_VALUE, WIN_VALUE};
pub use ordering::shuffled;
pub use search::{pick_best_move, search_root, Interrupted, RootOutcome, Searcher};
