pub mod config;
pub mod error;
pub mod game;
pub mod scripted;
pub mod time_control;
pub mod types;

// Re-export the shared player vocabulary (not engine-specific)
pub use config::*;
pub use error::*;
pub use game::*;
pub use time_control::*;
pub use types::*;

// =============================================================================
// Player trait: implemented by every automated player
// =============================================================================

/// Whether a move selection ran to completion or was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Every root move was scored.
    Completed,
    /// Cancellation arrived first; the result holds the best move found so far.
    Cancelled,
}

/// Result of a move selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    /// The committed move. Always present: cancellation keeps the partial best.
    pub best_move: M,
    /// Score of `best_move` from the player's perspective.
    /// None only if cancellation arrived before any root move was scored.
    pub score: Option<f64>,
    /// Number of root moves that tied for the best score
    pub candidates: usize,
    /// Number of positions visited
    pub nodes: u64,
    pub status: SearchStatus,
}

impl<M> SearchResult<M> {
    pub fn is_cancelled(&self) -> bool {
        self.status == SearchStatus::Cancelled
    }
}

/// Trait that all automated players implement.
///
/// A player is told its color once and is then asked for moves by a
/// controller that owns the game, the clock and the cancellation token.
pub trait Player {
    /// Assign the side this player plays. Must be called before `select_move`.
    fn initialize(&mut self, color: Color);

    /// Choose a move for the controller's current position.
    ///
    /// The chosen move is reported through `Controller::update_move` before
    /// this returns, along with any provisional bests found on the way.
    fn select_move<C: Controller>(
        &mut self,
        controller: &mut C,
        cancel: &CancelToken,
    ) -> Result<SearchResult<<C::Game as Game>::Move>, PlayerError>;

    /// Returns the player's name for logs and reports
    fn name(&self) -> &str;
}
