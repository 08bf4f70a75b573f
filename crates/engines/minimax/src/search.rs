//! Minimax search with alpha-beta pruning

use game_core::{
    CancelToken, Clock, Color, Controller, Game, PlayerError, SearchResult, SearchStatus,
    TimeGovernor,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::eval::Evaluator;
use crate::ordering::shuffled;

/// Search was abandoned because the cancel token was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

/// Per-move search state: everything `min` and `max` share while recursing.
///
/// Holds the player's generator by mutable borrow so that move ordering and
/// the final tie-break draw from one stream.
pub struct Searcher<'a, R: Rng + ?Sized> {
    evaluator: &'a Evaluator,
    rng: &'a mut R,
    cancel: &'a CancelToken,
    governor: TimeGovernor,
    color: Color,
    nodes: u64,
}

impl<'a, R: Rng + ?Sized> Searcher<'a, R> {
    pub fn new(
        evaluator: &'a Evaluator,
        rng: &'a mut R,
        cancel: &'a CancelToken,
        governor: TimeGovernor,
        color: Color,
    ) -> Self {
        Self {
            evaluator,
            rng,
            cancel,
            governor,
            color,
            nodes: 0,
        }
    }

    /// Positions visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Depth exhausted, game over and time pressure all stop the descent the
    /// same way.
    fn is_frontier<G: Game, K: Clock + ?Sized>(&self, game: &G, depth: u32, clock: &K) -> bool {
        depth == 0 || game.has_ended() || self.governor.under_pressure(clock)
    }

    /// Opponent to move: returns the lowest score the opponent can force.
    ///
    /// Stops early once the running minimum drops below `alpha`, since the
    /// maximizer above already has something better.
    pub fn min<G: Game, K: Clock + ?Sized>(
        &mut self,
        game: &G,
        depth: u32,
        alpha: f64,
        mut beta: f64,
        clock: &K,
    ) -> Result<f64, Interrupted> {
        if self.is_frontier(game, depth, clock) {
            return Ok(self.evaluator.evaluate(game, self.color));
        }

        let moves = shuffled(game.legal_moves(), &mut *self.rng);
        let mut min_score = f64::INFINITY;

        for mv in &moves {
            if self.cancel.is_cancelled() {
                return Err(Interrupted);
            }

            let child = game.apply(mv);
            self.nodes += 1;
            let score = self.max(&child, depth - 1, alpha, beta, clock)?;

            if score < min_score {
                min_score = score;
            }
            if min_score < alpha {
                return Ok(min_score);
            }
            beta = beta.min(min_score);
        }

        Ok(min_score)
    }

    /// Own side to move: returns the highest score reachable.
    pub fn max<G: Game, K: Clock + ?Sized>(
        &mut self,
        game: &G,
        depth: u32,
        mut alpha: f64,
        beta: f64,
        clock: &K,
    ) -> Result<f64, Interrupted> {
        if self.is_frontier(game, depth, clock) {
            return Ok(self.evaluator.evaluate(game, self.color));
        }

        let moves = shuffled(game.legal_moves(), &mut *self.rng);
        let mut max_score = f64::NEG_INFINITY;

        for mv in &moves {
            if self.cancel.is_cancelled() {
                return Err(Interrupted);
            }

            let child = game.apply(mv);
            self.nodes += 1;
            let score = self.min(&child, depth - 1, alpha, beta, clock)?;

            if score > max_score {
                max_score = score;
            }
            if max_score > beta {
                return Ok(max_score);
            }
            alpha = alpha.max(max_score);
        }

        Ok(max_score)
    }
}

/// Scores of the root moves, before the tie-break.
#[derive(Debug, Clone, PartialEq)]
pub struct RootOutcome<M> {
    /// Root moves in the order they were searched
    pub ordered: Vec<M>,
    /// Moves sharing the best score, in search order
    pub best_moves: Vec<M>,
    /// Best score seen (None if no root move finished before cancellation)
    pub best_score: Option<f64>,
    /// True if cancellation cut the root loop short
    pub stopped: bool,
}

/// Searches every root move of the controller's position to `depth` plies
/// of opponent replies and collects the best-scoring ones.
///
/// Each strict improvement is reported to the controller as a provisional
/// best, in search order.
pub fn search_root<C, R>(
    controller: &mut C,
    depth: u32,
    searcher: &mut Searcher<'_, R>,
) -> Result<RootOutcome<<C::Game as Game>::Move>, PlayerError>
where
    C: Controller,
    R: Rng + ?Sized,
{
    let root = controller.game().clone();
    let moves = root.legal_moves();
    if moves.is_empty() {
        return Err(PlayerError::NoLegalMoves);
    }

    debug!(
        moves = moves.len(),
        depth,
        time_left_ms = controller.time_left_ms(),
        "searching root moves"
    );

    let ordered = shuffled(moves, &mut *searcher.rng);

    let mut alpha = f64::NEG_INFINITY;
    let mut best_score = f64::NEG_INFINITY;
    let mut best_moves = Vec::new();
    let mut stopped = false;

    for mv in &ordered {
        if searcher.cancel.is_cancelled() {
            stopped = true;
            break;
        }

        let child = root.apply(mv);
        searcher.nodes += 1;

        let score = match searcher.min(&child, depth, alpha, f64::INFINITY, &*controller) {
            Ok(score) => score,
            Err(Interrupted) => {
                stopped = true;
                break;
            }
        };

        if score > best_score {
            best_score = score;
            best_moves.clear();
            best_moves.push(mv.clone());
            alpha = alpha.max(best_score);
            trace!(?mv, score, "new best root move");
            controller.update_move(mv);
        } else if score == best_score {
            best_moves.push(mv.clone());
        }
    }

    Ok(RootOutcome {
        best_score: (!best_moves.is_empty()).then_some(best_score),
        ordered,
        best_moves,
        stopped,
    })
}

/// Runs the root search, breaks ties at random and commits the chosen move.
///
/// If cancellation arrives before any root move is scored, the first move of
/// the search order is committed unscored so a move is always returned.
pub fn pick_best_move<C, R>(
    controller: &mut C,
    depth: u32,
    searcher: &mut Searcher<'_, R>,
) -> Result<SearchResult<<C::Game as Game>::Move>, PlayerError>
where
    C: Controller,
    R: Rng + ?Sized,
{
    let outcome = search_root(controller, depth, searcher)?;

    let best_move = match outcome.best_moves.choose(&mut *searcher.rng) {
        Some(mv) => mv.clone(),
        None => outcome
            .ordered
            .first()
            .cloned()
            .ok_or(PlayerError::NoLegalMoves)?,
    };
    controller.update_move(&best_move);

    Ok(SearchResult {
        best_move,
        score: outcome.best_score,
        candidates: outcome.best_moves.len(),
        nodes: searcher.nodes,
        status: if outcome.stopped {
            SearchStatus::Cancelled
        } else {
            SearchStatus::Completed
        },
    })
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
