//! Explicit game trees for driving players without a real rules engine.
//!
//! A scripted game is a tree built node by node: every node carries the
//! pieces on the board, optional check flags and an optional decided outcome.
//! Moves are labelled edges to child nodes. Nodes without children count as
//! ended, so the tree's leaves are always valid frontier positions.

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::game::{Clock, Controller, Game};
use crate::time_control::CancelToken;
use crate::types::{Color, Piece};

pub type NodeId = usize;

/// Decided result attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Color),
    Draw,
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: Vec<ScriptedMove>,
    pieces: Vec<Piece>,
    outcome: Option<Outcome>,
    in_check: [bool; 2],
}

/// A labelled edge from one scripted node to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedMove {
    label: String,
    target: NodeId,
}

impl ScriptedMove {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> NodeId {
        self.target
    }
}

/// Builds a scripted tree starting from a single root node.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Adds a child reached from `parent` by the move `label`.
    pub fn child(&mut self, parent: NodeId, label: impl Into<String>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::default());
        self.nodes[parent].children.push(ScriptedMove {
            label: label.into(),
            target: id,
        });
        id
    }

    pub fn pieces(&mut self, node: NodeId, pieces: impl IntoIterator<Item = Piece>) -> &mut Self {
        self.nodes[node].pieces = pieces.into_iter().collect();
        self
    }

    pub fn outcome(&mut self, node: NodeId, outcome: Outcome) -> &mut Self {
        self.nodes[node].outcome = Some(outcome);
        self
    }

    pub fn check(&mut self, node: NodeId, color: Color) -> &mut Self {
        self.nodes[node].in_check[color.idx()] = true;
        self
    }

    /// Finishes the tree, positioned at the root.
    pub fn build(self) -> ScriptedGame {
        ScriptedGame {
            nodes: Arc::new(self.nodes),
            node: Self::ROOT,
            applied: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// A position inside a scripted tree.
///
/// Clones share the tree and the counter of applied moves, which tests use to
/// observe how much of the tree a search actually visited.
#[derive(Debug, Clone)]
pub struct ScriptedGame {
    nodes: Arc<Vec<Node>>,
    node: NodeId,
    applied: Arc<AtomicUsize>,
}

impl ScriptedGame {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Number of `apply` calls made on this tree so far, across all clones.
    pub fn applied_count(&self) -> usize {
        self.applied.load(Ordering::Relaxed)
    }

    /// The same tree repositioned at `node`.
    pub fn at(&self, node: NodeId) -> Self {
        Self {
            node,
            ..self.clone()
        }
    }

    fn current(&self) -> &Node {
        &self.nodes[self.node]
    }
}

impl Game for ScriptedGame {
    type Move = ScriptedMove;

    fn legal_moves(&self) -> Vec<ScriptedMove> {
        self.current().children.clone()
    }

    fn apply(&self, mv: &ScriptedMove) -> Self {
        debug_assert!(
            self.current().children.contains(mv),
            "move {:?} is not legal at node {}",
            mv,
            self.node
        );
        self.applied.fetch_add(1, Ordering::Relaxed);
        self.at(mv.target)
    }

    fn has_ended(&self) -> bool {
        let node = self.current();
        node.outcome.is_some() || node.children.is_empty()
    }

    fn is_draw(&self) -> bool {
        self.current().outcome == Some(Outcome::Draw)
    }

    fn is_win(&self, color: Color) -> bool {
        self.current().outcome == Some(Outcome::Win(color))
    }

    fn is_in_check(&self, color: Color) -> bool {
        self.current().in_check[color.idx()]
    }

    fn pieces(&self) -> Vec<Piece> {
        self.current().pieces.clone()
    }
}

/// A clock that always reports the same remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(u64);

impl FixedClock {
    pub fn new(time_left_ms: u64) -> Self {
        Self(time_left_ms)
    }
}

impl Clock for FixedClock {
    fn time_left_ms(&self) -> u64 {
        self.0
    }
}

/// A clock that loses `step_ms` every time it is read.
#[derive(Debug)]
pub struct CountdownClock {
    left: Cell<u64>,
    step_ms: u64,
}

impl CountdownClock {
    pub fn new(start_ms: u64, step_ms: u64) -> Self {
        Self {
            left: Cell::new(start_ms),
            step_ms,
        }
    }
}

impl Clock for CountdownClock {
    fn time_left_ms(&self) -> u64 {
        let left = self.left.get();
        self.left.set(left.saturating_sub(self.step_ms));
        left
    }
}

/// Controller over any game that records every move reported to it.
#[derive(Debug)]
pub struct ScriptedController<G: Game, K: Clock> {
    game: G,
    clock: K,
    reported: Vec<G::Move>,
    cancel_on_report: Option<CancelToken>,
}

impl<G: Game, K: Clock> ScriptedController<G, K> {
    pub fn new(game: G, clock: K) -> Self {
        Self {
            game,
            clock,
            reported: Vec::new(),
            cancel_on_report: None,
        }
    }

    /// Raise `token` as soon as the first move is reported.
    pub fn cancel_on_report(mut self, token: CancelToken) -> Self {
        self.cancel_on_report = Some(token);
        self
    }

    /// Every move reported so far, in order.
    pub fn reported(&self) -> &[G::Move] {
        &self.reported
    }

    pub fn last_reported(&self) -> Option<&G::Move> {
        self.reported.last()
    }
}

impl<G: Game, K: Clock> Clock for ScriptedController<G, K> {
    fn time_left_ms(&self) -> u64 {
        self.clock.time_left_ms()
    }
}

impl<G: Game, K: Clock> Controller for ScriptedController<G, K> {
    type Game = G;

    fn game(&self) -> &G {
        &self.game
    }

    fn update_move(&mut self, mv: &G::Move) {
        self.reported.push(mv.clone());
        if let Some(token) = &self.cancel_on_report {
            token.cancel();
        }
    }
}

#[cfg(test)]
#[path = "scripted_tests.rs"]
mod scripted_tests;
