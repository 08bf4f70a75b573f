use super::*;
use crate::eval::WIN_VALUE;
use game_core::scripted::{
    CountdownClock, FixedClock, Outcome, ScriptedController, ScriptedGame, ScriptedMove,
    TreeBuilder,
};
use game_core::{Piece, PieceKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

const PLENTY_MS: u64 = 60_000;
const NEG_INF: f64 = f64::NEG_INFINITY;
const INF: f64 = f64::INFINITY;

/// Owns what a `Searcher` borrows, so each test only picks a seed.
struct Fixture {
    eval: Evaluator,
    rng: StdRng,
    cancel: CancelToken,
}

impl Fixture {
    fn new(seed: u64) -> Self {
        Self {
            eval: Evaluator::default(),
            rng: StdRng::seed_from_u64(seed),
            cancel: CancelToken::new(),
        }
    }

    fn searcher(&mut self) -> Searcher<'_, StdRng> {
        Searcher::new(
            &self.eval,
            &mut self.rng,
            &self.cancel,
            TimeGovernor::default(),
            Color::White,
        )
    }
}

fn plenty() -> FixedClock {
    FixedClock::new(PLENTY_MS)
}

fn pawns(white: usize, black: usize) -> Vec<Piece> {
    let mut pieces = vec![Piece::new(Color::White, PieceKind::Pawn); white];
    pieces.extend(vec![Piece::new(Color::Black, PieceKind::Pawn); black]);
    pieces
}

/// A min node whose three replies all leave White a pawn down.
fn losing_replies() -> ScriptedGame {
    let mut tree = TreeBuilder::new();
    for label in ["r1", "r2", "r3"] {
        let reply = tree.child(TreeBuilder::ROOT, label);
        tree.pieces(reply, pawns(0, 1));
    }
    tree.build()
}

#[test]
fn test_depth_zero_is_static_evaluation() {
    let game = losing_replies();
    let mut fx = Fixture::new(1);
    let mut searcher = fx.searcher();

    let score = searcher.min(&game, 0, NEG_INF, INF, &plenty());
    assert_eq!(score, Ok(0.0));
    assert_eq!(game.applied_count(), 0);
}

#[test]
fn test_time_pressure_stops_descent_at_any_depth() {
    let game = losing_replies();
    let mut fx = Fixture::new(1);
    let mut searcher = fx.searcher();

    let score = searcher.max(&game, 50, NEG_INF, INF, &FixedClock::new(1_999));
    assert_eq!(score, Ok(0.0));
    assert_eq!(game.applied_count(), 0);
    assert_eq!(searcher.nodes(), 0);

    let score = searcher.min(&game, 50, NEG_INF, INF, &FixedClock::new(2_000));
    assert_eq!(score, Ok(-10.0));
    assert_eq!(game.applied_count(), 3);
}

#[test]
fn test_clock_running_low_mid_search() {
    let mut tree = TreeBuilder::new();
    for i in 0..3 {
        let mv = tree.child(TreeBuilder::ROOT, format!("m{i}"));
        for j in 0..2 {
            tree.child(mv, format!("m{i}/r{j}"));
        }
    }
    let game = tree.build();

    let mut fx = Fixture::new(21);
    let mut searcher = fx.searcher();

    // Root and the first reply node see 2010 and 2000; everything after is under 2000.
    let clock = CountdownClock::new(2_010, 10);
    let score = searcher.max(&game, 2, NEG_INF, INF, &clock);

    assert_eq!(score, Ok(0.0));
    assert_eq!(game.applied_count(), 3 + 2);
}

#[test]
fn test_min_cuts_off_below_alpha() {
    let game = losing_replies();
    let mut fx = Fixture::new(3);
    let mut searcher = fx.searcher();

    let score = searcher.min(&game, 1, 5.0, INF, &plenty());
    assert_eq!(score, Ok(-10.0));
    assert_eq!(game.applied_count(), 1, "siblings after the cutoff are skipped");
}

#[test]
fn test_min_does_not_cut_off_at_equal_alpha() {
    let game = losing_replies();
    let mut fx = Fixture::new(3);
    let mut searcher = fx.searcher();

    let score = searcher.min(&game, 1, -10.0, INF, &plenty());
    assert_eq!(score, Ok(-10.0));
    assert_eq!(game.applied_count(), 3);
}

#[test]
fn test_max_cuts_off_above_beta() {
    let mut tree = TreeBuilder::new();
    for label in ["m1", "m2", "m3", "m4"] {
        let mv = tree.child(TreeBuilder::ROOT, label);
        tree.pieces(mv, pawns(2, 0));
    }
    let game = tree.build();

    let mut fx = Fixture::new(9);
    let mut searcher = fx.searcher();

    let score = searcher.max(&game, 1, NEG_INF, 0.0, &plenty());
    assert_eq!(score, Ok(20.0));
    assert_eq!(game.applied_count(), 1);
}

#[test]
fn test_cancelled_search_unwinds() {
    let game = losing_replies();
    let mut fx = Fixture::new(1);
    fx.cancel.cancel();
    let mut searcher = fx.searcher();

    let score = searcher.min(&game, 3, NEG_INF, INF, &plenty());
    assert_eq!(score, Err(Interrupted));
    assert_eq!(game.applied_count(), 0);
}

#[test]
fn test_search_root_reports_improvements_and_ties() {
    // "win" ends the game in White's favor; "even" and "also_even" are material-neutral.
    let mut tree = TreeBuilder::new();
    let win = tree.child(TreeBuilder::ROOT, "win");
    tree.outcome(win, Outcome::Win(Color::White));
    tree.child(TreeBuilder::ROOT, "even");
    tree.child(TreeBuilder::ROOT, "also_even");
    let game = tree.build();

    let mut fx = Fixture::new(11);
    let mut searcher = fx.searcher();
    let mut controller = ScriptedController::new(game, plenty());

    let outcome = search_root(&mut controller, 2, &mut searcher).unwrap();

    assert_eq!(outcome.best_score, Some(WIN_VALUE));
    assert_eq!(outcome.best_moves.len(), 1);
    assert_eq!(outcome.best_moves[0].label(), "win");
    assert!(!outcome.stopped);
    assert_eq!(outcome.ordered.len(), 3);

    // Every report is a strict improvement, and the last one is the winner.
    assert_eq!(controller.last_reported().map(|m| m.label()), Some("win"));
    assert!(controller.reported().len() <= 2);
}

#[test]
fn test_provisional_reports_follow_search_order() {
    // Root move "p{k}" leaves White k pawns up; "tie" scores the same as "p5".
    let mut tree = TreeBuilder::new();
    for k in 0..6 {
        let mv = tree.child(TreeBuilder::ROOT, format!("p{k}"));
        tree.pieces(mv, pawns(k, 0));
    }
    let tie = tree.child(TreeBuilder::ROOT, "tie");
    tree.pieces(tie, pawns(5, 0));
    let game = tree.build();
    let material = |mv: &ScriptedMove| game.at(mv.target()).pieces().len();

    for seed in 0..20 {
        let mut fx = Fixture::new(seed);
        let mut searcher = fx.searcher();
        let mut controller = ScriptedController::new(game.clone(), plenty());

        let outcome = search_root(&mut controller, 1, &mut searcher).unwrap();
        let reported = controller.reported();

        // Exactly the running maxima of the search order, first arrival wins.
        let mut best: Option<usize> = None;
        let expected: Vec<ScriptedMove> = outcome
            .ordered
            .iter()
            .filter(|mv| {
                let value = material(*mv);
                let improves = best.map_or(true, |b| value > b);
                if improves {
                    best = Some(value);
                }
                improves
            })
            .cloned()
            .collect();
        assert_eq!(reported, expected.as_slice(), "seed {seed}");
        assert_eq!(reported[0], outcome.ordered[0], "seed {seed}");

        let positions: Vec<usize> = reported
            .iter()
            .map(|mv| outcome.ordered.iter().position(|o| o == mv).unwrap())
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "seed {seed}: reports out of search order {positions:?}"
        );

        assert_eq!(outcome.best_score, Some(50.0));
        assert_eq!(outcome.best_moves.len(), 2);
        assert_eq!(controller.last_reported(), Some(&outcome.best_moves[0]));
    }
}

#[test]
fn test_search_root_rejects_empty_move_list() {
    let game = TreeBuilder::new().build();
    let mut fx = Fixture::new(1);
    let mut searcher = fx.searcher();
    let mut controller = ScriptedController::new(game, plenty());

    let err = pick_best_move(&mut controller, 2, &mut searcher).unwrap_err();
    assert_eq!(err, PlayerError::NoLegalMoves);
    assert!(controller.reported().is_empty());
}

#[test]
fn test_pick_best_move_cancelled_before_any_score() {
    let mut tree = TreeBuilder::new();
    for label in ["a", "b", "c"] {
        tree.child(TreeBuilder::ROOT, label);
    }
    let game = tree.build();

    let mut fx = Fixture::new(5);
    fx.cancel.cancel();
    let mut searcher = fx.searcher();
    let mut controller = ScriptedController::new(game.clone(), plenty());

    let result = pick_best_move(&mut controller, 2, &mut searcher).unwrap();

    assert!(result.is_cancelled());
    assert_eq!(result.score, None);
    assert_eq!(result.candidates, 0);
    assert!(game.legal_moves().contains(&result.best_move));
    assert_eq!(controller.reported(), &[result.best_move.clone()]);
}

#[test]
fn test_pick_best_move_keeps_partial_best_on_cancel() {
    let mut tree = TreeBuilder::new();
    for label in ["a", "b", "c", "d"] {
        let mv = tree.child(TreeBuilder::ROOT, label);
        tree.pieces(mv, pawns(1, 0));
    }
    let game = tree.build();

    let mut fx = Fixture::new(5);
    let cancel = fx.cancel.clone();
    let mut searcher = fx.searcher();
    let mut controller = ScriptedController::new(game, plenty()).cancel_on_report(cancel);

    let result = pick_best_move(&mut controller, 2, &mut searcher).unwrap();

    assert!(result.is_cancelled());
    assert_eq!(result.score, Some(10.0));
    assert_eq!(result.candidates, 1);
    // First report is the provisional best, second the final commit of the same move.
    assert_eq!(controller.reported().len(), 2);
    assert_eq!(controller.reported()[0], result.best_move);
    assert_eq!(controller.reported()[1], result.best_move);
}
