//! Game-tree search: minimax, alpha-beta and a random baseline
//!
//! The searching side is fixed for the whole tree: nodes where it is to move
//! maximise, the others minimise. Depth is measured in plies from the root,
//! and every recursive call compares the node's absolute depth against the
//! same limit, so a multi-jump continuation costs a ply like any other move.

use crate::board::Color;
use crate::eval::WIN_VALUE;
use crate::game::Action;
use crate::node::SearchNode;
use crate::tiebreak::TieBreaker;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// STRATEGY SELECTION
// ============================================================================

/// Decision procedure used by an agent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Exhaustive minimax to the depth limit
    #[serde(rename = "minimax")]
    Minimax,
    /// Alpha-beta in generation order
    #[serde(rename = "minimax_ab")]
    AlphaBeta,
    /// Alpha-beta over a shuffled action list
    #[serde(rename = "minimax_ab_random")]
    AlphaBetaRandomOrder,
    /// Alpha-beta trying captures before simple steps
    #[default]
    #[serde(rename = "minimax_ab_jumps_first")]
    AlphaBetaJumpsFirst,
    /// Uniformly random legal action, no search
    #[serde(rename = "random")]
    Random,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Minimax,
        Strategy::AlphaBeta,
        Strategy::AlphaBetaRandomOrder,
        Strategy::AlphaBetaJumpsFirst,
        Strategy::Random,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "minimax_ab",
            Strategy::AlphaBetaRandomOrder => "minimax_ab_random",
            Strategy::AlphaBetaJumpsFirst => "minimax_ab_jumps_first",
            Strategy::Random => "random",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = crate::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.name() == s)
            .ok_or_else(|| crate::ConfigError::UnknownStrategy(s.to_string()))
    }
}

/// Order in which alpha-beta visits candidate actions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOrdering {
    /// As produced by move generation
    Generated,
    /// Uniformly shuffled
    Shuffled,
    /// Longest (capturing) moves first
    JumpsFirst,
}

/// Value of a searched node, the action that achieves it and the search effort
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOutcome {
    pub value: f32,
    pub action: Option<Action>,
    /// Successor nodes generated and recursed into
    pub nodes_explored: u64,
}

impl SearchOutcome {
    fn leaf(value: f32) -> Self {
        Self {
            value,
            action: None,
            nodes_explored: 0,
        }
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// One decision's worth of search, seen from `perspective`
pub struct Search<'r, R: Rng + ?Sized> {
    perspective: Color,
    depth_limit: u32,
    tie_breaker: Option<TieBreaker>,
    rng: &'r mut R,
}

impl<'r, R: Rng + ?Sized> Search<'r, R> {
    pub fn new(perspective: Color, depth_limit: u32, rng: &'r mut R) -> Self {
        Self {
            perspective,
            depth_limit,
            tie_breaker: None,
            rng,
        }
    }

    /// Settle equal-value branches with a secondary heuristic instead of a coin
    pub fn with_tie_breaker(mut self, tie_breaker: Option<TieBreaker>) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Pick an action for the side to move at `root`
    pub fn run(&mut self, strategy: Strategy, root: &SearchNode<'_>) -> SearchOutcome {
        let (alpha, beta) = (f32::NEG_INFINITY, f32::INFINITY);
        match strategy {
            Strategy::Minimax => self.minimax(root),
            Strategy::AlphaBeta => self.alpha_beta(root, alpha, beta, MoveOrdering::Generated),
            Strategy::AlphaBetaRandomOrder => {
                self.alpha_beta(root, alpha, beta, MoveOrdering::Shuffled)
            }
            Strategy::AlphaBetaJumpsFirst => {
                self.alpha_beta(root, alpha, beta, MoveOrdering::JumpsFirst)
            }
            Strategy::Random => self.random(root),
        }
    }

    /// Plain minimax
    pub fn minimax(&mut self, node: &SearchNode<'_>) -> SearchOutcome {
        if let Some(leaf) = self.leaf(node) {
            return leaf;
        }

        let maximizing = node.state().turn() == self.perspective;
        let mut best_value = initial_bound(maximizing);
        let mut best_action = None;
        let mut nodes_explored = 0;

        for action in node.next_actions() {
            let child = node.next_node(action);
            nodes_explored += 1;
            let outcome = self.minimax(&child);
            nodes_explored += outcome.nodes_explored;

            if self.replaces(maximizing, outcome.value, best_value, best_action, action, node) {
                best_value = outcome.value;
                best_action = Some(action);
            }
        }

        finish(best_value, best_action, nodes_explored)
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// A maximising node stops as soon as its best value exceeds `beta`, a
    /// minimising node as soon as its best value drops below `alpha`.
    pub fn alpha_beta(
        &mut self,
        node: &SearchNode<'_>,
        mut alpha: f32,
        mut beta: f32,
        ordering: MoveOrdering,
    ) -> SearchOutcome {
        if let Some(leaf) = self.leaf(node) {
            return leaf;
        }

        let maximizing = node.state().turn() == self.perspective;
        let mut actions = node.next_actions();
        self.order(&mut actions, ordering);

        let mut best_value = initial_bound(maximizing);
        let mut best_action = None;
        let mut nodes_explored = 0;

        for action in actions {
            let child = node.next_node(action);
            nodes_explored += 1;
            let outcome = self.alpha_beta(&child, alpha, beta, ordering);
            nodes_explored += outcome.nodes_explored;

            if !self.replaces(maximizing, outcome.value, best_value, best_action, action, node) {
                continue;
            }
            best_value = outcome.value;
            best_action = Some(action);

            if maximizing {
                if best_value > beta {
                    return finish(best_value, best_action, nodes_explored);
                }
                alpha = alpha.max(best_value);
            } else {
                if best_value < alpha {
                    return finish(best_value, best_action, nodes_explored);
                }
                beta = beta.min(best_value);
            }
        }

        finish(best_value, best_action, nodes_explored)
    }

    /// Uniform choice among the legal actions
    pub fn random(&mut self, node: &SearchNode<'_>) -> SearchOutcome {
        let action = node.next_actions().choose(&mut *self.rng).copied();
        SearchOutcome {
            value: 0.0,
            action,
            nodes_explored: 0,
        }
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    /// Terminal and depth-cutoff values
    fn leaf(&self, node: &SearchNode<'_>) -> Option<SearchOutcome> {
        let state = node.state();
        if state.game_over() {
            let value = if state.who_won() == Some(self.perspective) {
                WIN_VALUE
            } else {
                -WIN_VALUE
            };
            return Some(SearchOutcome::leaf(value));
        }
        if node.depth() >= self.depth_limit {
            return Some(SearchOutcome::leaf(node.evaluate(self.perspective)));
        }
        None
    }

    /// Does `candidate` (worth `value`) displace the incumbent?
    fn replaces(
        &mut self,
        maximizing: bool,
        value: f32,
        best_value: f32,
        incumbent: Option<Action>,
        candidate: Action,
        node: &SearchNode<'_>,
    ) -> bool {
        let improves = if maximizing {
            value > best_value
        } else {
            value < best_value
        };
        if improves {
            return true;
        }

        match incumbent {
            Some(incumbent) if value == best_value => match self.tie_breaker {
                Some(tb) => tb.prefers(incumbent, candidate, node, self.perspective, &mut *self.rng),
                None => self.rng.gen_bool(0.5),
            },
            _ => false,
        }
    }

    fn order(&mut self, actions: &mut [Action], ordering: MoveOrdering) {
        match ordering {
            MoveOrdering::Generated => {}
            MoveOrdering::Shuffled => actions.shuffle(&mut *self.rng),
            MoveOrdering::JumpsFirst => {
                actions.sort_by(|a, b| b.distance().total_cmp(&a.distance()))
            }
        }
    }
}

fn initial_bound(maximizing: bool) -> f32 {
    if maximizing {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    }
}

/// A node without any action is worth 0
fn finish(best_value: f32, best_action: Option<Action>, nodes_explored: u64) -> SearchOutcome {
    match best_action {
        Some(_) => SearchOutcome {
            value: best_value,
            action: best_action,
            nodes_explored,
        },
        None => SearchOutcome {
            value: 0.0,
            action: None,
            nodes_explored,
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Coord, Piece};
    use crate::eval::EvalFn;
    use crate::game::GameState;
    use rand_chacha::ChaCha8Rng;

    /// Play `plies` random actions from the opening
    fn random_position(seed: u64, plies: usize) -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = GameState::new();
        for _ in 0..plies {
            if state.game_over() {
                break;
            }
            let actions = SearchNode::new(&state, EvalFn::PieceCount).next_actions();
            match actions.choose(&mut rng) {
                Some(&action) => state.apply_action(action),
                None => break,
            }
        }
        state
    }

    fn capture_position() -> GameState {
        let mut board = Board::empty();
        board.place(Coord::new(2, 2), Piece::new(Color::Red)).unwrap();
        board.place(Coord::new(3, 3), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(6, 6), Piece::new(Color::Blue)).unwrap();
        GameState::from_board(board, Color::Red)
    }

    #[test]
    fn test_finished_game_returns_sentinel() {
        // Blue's last man is wedged in the corner: no moves, game over
        let mut board = Board::empty();
        board.place(Coord::new(7, 7), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(6, 6), Piece::new(Color::Red)).unwrap();
        board.place(Coord::new(5, 5), Piece::new(Color::Red)).unwrap();
        let state = GameState::from_board(board, Color::Blue);
        assert!(state.game_over());

        let node = SearchNode::new(&state, EvalFn::PieceCount);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for strategy in [Strategy::Minimax, Strategy::AlphaBetaJumpsFirst] {
            let outcome = Search::new(Color::Red, 4, &mut rng).run(strategy, &node);
            assert_eq!(outcome.value, -WIN_VALUE);
            assert_eq!(outcome.action, None);
            assert_eq!(outcome.nodes_explored, 0);
        }
    }

    #[test]
    fn test_won_game_favors_winner() {
        let mut board = Board::empty();
        board.place(Coord::new(3, 3), Piece::new(Color::Red)).unwrap();
        let state = GameState::from_board(board, Color::Blue);
        let node = SearchNode::new(&state, EvalFn::PieceCount);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let red = Search::new(Color::Red, 3, &mut rng).minimax(&node);
        assert_eq!(red.value, WIN_VALUE);
        let blue = Search::new(Color::Blue, 3, &mut rng).minimax(&node);
        assert_eq!(blue.value, -WIN_VALUE);
        assert_eq!(blue.action, None);
    }

    #[test]
    fn test_depth_cutoff_is_static_evaluation() {
        let state = capture_position();
        let node = SearchNode::new(&state, EvalFn::PieceCount);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = Search::new(Color::Red, 0, &mut rng).minimax(&node);
        assert_eq!(outcome.value, -1.0);
        assert_eq!(outcome.action, None);
    }

    #[test]
    fn test_no_actions_is_worth_zero() {
        let state = GameState::new();
        let node = SearchNode::new(&state, EvalFn::PieceCount).restricted_to(Coord::new(3, 3));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = Search::new(Color::Blue, 2, &mut rng).run(Strategy::AlphaBeta, &node);
        assert_eq!(outcome.value, 0.0);
        assert_eq!(outcome.action, None);
    }

    #[test]
    fn test_takes_free_capture() {
        let state = capture_position();
        let node = SearchNode::new(&state, EvalFn::PieceCount);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for strategy in [
            Strategy::Minimax,
            Strategy::AlphaBeta,
            Strategy::AlphaBetaRandomOrder,
            Strategy::AlphaBetaJumpsFirst,
        ] {
            let outcome = Search::new(Color::Red, 1, &mut rng).run(strategy, &node);
            assert_eq!(outcome.action, Some(Action::between(2, 2, 4, 4)), "{}", strategy);
            assert_eq!(outcome.value, 0.0);
        }
    }

    #[test]
    fn test_node_counts_from_opening() {
        let state = GameState::new();
        let node = SearchNode::new(&state, EvalFn::PieceCount);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let one = Search::new(Color::Blue, 1, &mut rng).minimax(&node);
        assert_eq!(one.nodes_explored, 7);
        let two = Search::new(Color::Blue, 2, &mut rng).minimax(&node);
        assert_eq!(two.nodes_explored, 7 + 7 * 7);
        assert!(two.action.is_some());
    }

    #[test]
    fn test_alpha_beta_matches_minimax_value() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for seed in 0..16 {
            let state = random_position(seed, 6 + (seed as usize % 10));
            if state.game_over() {
                continue;
            }
            let perspective = state.turn();
            let node = SearchNode::new(&state, EvalFn::PieceCount);
            let reference = Search::new(perspective, 3, &mut rng).minimax(&node);

            for strategy in [
                Strategy::AlphaBeta,
                Strategy::AlphaBetaRandomOrder,
                Strategy::AlphaBetaJumpsFirst,
            ] {
                let outcome = Search::new(perspective, 3, &mut rng).run(strategy, &node);
                assert_eq!(outcome.value, reference.value, "seed {} {}", seed, strategy);
                assert!(outcome.nodes_explored <= reference.nodes_explored);
            }

            let tie_broken = Search::new(perspective, 3, &mut rng)
                .with_tie_breaker(Some(TieBreaker::CenterOfMass))
                .run(Strategy::AlphaBetaJumpsFirst, &node);
            assert_eq!(tie_broken.value, reference.value, "seed {} tie-broken", seed);
        }
    }

    #[test]
    fn test_jumps_first_ordering() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut search = Search::new(Color::Red, 1, &mut rng);
        let mut actions = vec![
            Action::between(2, 2, 3, 1),
            Action::between(2, 2, 4, 4),
            Action::between(0, 6, 1, 7),
        ];
        search.order(&mut actions, MoveOrdering::JumpsFirst);
        assert_eq!(actions[0], Action::between(2, 2, 4, 4));
    }

    #[test]
    fn test_random_picks_legal_action() {
        let state = GameState::new();
        let node = SearchNode::new(&state, EvalFn::PieceCount);
        let legal = node.next_actions();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..20 {
            let outcome = Search::new(Color::Blue, 3, &mut rng).run(Strategy::Random, &node);
            assert!(legal.contains(&outcome.action.unwrap()));
            assert_eq!(outcome.nodes_explored, 0);
        }
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert!("negamax".parse::<Strategy>().is_err());
    }
}
