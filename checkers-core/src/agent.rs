//! Agents: bind a color and a search configuration to the live game

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::Color;
use crate::config::AgentConfig;
use crate::game::{Action, Game};
use crate::node::SearchNode;
use crate::search::Search;

/// What an agent did with its decision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Action applied to the live game (`None` if the turn was passed)
    pub action: Option<Action>,
    pub nodes_explored: u64,
    /// Depth limit the search ran with
    pub depth: u32,
}

/// A computer player for one color
pub struct Agent {
    color: Color,
    config: AgentConfig,
    rng: ChaCha8Rng,
}

impl Agent {
    pub fn new(color: Color, config: AgentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { color, config, rng }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Search depth for the next decision on `game`
    pub fn search_depth(&self, game: &Game) -> u32 {
        let board = &game.state().board;
        self.config.depth_policy.depth_for(
            self.config.depth,
            board.count(self.color),
            board.count(self.color.opponent()),
        )
    }

    /// Decide and apply one action to the live game.
    ///
    /// During a multi-jump only the jumping piece is considered. If the
    /// search yields nothing to play, the turn is simply ended.
    pub fn make_move(&mut self, game: &mut Game) -> MoveReport {
        let depth = self.search_depth(game);
        if game.state().turn() != self.color {
            tracing::warn!(
                "{} agent asked to move on {}'s turn",
                self.color,
                game.state().turn()
            );
            return MoveReport {
                action: None,
                nodes_explored: 0,
                depth,
            };
        }

        let outcome = {
            let state = game.state();
            let mut root = SearchNode::new(state, self.config.eval_fn);
            if let Some(coord) = state.last_hop_to().filter(|_| state.mid_hop()) {
                root = root.restricted_to(coord);
            }
            Search::new(self.color, depth, &mut self.rng)
                .with_tie_breaker(self.config.tie_breaker)
                .run(self.config.strategy, &root)
        };

        tracing::debug!(
            "{} ({}) depth={} value={} nodes={} action={:?}",
            self.color,
            self.config.label(),
            depth,
            outcome.value,
            outcome.nodes_explored,
            outcome.action
        );

        match outcome.action {
            Some(action) => SearchNode::apply_action(game.state_mut(), action),
            None => game.end_turn(),
        }

        MoveReport {
            action: outcome.action,
            nodes_explored: outcome.nodes_explored,
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Coord, Piece};
    use crate::config::DepthPolicy;
    use crate::game::GameState;
    use crate::search::Strategy;

    #[test]
    fn test_make_move_updates_live_game() {
        let mut game = Game::setup();
        let mut agent = Agent::new(Color::Blue, AgentConfig::new(Strategy::AlphaBeta, 2).with_seed(1));

        let report = agent.make_move(&mut game);
        assert!(report.action.is_some());
        assert!(report.nodes_explored > 0);
        assert_eq!(report.depth, 2);
        assert_eq!(game.state().turn(), Color::Red);
        assert_eq!(game.state().move_count(), 1);
    }

    #[test]
    fn test_out_of_turn_is_ignored() {
        let mut game = Game::setup();
        let mut agent = Agent::new(Color::Red, AgentConfig::random().with_seed(1));
        let report = agent.make_move(&mut game);
        assert_eq!(report.action, None);
        assert_eq!(game.state(), &GameState::new());
    }

    #[test]
    fn test_multi_jump_across_calls() {
        let mut board = Board::empty();
        board.place(Coord::new(0, 0), Piece::new(Color::Red)).unwrap();
        board.place(Coord::new(1, 1), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(3, 3), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(3, 5), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(0, 6), Piece::new(Color::Red)).unwrap();
        let mut game = Game::from_state(GameState::from_board(board, Color::Red));

        let mut agent = Agent::new(
            Color::Red,
            AgentConfig::new(Strategy::AlphaBetaJumpsFirst, 3).with_seed(4),
        );
        let first = agent.make_move(&mut game);
        assert_eq!(first.action, Some(Action::between(0, 0, 2, 2)));
        assert!(game.state().mid_hop());
        assert_eq!(game.state().turn(), Color::Red);

        let second = agent.make_move(&mut game);
        assert_eq!(second.action, Some(Action::between(2, 2, 4, 4)));
        assert_eq!(game.state().turn(), Color::Blue);
        assert_eq!(game.state().board.count(Color::Blue), 1);
    }

    #[test]
    fn test_no_moves_ends_turn() {
        let mut board = Board::empty();
        board.place(Coord::new(7, 7), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(6, 6), Piece::new(Color::Red)).unwrap();
        board.place(Coord::new(5, 5), Piece::new(Color::Red)).unwrap();
        let mut game = Game::from_state(GameState::from_board(board, Color::Blue));

        let mut agent = Agent::new(Color::Blue, AgentConfig::new(Strategy::Minimax, 2).with_seed(2));
        let report = agent.make_move(&mut game);
        assert_eq!(report.action, None);
        assert_eq!(game.state().turn(), Color::Red);
    }

    #[test]
    fn test_random_agent_plays_legal_move() {
        let mut game = Game::setup();
        let legal = SearchNode::new(game.state(), crate::eval::EvalFn::PieceCount).next_actions();
        let mut agent = Agent::new(Color::Blue, AgentConfig::random().with_seed(8));
        let report = agent.make_move(&mut game);
        assert!(legal.contains(&report.action.unwrap()));
        assert_eq!(report.nodes_explored, 0);
    }

    #[test]
    fn test_variable_depth_agent() {
        let mut board = Board::empty();
        board.place(Coord::new(2, 2), Piece::new(Color::Red)).unwrap();
        board.place(Coord::new(5, 5), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(5, 7), Piece::new(Color::Blue)).unwrap();
        let game = Game::from_state(GameState::from_board(board, Color::Red));

        let agent = Agent::new(
            Color::Red,
            AgentConfig::new(Strategy::AlphaBetaJumpsFirst, 2)
                .with_depth_policy(DepthPolicy::Variable)
                .with_seed(3),
        );
        assert_eq!(agent.search_depth(&game), 11);
    }
}
