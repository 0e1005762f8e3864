//! Secondary heuristics for choosing between equally valued actions

use crate::board::{Board, Color};
use crate::eval::{center_of_mass_distance, king_proximity_distance};
use crate::game::Action;
use crate::node::SearchNode;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named tie-break policies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Prefer the action that brings the two armies' centres of mass closer
    CenterOfMass,
    /// Prefer the action that shrinks the gap between own kings and their prey
    KingProximity,
}

impl TieBreaker {
    pub const ALL: [TieBreaker; 2] = [TieBreaker::CenterOfMass, TieBreaker::KingProximity];

    pub fn name(&self) -> &'static str {
        match self {
            TieBreaker::CenterOfMass => "center_of_mass",
            TieBreaker::KingProximity => "king_proximity",
        }
    }

    /// Should `candidate` replace `incumbent` when both search to the same value?
    ///
    /// Both actions are applied to copies of `node`'s state and the resulting
    /// boards are scored from `color`'s side; lower is better. An exact tie on
    /// the secondary score is settled by a coin flip.
    pub fn prefers<R: Rng + ?Sized>(
        &self,
        incumbent: Action,
        candidate: Action,
        node: &SearchNode<'_>,
        color: Color,
        rng: &mut R,
    ) -> bool {
        let incumbent_score = self.score(&node.next_node(incumbent).state().board, color);
        let candidate_score = self.score(&node.next_node(candidate).state().board, color);

        if candidate_score < incumbent_score {
            true
        } else if candidate_score > incumbent_score {
            false
        } else {
            rng.gen_bool(0.5)
        }
    }

    fn score(&self, board: &Board, color: Color) -> f32 {
        match self {
            TieBreaker::CenterOfMass => center_of_mass_distance(board, color).unwrap_or(0.0),
            TieBreaker::KingProximity => king_proximity_distance(board, color),
        }
    }
}

impl fmt::Display for TieBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TieBreaker {
    type Err = crate::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TieBreaker::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| crate::ConfigError::UnknownTieBreaker(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Piece};
    use crate::eval::EvalFn;
    use crate::game::GameState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_center_of_mass_prefers_approach() {
        let mut board = Board::empty();
        board.place(Coord::new(2, 2), Piece::crowned(Color::Red)).unwrap();
        board.place(Coord::new(6, 6), Piece::new(Color::Blue)).unwrap();
        let state = GameState::from_board(board, Color::Red);
        let node = SearchNode::new(&state, EvalFn::PieceCount);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let away = Action::between(2, 2, 1, 1);
        let toward = Action::between(2, 2, 3, 3);
        for _ in 0..10 {
            assert!(TieBreaker::CenterOfMass.prefers(away, toward, &node, Color::Red, &mut rng));
            assert!(!TieBreaker::CenterOfMass.prefers(toward, away, &node, Color::Red, &mut rng));
        }
    }

    #[test]
    fn test_king_proximity_prefers_closing_in() {
        let mut board = Board::empty();
        board.place(Coord::new(4, 4), Piece::crowned(Color::Red)).unwrap();
        board.place(Coord::new(0, 0), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(0, 2), Piece::new(Color::Blue)).unwrap();
        let state = GameState::from_board(board, Color::Red);
        let node = SearchNode::new(&state, EvalFn::PieceCount);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let closer = Action::between(4, 4, 3, 3);
        let further = Action::between(4, 4, 5, 5);
        assert!(TieBreaker::KingProximity.prefers(further, closer, &node, Color::Red, &mut rng));
        assert!(!TieBreaker::KingProximity.prefers(closer, further, &node, Color::Red, &mut rng));
    }

    #[test]
    fn test_exact_tie_flips_coin() {
        let state = GameState::new();
        let node = SearchNode::new(&state, EvalFn::PieceCount);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // No kings on either board: the king heuristic is always tied
        let a = Action::between(5, 1, 4, 0);
        let b = Action::between(5, 1, 4, 2);
        let picks: Vec<bool> = (0..64)
            .map(|_| TieBreaker::KingProximity.prefers(a, b, &node, Color::Blue, &mut rng))
            .collect();
        assert!(picks.iter().any(|&p| p));
        assert!(picks.iter().any(|&p| !p));
    }

    #[test]
    fn test_names_round_trip() {
        for tb in TieBreaker::ALL {
            assert_eq!(tb.name().parse::<TieBreaker>().unwrap(), tb);
        }
        assert!("coin".parse::<TieBreaker>().is_err());
    }
}
