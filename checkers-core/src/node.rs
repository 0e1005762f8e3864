//! Search tree nodes: action enumeration and successor generation

use std::borrow::Cow;

use crate::board::{all_coords, Color, Coord};
use crate::eval::EvalFn;
use crate::game::{Action, GameState};

/// A position in the search tree.
///
/// The root borrows the live state; every successor owns its own copy, so
/// sibling branches never share a board.
#[derive(Clone, Debug)]
pub struct SearchNode<'a> {
    state: Cow<'a, GameState>,
    depth: u32,
    eval_fn: EvalFn,
    restrict_to: Option<Coord>,
}

impl<'a> SearchNode<'a> {
    /// Root node over a borrowed state
    pub fn new(state: &'a GameState, eval_fn: EvalFn) -> Self {
        Self {
            state: Cow::Borrowed(state),
            depth: 0,
            eval_fn,
            restrict_to: None,
        }
    }

    /// Only enumerate moves of the piece on `coord`
    pub fn restricted_to(mut self, coord: Coord) -> Self {
        self.restrict_to = Some(coord);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Plies from the root
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn eval_fn(&self) -> EvalFn {
        self.eval_fn
    }

    pub fn restrict_to(&self) -> Option<Coord> {
        self.restrict_to
    }

    /// Static evaluation of this node's board
    pub fn evaluate(&self, color: Color) -> f32 {
        self.eval_fn.evaluate(&self.state.board, color)
    }

    /// Legal actions for the side to move.
    ///
    /// A pending capture sequence (or an explicit restriction) limits the
    /// enumeration to one origin square. Otherwise every piece of the side to
    /// move contributes all its steps and captures; captures are not
    /// mandatory.
    pub fn next_actions(&self) -> Vec<Action> {
        let state = &*self.state;
        let mid_hop = state.mid_hop();
        let origin = self
            .restrict_to
            .or_else(|| if mid_hop { state.last_hop_to() } else { None });

        if let Some(from) = origin {
            return state
                .board
                .legal_steps(from, mid_hop)
                .into_iter()
                .map(|to| Action::new(from, to))
                .collect();
        }

        let turn = state.turn();
        all_coords()
            .filter(|&c| matches!(state.board.piece_at(c), Some(p) if p.color == turn))
            .flat_map(|from| {
                state
                    .board
                    .legal_steps(from, mid_hop)
                    .into_iter()
                    .map(move |to| Action::new(from, to))
            })
            .collect()
    }

    /// Apply `action` to a state, resolving turn end or continuation
    pub fn apply_action(state: &mut GameState, action: Action) {
        state.apply_action(action);
    }

    /// Successor after `action`, one ply deeper and without any root restriction
    pub fn next_node(&self, action: Action) -> SearchNode<'static> {
        let mut next = GameState::clone(&self.state);
        Self::apply_action(&mut next, action);
        SearchNode {
            state: Cow::Owned(next),
            depth: self.depth + 1,
            eval_fn: self.eval_fn,
            restrict_to: None,
        }
    }
}
