//! Game state: turn tracking, multi-jump continuation and win detection

use crate::board::{all_coords, Board, Color, Coord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single square-to-square relocation (a step, or one hop of a jump)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub from: Coord,
    pub to: Coord,
}

impl Action {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    /// Shorthand for `(from_row, from_col) -> (to_row, to_col)`
    pub const fn between(from_row: i8, from_col: i8, to_row: i8, to_col: i8) -> Self {
        Self::new(Coord::new(from_row, from_col), Coord::new(to_row, to_col))
    }

    /// Euclidean length; jumps (2.83) are longer than steps (1.41)
    pub fn distance(&self) -> f32 {
        self.from.distance_to(self.to)
    }

    pub fn is_jump(&self) -> bool {
        !self.from.is_adjacent(self.to)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Board plus whose turn it is and multi-jump bookkeeping (clone to branch)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    turn: Color,
    /// Current turn is in the middle of a capture sequence
    mid_hop: bool,
    /// Square of the capturing piece while `mid_hop`
    last_hop_to: Option<Coord>,
    move_count: u32,
    game_over: bool,
}

impl GameState {
    /// Opening position, Blue to move
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::Blue)
    }

    /// Arbitrary position; game-over status is evaluated immediately
    pub fn from_board(board: Board, turn: Color) -> Self {
        let mut state = Self {
            board,
            turn,
            mid_hop: false,
            last_hop_to: None,
            move_count: 0,
            game_over: false,
        };
        state.game_over = state.is_game_over();
        state
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn mid_hop(&self) -> bool {
        self.mid_hop
    }

    pub fn last_hop_to(&self) -> Option<Coord> {
        self.last_hop_to
    }

    /// Completed turns (a multi-jump counts once)
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    // ========================================================================
    // TURN HANDLING
    // ========================================================================

    /// Hand the move to the other side and re-check for game over
    pub fn end_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.mid_hop = false;
        self.last_hop_to = None;
        self.move_count += 1;
        self.game_over = self.is_game_over();
    }

    /// True if either side has no legal move (including having no pieces)
    pub fn is_game_over(&self) -> bool {
        !self.has_any_move(Color::Red) || !self.has_any_move(Color::Blue)
    }

    fn has_any_move(&self, color: Color) -> bool {
        all_coords().any(|coord| {
            matches!(self.board.piece_at(coord), Some(p) if p.color == color)
                && !self.board.legal_steps(coord, self.mid_hop).is_empty()
        })
    }

    /// The only side with pieces left, or `None` if both still have some
    pub fn who_won(&self) -> Option<Color> {
        let red = self.board.count(Color::Red);
        let blue = self.board.count(Color::Blue);
        match (red, blue) {
            (0, 0) => None,
            (_, 0) => Some(Color::Red),
            (0, _) => Some(Color::Blue),
            _ => None,
        }
    }

    /// Apply one relocation for the side to move.
    ///
    /// A destination already holding one of the mover's own pieces is a
    /// reselect and simply ends the turn. Any other action that is not a
    /// legal step for the side to move leaves the state untouched. A jump
    /// removes the captured piece and leaves the turn open while the same
    /// piece can keep capturing.
    pub fn apply_action(&mut self, action: Action) {
        if matches!(self.board.piece_at(action.to), Some(p) if p.color == self.turn) {
            self.end_turn();
            return;
        }

        if !self.is_legal(action) {
            tracing::warn!("ignoring illegal action {} for {}", action, self.turn);
            return;
        }

        self.board.move_piece(action.from, action.to);

        if action.is_jump() {
            self.board.remove_piece(action.from.midpoint(action.to));
            if !self.board.legal_steps(action.to, true).is_empty() {
                self.mid_hop = true;
                self.last_hop_to = Some(action.to);
                return;
            }
        }

        self.end_turn();
    }
}

impl GameState {
    /// Mover owns the source, the destination is one of its legal steps, and
    /// a capture in progress is continued by the same piece
    fn is_legal(&self, action: Action) -> bool {
        let owned = matches!(self.board.piece_at(action.from), Some(p) if p.color == self.turn);
        let continues = !self.mid_hop || self.last_hop_to == Some(action.from);
        owned
            && continues
            && self
                .board
                .legal_steps(action.from, self.mid_hop)
                .contains(&action.to)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// LIVE GAME
// ============================================================================

/// The live game that agents mutate in place
#[derive(Clone, Debug, Default)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Fresh game in the opening position
    pub fn setup() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Rendering hook for drivers; the core has nothing to refresh
    pub fn update(&mut self) {}

    pub fn end_turn(&mut self) {
        self.state.end_turn();
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over()
    }

    pub fn winner(&self) -> Option<Color> {
        self.state.who_won()
    }
}

// ============================================================================
// TESTS
// ============================================================================
