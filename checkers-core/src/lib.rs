//! Checkers Core - Game model and game-tree search
//!
//! This crate provides the core of the checkers engine:
//! - Board geometry, pieces and per-piece move generation
//! - Game state with multi-jump continuation and win detection
//! - Search nodes that enumerate actions and produce isolated successors
//! - Named evaluation functions and tie-breakers
//! - Minimax, alpha-beta (three move orderings) and a random baseline
//! - Agents that apply search decisions to the live game

pub mod board;
pub mod game;
pub mod node;
pub mod eval;
pub mod tiebreak;
pub mod search;
pub mod config;
pub mod agent;

// Re-exports for convenient access
pub use board::{Board, BoardError, Color, Coord, Piece, BOARD_SIZE};
pub use game::{Action, Game, GameState};
pub use node::SearchNode;
pub use eval::{EvalFn, WIN_VALUE};
pub use tiebreak::TieBreaker;
pub use search::{MoveOrdering, Search, SearchOutcome, Strategy};
pub use config::{AgentConfig, ConfigError, DepthPolicy};
pub use agent::{Agent, MoveReport};
