//! Checkers Tournament - Statistics through repeated play
//!
//! This crate pits two configured agents against each other:
//! - Single games with per-decision search effort recorded
//! - Matches of many independent games, optionally in parallel
//! - JSON-serialisable match summaries
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: play_match (orchestration)
//! - Level 2: execute games, aggregate results (phases)
//! - Level 3: play_game (steps)
//! - Level 4: configuration

mod config;
mod game_runner;
mod match_play;

pub use config::MatchConfig;
pub use game_runner::{play_game, GameRecord};
pub use match_play::{play_match, MatchSummary};
