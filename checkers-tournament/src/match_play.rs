//! Match play - many independent games between two agents
//!
//! Level 1/2 - Orchestration and phases

use checkers_core::AgentConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::game_runner::{play_game, GameRecord};

/// Aggregated statistics of a match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub red: AgentConfig,
    pub blue: AgentConfig,
    pub games: usize,
    pub red_wins: u32,
    pub blue_wins: u32,
    pub draws: u32,
    /// Average number of decisions per game
    pub avg_moves: f32,
    /// Entry `i`: mean nodes Red explored at its i-th decision, over games that got that far
    pub avg_red_explored_nodes: Vec<f32>,
    /// Entry `i`: mean nodes Blue explored at its i-th decision, over games that got that far
    pub avg_blue_explored_nodes: Vec<f32>,
}

impl MatchSummary {
    pub fn red_win_rate(&self) -> f32 {
        rate(self.red_wins, self.games)
    }

    pub fn blue_win_rate(&self) -> f32 {
        rate(self.blue_wins, self.games)
    }

    pub fn draw_rate(&self) -> f32 {
        rate(self.draws, self.games)
    }
}

fn rate(count: u32, games: usize) -> f32 {
    if games == 0 {
        0.0
    } else {
        count as f32 / games as f32
    }
}

/// Play a full match (Level 1 orchestration)
pub fn play_match(config: &MatchConfig) -> MatchSummary {
    tracing::info!(
        "Match {} vs {}: {} games (parallel={})",
        config.red.label(),
        config.blue.label(),
        config.games,
        config.parallel
    );

    let records = if config.parallel {
        execute_games_parallel(config)
    } else {
        execute_games(config)
    };
    let summary = aggregate_records(config, &records);

    tracing::info!(
        "Match finished: red {} / blue {} / draws {}",
        summary.red_wins,
        summary.blue_wins,
        summary.draws
    );
    summary
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

fn base_seed(config: &MatchConfig) -> u64 {
    config.seed.unwrap_or(42)
}

/// Execute games sequentially
fn execute_games(config: &MatchConfig) -> Vec<GameRecord> {
    let base_seed = base_seed(config);
    (0..config.games)
        .map(|game_index| play_indexed_game(config, base_seed, game_index))
        .collect()
}

/// Execute games in parallel using rayon
fn execute_games_parallel(config: &MatchConfig) -> Vec<GameRecord> {
    let base_seed = base_seed(config);
    (0..config.games)
        .into_par_iter()
        .map(|game_index| play_indexed_game(config, base_seed, game_index))
        .collect()
}

fn play_indexed_game(config: &MatchConfig, base_seed: u64, game_index: usize) -> GameRecord {
    let seed = base_seed.wrapping_add(game_index as u64);
    let record = play_game(&config.red, &config.blue, config.max_moves, seed);
    tracing::info!(
        "Game {} done: {} moves, winner {}",
        game_index + 1,
        record.moves,
        record.winner.map_or("none".to_string(), |c| c.to_string())
    );
    record
}

/// Fold game records into a summary
fn aggregate_records(config: &MatchConfig, records: &[GameRecord]) -> MatchSummary {
    let red_wins = records.iter().filter(|r| r.red_wins()).count() as u32;
    let blue_wins = records.iter().filter(|r| r.blue_wins()).count() as u32;
    let draws = records.iter().filter(|r| r.is_draw()).count() as u32;
    let avg_moves = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.moves as f32).sum::<f32>() / records.len() as f32
    };

    MatchSummary {
        red: config.red.clone(),
        blue: config.blue.clone(),
        games: records.len(),
        red_wins,
        blue_wins,
        draws,
        avg_moves,
        avg_red_explored_nodes: average_by_index(records.iter().map(|r| r.red_nodes.as_slice())),
        avg_blue_explored_nodes: average_by_index(records.iter().map(|r| r.blue_nodes.as_slice())),
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Column-wise mean of ragged rows; column `i` averages only rows long enough to have it
fn average_by_index<'a>(rows: impl Iterator<Item = &'a [u64]>) -> Vec<f32> {
    let mut sums: Vec<u64> = Vec::new();
    let mut counts: Vec<u32> = Vec::new();
    for row in rows {
        if row.len() > sums.len() {
            sums.resize(row.len(), 0);
            counts.resize(row.len(), 0);
        }
        for (i, &nodes) in row.iter().enumerate() {
            sums[i] += nodes;
            counts[i] += 1;
        }
    }
    sums.iter()
        .zip(&counts)
        .map(|(&sum, &count)| sum as f32 / count as f32)
        .collect()
}
