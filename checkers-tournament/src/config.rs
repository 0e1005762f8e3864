//! Configuration types for match play
//!
//! Level 4 - Utilities and configuration

use std::path::Path;

use anyhow::Context;
use checkers_core::AgentConfig;
use serde::{Deserialize, Serialize};

/// A match between a Red and a Blue agent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub red: AgentConfig,
    pub blue: AgentConfig,
    /// Number of games to play
    #[serde(default = "default_games")]
    pub games: usize,
    /// Plies before a game is declared a draw
    #[serde(default = "default_max_moves")]
    pub max_moves: u32,
    /// Whether to run games in parallel
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Base seed; game `i` uses `seed + i` (None = 42)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_games() -> usize {
    10
}

fn default_max_moves() -> u32 {
    200
}

fn default_parallel() -> bool {
    true
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            red: AgentConfig::default(),
            blue: AgentConfig::default(),
            games: default_games(),
            max_moves: default_max_moves(),
            parallel: default_parallel(),
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn new(red: AgentConfig, blue: AgentConfig) -> Self {
        Self {
            red,
            blue,
            ..Default::default()
        }
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// File stem such as `competition_(minimax.3.piece2val)_vs_(random.0.piece2val)`
    pub fn name(&self) -> String {
        format!("competition_({})_vs_({})", self.red.label(), self.blue.label())
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read match config: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse match config: {}", path.display()))?;
        Ok(config)
    }
}
