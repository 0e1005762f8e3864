//! Agent configuration

use serde::{Deserialize, Serialize};

use crate::eval::EvalFn;
use crate::search::Strategy;
use crate::tiebreak::TieBreaker;

/// Baseline for the variable-depth policy: depth grows as the thinner side shrinks
const VARIABLE_DEPTH_BASE: u32 = 12;

/// Unknown names in agent configuration
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("unknown evaluation function: {0}")]
    UnknownEvalFn(String),

    #[error("unknown tie-breaker: {0}")]
    UnknownTieBreaker(String),
}

/// How the search depth is chosen for each decision
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthPolicy {
    /// Always the configured depth
    #[default]
    Fixed,
    /// `max(depth, 12 - min(own pieces, opponent pieces))`
    Variable,
}

impl DepthPolicy {
    pub fn depth_for(&self, configured: u32, own_pieces: usize, opponent_pieces: usize) -> u32 {
        match self {
            DepthPolicy::Fixed => configured,
            DepthPolicy::Variable => {
                let thinnest = own_pieces.min(opponent_pieces) as u32;
                configured.max(VARIABLE_DEPTH_BASE.saturating_sub(thinnest))
            }
        }
    }
}

/// Everything needed to build an agent for either color
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(rename = "agent")]
    pub strategy: Strategy,
    /// Search depth in plies
    pub depth: u32,
    pub eval_fn: EvalFn,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_breaker: Option<TieBreaker>,
    #[serde(default)]
    pub depth_policy: DepthPolicy,
    /// Random seed for reproducibility (None = from entropy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::AlphaBetaJumpsFirst,
            depth: 3,
            eval_fn: EvalFn::PieceCount,
            tie_breaker: None,
            depth_policy: DepthPolicy::Fixed,
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn new(strategy: Strategy, depth: u32) -> Self {
        Self {
            strategy,
            depth,
            ..Default::default()
        }
    }

    /// Config for the no-search baseline
    pub fn random() -> Self {
        Self::new(Strategy::Random, 0)
    }

    pub fn with_eval_fn(mut self, eval_fn: EvalFn) -> Self {
        self.eval_fn = eval_fn;
        self
    }

    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = Some(tie_breaker);
        self
    }

    pub fn with_depth_policy(mut self, depth_policy: DepthPolicy) -> Self {
        self.depth_policy = depth_policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Short label such as `minimax_ab.3.piece2val`
    pub fn label(&self) -> String {
        format!("{}.{}.{}", self.strategy, self.depth, self.eval_fn)
    }
}
