//! Per-side agent flags shared by `play` and `match`

use checkers_core::{AgentConfig, DepthPolicy, EvalFn, Strategy, TieBreaker};
use clap::Args;

/// Flags override whatever the base configuration says
#[derive(Args, Clone, Debug, Default)]
pub struct AgentArgs {
    /// Red strategy (minimax, minimax_ab, minimax_ab_random, minimax_ab_jumps_first, random)
    #[arg(long)]
    pub red_agent: Option<Strategy>,

    /// Red search depth
    #[arg(long)]
    pub red_depth: Option<u32>,

    /// Red evaluation function (e.g. piece2val, piece2val_keep_back_row)
    #[arg(long)]
    pub red_eval: Option<EvalFn>,

    /// Red tie-breaker (center_of_mass, king_proximity)
    #[arg(long)]
    pub red_tie_breaker: Option<TieBreaker>,

    /// Deepen Red's search as pieces come off the board
    #[arg(long)]
    pub red_variable_depth: bool,

    /// Blue strategy
    #[arg(long)]
    pub blue_agent: Option<Strategy>,

    /// Blue search depth
    #[arg(long)]
    pub blue_depth: Option<u32>,

    /// Blue evaluation function
    #[arg(long)]
    pub blue_eval: Option<EvalFn>,

    /// Blue tie-breaker
    #[arg(long)]
    pub blue_tie_breaker: Option<TieBreaker>,

    /// Deepen Blue's search as pieces come off the board
    #[arg(long)]
    pub blue_variable_depth: bool,
}

impl AgentArgs {
    pub fn apply_red(&self, config: AgentConfig) -> AgentConfig {
        apply(
            config,
            self.red_agent,
            self.red_depth,
            self.red_eval,
            self.red_tie_breaker,
            self.red_variable_depth,
        )
    }

    pub fn apply_blue(&self, config: AgentConfig) -> AgentConfig {
        apply(
            config,
            self.blue_agent,
            self.blue_depth,
            self.blue_eval,
            self.blue_tie_breaker,
            self.blue_variable_depth,
        )
    }
}

fn apply(
    mut config: AgentConfig,
    strategy: Option<Strategy>,
    depth: Option<u32>,
    eval_fn: Option<EvalFn>,
    tie_breaker: Option<TieBreaker>,
    variable_depth: bool,
) -> AgentConfig {
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }
    if let Some(depth) = depth {
        config.depth = depth;
    }
    if let Some(eval_fn) = eval_fn {
        config.eval_fn = eval_fn;
    }
    if tie_breaker.is_some() {
        config.tie_breaker = tie_breaker;
    }
    if variable_depth {
        config.depth_policy = DepthPolicy::Variable;
    }
    config
}
