//! Match command - play many games between two agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), checkers_tournament::play_match(), save_summary(), print_text_results()
//! - Level 4: path and formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use checkers_tournament::{play_match, MatchConfig, MatchSummary};

use crate::agent_args::AgentArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Match configuration JSON file (flags override its values)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub agents: AgentArgs,

    /// Number of games to play
    #[arg(long)]
    pub games: Option<usize>,

    /// Decisions per game before it is declared a draw
    #[arg(long)]
    pub max_moves: Option<u32>,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Where to write the JSON summary (default: competition_(<red>)_vs_(<blue>).json)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Build the match configuration
/// 2. Play the match
/// 3. Save and report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;

    tracing::info!(
        "Starting match: {} vs {} ({} games, max {} moves)",
        config.red.label(),
        config.blue.label(),
        config.games,
        config.max_moves
    );

    let summary = play_match(&config);

    let output = output_path(&args, &config);
    save_summary(&summary, &output)?;
    tracing::info!("Summary written to {}", output.display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_text_results(&summary);
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// File values first, then command-line overrides
fn build_config(args: &MatchArgs, seed: Option<u64>) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };

    config.red = args.agents.apply_red(config.red);
    config.blue = args.agents.apply_blue(config.blue);
    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(max_moves) = args.max_moves {
        config.max_moves = max_moves;
    }
    if args.sequential {
        config.parallel = false;
    }
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn save_summary(summary: &MatchSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write match summary: {}", path.display()))?;
    Ok(())
}

fn print_text_results(summary: &MatchSummary) {
    println!("\n=== Match Results ===");
    println!("Red:  {}", summary.red.label());
    println!("Blue: {}", summary.blue.label());
    println!("Total games: {}", summary.games);
    println!(
        "Red wins:    {} ({:.1}%)",
        summary.red_wins,
        summary.red_win_rate() * 100.0
    );
    println!(
        "Blue wins:   {} ({:.1}%)",
        summary.blue_wins,
        summary.blue_win_rate() * 100.0
    );
    println!(
        "Draws:       {} ({:.1}%)",
        summary.draws,
        summary.draw_rate() * 100.0
    );
    println!("Avg moves:   {:.1}", summary.avg_moves);
    println!(
        "Avg nodes per decision: red {:.0}, blue {:.0}",
        mean(&summary.avg_red_explored_nodes),
        mean(&summary.avg_blue_explored_nodes)
    );
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn output_path(args: &MatchArgs, config: &MatchConfig) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.json", config.name())))
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    }
}
