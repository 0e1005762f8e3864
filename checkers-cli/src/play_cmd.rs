//! Play command - one game between two agents, printed ply by ply
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_agents(), play_out(), report_outcome()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;

use checkers_core::{Agent, AgentConfig, Color, Game, MoveReport};

use crate::agent_args::AgentArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub agents: AgentArgs,

    /// Decisions before the game is declared a draw
    #[arg(long, default_value = "200")]
    pub max_moves: u32,

    /// Only print the final board
    #[arg(long)]
    pub quiet: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let (mut red, mut blue) = build_agents(&args, seed);

    tracing::info!(
        "Starting game: red {} vs blue {}",
        red.config().label(),
        blue.config().label()
    );

    let mut game = Game::setup();
    let moves = play_out(&mut game, &mut red, &mut blue, &args);

    report_outcome(&game, moves, args.max_moves);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_agents(args: &PlayArgs, seed: Option<u64>) -> (Agent, Agent) {
    let mut red = args.agents.apply_red(AgentConfig::default());
    let mut blue = args.agents.apply_blue(AgentConfig::default());
    if let Some(seed) = seed {
        red = red.with_seed(seed);
        blue = blue.with_seed(seed.wrapping_add(1));
    }
    (Agent::new(Color::Red, red), Agent::new(Color::Blue, blue))
}

/// Let the agents alternate until the game ends or the move limit is hit
fn play_out(game: &mut Game, red: &mut Agent, blue: &mut Agent, args: &PlayArgs) -> u32 {
    if !args.quiet {
        println!("{}", game.state().board);
    }

    let mut moves = 0;
    while !game.is_over() && moves < args.max_moves {
        let mover = game.state().turn();
        let report = match mover {
            Color::Red => red.make_move(game),
            Color::Blue => blue.make_move(game),
        };
        moves += 1;
        game.update();

        if !args.quiet {
            println!("{}", format_report(moves, mover, &report));
            println!("{}", game.state().board);
        }
    }
    moves
}

fn report_outcome(game: &Game, moves: u32, max_moves: u32) {
    println!("\n=== Game Over ===");
    println!("{}", game.state().board);
    println!("Decisions: {}", moves);
    match (game.is_over(), game.winner()) {
        (true, Some(winner)) => println!("Winner: {}", winner),
        (true, None) => println!("Result: no winner"),
        (false, _) => println!("Result: draw after {} decisions", max_moves),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_report(ply: u32, mover: Color, report: &MoveReport) -> String {
    match report.action {
        Some(action) => format!(
            "{:>3}. {} {} (depth {}, {} nodes)",
            ply, mover, action, report.depth, report.nodes_explored
        ),
        None => format!("{:>3}. {} passes", ply, mover),
    }
}
