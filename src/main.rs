use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use reversi_core::engine::agent::{play_game, Agent, AlphaBetaAgent, RandomAgent};
use reversi_core::engine::config::EngineConfig;
use reversi_core::logic::board::Color;
use reversi_core::logic::game::{GameState, GameStatus};
use reversi_core::logic::rules::OthelloRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    AlphaBeta,
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "reversi", version, about = "Plays Reversi matches between engine agents")]
struct Cli {
    /// Board side length (even, 4 to 12)
    #[arg(long, default_value_t = 8)]
    size: usize,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Agent playing Black
    #[arg(long, value_enum, default_value_t = AgentKind::AlphaBeta)]
    black: AgentKind,

    /// Agent playing White
    #[arg(long, value_enum, default_value_t = AgentKind::Random)]
    white: AgentKind,

    /// JSON engine config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read heuristic values in the config file as multipliers of the defaults
    #[arg(long, requires = "config")]
    scale: bool,

    /// Starting search depth, overrides the config file
    #[arg(long)]
    depth: Option<u8>,

    /// Soft time budget per move in milliseconds, overrides the config file
    #[arg(long)]
    budget_ms: Option<u64>,

    /// Print the final board of every game
    #[arg(long)]
    show_board: bool,
}

fn read_config(path: &Path, scale: bool) -> Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = if scale {
        EngineConfig::load_from_json(&text)?
    } else {
        serde_json::from_str(&text)?
    };
    Ok(config)
}

fn engine_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = cli
        .config
        .as_deref()
        .map_or_else(|| Ok(EngineConfig::default()), |path| read_config(path, cli.scale))?;

    if let Some(depth) = cli.depth {
        config.initial_depth = depth;
    }
    if let Some(budget) = cli.budget_ms {
        config.time_budget_ms = budget;
    }
    Ok(config)
}

fn make_agent(kind: AgentKind, config: &Arc<EngineConfig>) -> Box<dyn Agent> {
    match kind {
        AgentKind::AlphaBeta => Box::new(AlphaBetaAgent::new(Arc::clone(config))),
        AgentKind::Random => Box::new(RandomAgent::new(OthelloRules)),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Arc::new(engine_config(&cli)?);

    let (mut black_wins, mut white_wins, mut draws) = (0u32, 0u32, 0u32);

    for game_no in 1..=cli.games {
        let mut black = make_agent(cli.black, &config);
        let mut white = make_agent(cli.white, &config);
        info!("game {game_no}: {} (Black) vs {} (White)", black.name(), white.name());

        let start = GameState::new(cli.size).context("cannot set up board")?;
        let game = play_game(&OthelloRules, start, &mut *black, &mut *white)?;

        if let GameStatus::Finished { winner, black: black_discs, white: white_discs } = game.status {
            match winner {
                Some(Color::Black) => black_wins += 1,
                Some(Color::White) => white_wins += 1,
                None => draws += 1,
            }
            let result = winner.map_or_else(|| "draw".to_string(), |color| format!("{color} wins"));
            println!("game {game_no}: {result} ({black_discs}-{white_discs})");
        }
        if cli.show_board {
            print!("{}", game.board);
        }
    }

    println!("Black {black_wins}, White {white_wins}, draws {draws}");
    Ok(())
}
