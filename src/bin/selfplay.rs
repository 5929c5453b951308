//! Batch AI-vs-AI matches.
//!
//! Each match runs single-threaded on its own `Game`; matches are spread over
//! the rayon thread pool.

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use rayon::prelude::*;

use quoridor_engine::agents::{create_agent, parse_seat_assignment, Difficulty};
use quoridor_engine::config::{load_config, EngineConfig};
use quoridor_engine::game_runner::{play_match, AgentController, MatchResult, Participant};
use quoridor_engine::stats::Statistics;
use quoridor_engine::{Game, Outcome};

/// Matches without a configured step limit are drawn after this many actions.
const DEFAULT_MAX_STEPS: u32 = 400;

#[derive(Parser, Debug)]
#[command(
    name = "selfplay",
    about = "Play batches of computer-vs-computer Quoridor matches",
    version
)]
struct Args {
    /// Number of matches to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Difficulty for a seat, e.g. `--ai 1=3`
    #[arg(long = "ai", value_parser = parse_seat_assignment)]
    ai: Vec<(usize, Difficulty)>,

    /// Difficulty for seats not given with --ai
    #[arg(long, default_value = "2")]
    default_tier: Difficulty,

    /// Number of players (2 or 4)
    #[arg(long)]
    players: Option<usize>,

    /// Board size (odd, 3 to 25)
    #[arg(long)]
    board_size: Option<usize>,

    /// Draw a match after this many actions
    #[arg(long)]
    max_steps: Option<u32>,

    /// Base seed; match `i` seat `s` uses `seed + i * players + s`
    #[arg(long)]
    seed: Option<u64>,

    /// Number of worker threads (defaults to rayon's choice)
    #[arg(long)]
    threads: Option<usize>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn seat_name(seat: usize, difficulty: Difficulty) -> String {
    format!("P{}-{}", seat + 1, difficulty)
}

fn play_one(index: usize, config: &EngineConfig, tiers: &[Difficulty]) -> Result<(MatchResult, Statistics)> {
    let mut game = Game::new(&config.game)?;
    let mut participants: Vec<Participant> = tiers
        .iter()
        .enumerate()
        .map(|(seat, &difficulty)| {
            let seed = config
                .ai
                .seed
                .map(|seed| seed.wrapping_add((index * tiers.len() + seat) as u64));
            let agent = create_agent(difficulty, &config.ai, seed);
            Participant::new(
                seat_name(seat, difficulty),
                Box::new(AgentController::new(agent)),
            )
        })
        .collect();

    let mut stats = Statistics::new();
    let result = play_match(&mut game, &mut participants, &mut stats)
        .with_context(|| format!("Match {} failed", index))?;
    info!(
        "Match {}: {:?} after {} actions ({} ms)",
        index, result.outcome, result.total_actions, result.elapsed_millis
    );
    Ok((result, stats))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(players) = args.players {
        config.game.num_players = players;
    }
    if let Some(board_size) = args.board_size {
        config.game.board_size = board_size;
    }
    if args.seed.is_some() {
        config.ai.seed = args.seed;
    }
    config.game.max_steps = args
        .max_steps
        .or(config.game.max_steps)
        .or(Some(DEFAULT_MAX_STEPS));
    config.validate()?;

    let num_players = config.game.num_players;
    let mut tiers = vec![args.default_tier; num_players];
    for &(seat, difficulty) in &args.ai {
        ensure!(
            seat < num_players,
            "--ai seat {} does not exist in a {}-player game",
            seat + 1,
            num_players
        );
        tiers[seat] = difficulty;
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the rayon thread pool")?;
    }

    info!(
        "Playing {} matches on {}x{}: {}",
        args.games,
        config.game.board_size,
        config.game.board_size,
        tiers
            .iter()
            .enumerate()
            .map(|(seat, &tier)| seat_name(seat, tier))
            .collect::<Vec<_>>()
            .join(" vs ")
    );

    let matches: Vec<(MatchResult, Statistics)> = (0..args.games)
        .into_par_iter()
        .map(|index| play_one(index, &config, &tiers))
        .collect::<Result<_>>()?;

    let mut wins = vec![0usize; num_players];
    let mut draws = 0usize;
    let mut aborted = 0usize;
    let mut total_actions = 0u64;
    let mut stats = Statistics::new();

    for (result, match_stats) in matches {
        match result.outcome {
            Outcome::Winner(player) => wins[player] += 1,
            Outcome::Draw => draws += 1,
            Outcome::Aborted => aborted += 1,
        }
        total_actions += u64::from(result.total_actions);
        stats.merge(match_stats);
    }

    println!("=== {} matches ===", args.games);
    for (seat, &tier) in tiers.iter().enumerate() {
        println!("{:<12} {} wins", seat_name(seat, tier), wins[seat]);
    }
    println!("draws {}, aborted {}", draws, aborted);
    if args.games > 0 {
        println!(
            "average length {:.1} actions",
            total_actions as f64 / args.games as f64
        );
    }
    println!();
    print!("{}", stats);

    Ok(())
}
