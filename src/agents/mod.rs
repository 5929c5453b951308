//! Computer opponents.
//!
//! All agents implement the [`ActionSelector`] trait and only ever propose
//! actions produced by the shared validators.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};

use crate::actions::Action;
use crate::config::AiConfig;
use crate::game_state::Game;
use crate::players::next_player;

pub mod greedy_agent;
pub mod minimax_agent;
pub mod random_agent;

pub use greedy_agent::GreedyAgent;
pub use minimax_agent::MinimaxAgent;
pub use random_agent::RandomAgent;

/// Trait for agents that pick the next action of the player to act.
pub trait ActionSelector {
    fn select_action(&mut self, game: &Game) -> anyhow::Result<Action>;
}

impl<T: ActionSelector + ?Sized> ActionSelector for Box<T> {
    fn select_action(&mut self, game: &Game) -> anyhow::Result<Action> {
        (**self).select_action(game)
    }
}

/// The player to act and the opponent it plays against.
///
/// In 4-player games the opponent is the next player in turn order.
pub(crate) fn acting_players(game: &Game) -> anyhow::Result<(usize, usize)> {
    let player = game
        .current_player()
        .ok_or_else(|| anyhow!("Game is already over"))?;
    Ok((player, next_player(player, game.num_players())))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Random = 1,
    Greedy = 2,
    Minimax = 3,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Random => "random",
            Difficulty::Greedy => "greedy",
            Difficulty::Minimax => "minimax",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "easy" | "random" => Ok(Difficulty::Random),
            "2" | "medium" | "greedy" => Ok(Difficulty::Greedy),
            "3" | "hard" | "minimax" => Ok(Difficulty::Minimax),
            other => bail!("Unknown difficulty '{}', expected 1, 2 or 3", other),
        }
    }
}

/// Parse a `<seat>=<difficulty>` pair. Seats are numbered from 1 as shown on
/// the board; the returned index is 0-based.
pub fn parse_seat_assignment(s: &str) -> anyhow::Result<(usize, Difficulty)> {
    let (seat, difficulty) = s
        .split_once('=')
        .with_context(|| format!("Expected <seat>=<difficulty>, got '{}'", s))?;
    let seat: usize = seat
        .trim()
        .parse()
        .with_context(|| format!("Invalid seat number '{}'", seat))?;
    if seat == 0 {
        bail!("Seats are numbered from 1");
    }
    Ok((seat - 1, difficulty.parse()?))
}

/// Build the agent for `difficulty` from the shared AI settings.
pub fn create_agent(
    difficulty: Difficulty,
    ai: &AiConfig,
    seed: Option<u64>,
) -> Box<dyn ActionSelector + Send> {
    match difficulty {
        Difficulty::Random => Box::new(RandomAgent::new(ai.limits(), seed)),
        Difficulty::Greedy => Box::new(GreedyAgent::new(ai.limits(), ai.heuristic)),
        Difficulty::Minimax => Box::new(MinimaxAgent::new(ai.search_params())),
    }
}
