//! Random agent: picks uniformly from the bounded legal-action set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::actions::{candidate_actions, Action, CandidateLimits};
use crate::agents::{acting_players, ActionSelector};
use crate::game_state::Game;

pub struct RandomAgent {
    rng: StdRng,
    limits: CandidateLimits,
}

impl RandomAgent {
    /// A fixed `seed` makes the agent's choices reproducible.
    pub fn new(limits: CandidateLimits, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, limits }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new(CandidateLimits::default(), None)
    }
}

impl ActionSelector for RandomAgent {
    fn select_action(&mut self, game: &Game) -> anyhow::Result<Action> {
        let (player, opponent) = acting_players(game)?;
        let board = game.board();
        let candidates = candidate_actions(
            board,
            game.goals(),
            player,
            game.walls_remaining(player),
            board.pawn_position(opponent),
            self.limits,
        );

        anyhow::ensure!(!candidates.is_empty(), "No valid actions available");

        Ok(candidates[self.rng.gen_range(0..candidates.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game_state::FirstDiagonal;

    fn play_sequence(seed: u64, turns: usize) -> Vec<Action> {
        let mut game = Game::new(&GameConfig::default()).unwrap();
        let mut agent = RandomAgent::new(CandidateLimits::default(), Some(seed));
        let mut actions = Vec::new();
        for _ in 0..turns {
            let action = agent.select_action(&game).unwrap();
            game.submit(action, &mut FirstDiagonal).unwrap();
            actions.push(action);
        }
        actions
    }

    #[test]
    fn test_seeded_agent_is_reproducible() {
        assert_eq!(play_sequence(11, 8), play_sequence(11, 8));
    }

    #[test]
    fn test_random_agent_picks_candidate_action() {
        let game = Game::new(&GameConfig::default()).unwrap();
        let limits = CandidateLimits::default();
        let board = game.board();
        let candidates =
            candidate_actions(board, game.goals(), 0, 10, board.pawn_position(1), limits);

        let mut agent = RandomAgent::new(limits, Some(3));
        for _ in 0..50 {
            let action = agent.select_action(&game).unwrap();
            assert!(
                candidates.contains(&action),
                "RandomAgent picked {} outside the candidate set",
                action
            );
        }
    }

    #[test]
    fn test_random_agent_covers_several_actions() {
        let game = Game::new(&GameConfig::default()).unwrap();
        let mut agent = RandomAgent::new(CandidateLimits::default(), Some(5));
        let mut seen = Vec::new();
        for _ in 0..100 {
            let action = agent.select_action(&game).unwrap();
            if !seen.contains(&action) {
                seen.push(action);
            }
        }
        assert!(seen.len() > 1);
    }
}
