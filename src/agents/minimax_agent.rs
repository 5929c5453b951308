//! Minimax agent: alpha-beta search to a fixed depth.

use anyhow::Context;
use log::debug;

use crate::actions::Action;
use crate::agents::{acting_players, ActionSelector};
use crate::game_state::Game;
use crate::minimax::{best_action, SearchParams};

pub struct MinimaxAgent {
    params: SearchParams,
}

impl MinimaxAgent {
    pub fn new(params: SearchParams) -> Self {
        Self { params }
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl ActionSelector for MinimaxAgent {
    fn select_action(&mut self, game: &Game) -> anyhow::Result<Action> {
        let (player, opponent) = acting_players(game)?;
        let (action, score) = best_action(
            game.board(),
            game.goals(),
            game.walls_remaining_all(),
            player,
            opponent,
            &self.params,
        )
        .context("No valid actions available")?;

        debug!("Player {} minimax picks {} (score {})", player, action, score);
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game_state::{FirstDiagonal, GameStatus, Outcome};
    use crate::grid::Direction;

    #[test]
    fn test_finishes_a_won_race() {
        let mut game = Game::new(&GameConfig {
            board_size: 5,
            walls_per_player: Some(0),
            ..GameConfig::default()
        })
        .unwrap();
        // sidestep player 1 so the race is not blocked head-on
        game.submit(Action::Move(Direction::East), &mut FirstDiagonal)
            .unwrap();
        game.submit(Action::Move(Direction::West), &mut FirstDiagonal)
            .unwrap();

        let mut agent = MinimaxAgent::default();
        for _ in 0..20 {
            if game.is_over() {
                break;
            }
            let action = agent.select_action(&game).unwrap();
            game.submit(action, &mut FirstDiagonal).unwrap();
        }
        // player 0 moved first and both need four steps
        assert_eq!(game.status(), GameStatus::GameOver(Outcome::Winner(0)));
    }

    #[test]
    fn test_same_position_same_choice() {
        let game = Game::new(&GameConfig::default()).unwrap();
        let first = MinimaxAgent::default().select_action(&game).unwrap();
        let second = MinimaxAgent::default().select_action(&game).unwrap();
        assert_eq!(first, second);
    }
}
