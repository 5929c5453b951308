//! Greedy agent: one-ply scoring, lowest score wins.
//!
//! A move scores the mover's distance to goal from the landing square. A wall
//! scores the Manhattan distance from its intersection to the opponent's pawn.

use crate::actions::{candidate_actions, Action, CandidateLimits};
use crate::agents::{acting_players, ActionSelector};
use crate::board::Board;
use crate::game_state::Game;
use crate::minimax::{distance_estimate, Heuristic};
use crate::players::Goal;

pub struct GreedyAgent {
    limits: CandidateLimits,
    heuristic: Heuristic,
}

impl GreedyAgent {
    pub fn new(limits: CandidateLimits, heuristic: Heuristic) -> Self {
        Self { limits, heuristic }
    }

    fn score(&self, board: &Board, goal: Goal, opponent: usize, action: Action) -> i32 {
        match action {
            Action::MoveTo(to) => distance_estimate(board, to, goal, self.heuristic),
            Action::Wall { at, .. } => at.manhattan(board.pawn_position(opponent)),
            // candidates are always explicit landings
            Action::Move(_) => i32::MAX,
        }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new(CandidateLimits::default(), Heuristic::default())
    }
}

impl ActionSelector for GreedyAgent {
    fn select_action(&mut self, game: &Game) -> anyhow::Result<Action> {
        let (player, opponent) = acting_players(game)?;
        let board = game.board();
        let goal = game.goals()[player];

        candidate_actions(
            board,
            game.goals(),
            player,
            game.walls_remaining(player),
            board.pawn_position(opponent),
            self.limits,
        )
        .into_iter()
        .min_by_key(|&action| self.score(board, goal, opponent, action))
        .ok_or_else(|| anyhow::anyhow!("No valid actions available"))
    }
}
