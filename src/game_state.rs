//! Turn engine: whose turn it is, wall budgets, and when the match ends.
//!
//! The live [`Board`] is owned here and only changes after an action has been
//! fully validated, so a rejected action never leaves partial state behind.

use std::time::{Duration, Instant};

use log::{debug, info};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::actions::{legal_actions, Action};
use crate::board::Board;
use crate::config::GameConfig;
use crate::error::RuleError;
use crate::grid::{CellView, Position, WallSegment};
use crate::players::{default_wall_budget, next_player, seats, Goal};
use crate::validation::{can_place_wall, resolve_move, resolve_step, MoveResolution};

/// How a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(usize),
    Draw,
    Aborted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    AwaitingAction(usize),
    GameOver(Outcome),
}

/// What to do when a blocked straight jump leaves both diagonals open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagonalPolicy {
    /// Take the lower-indexed diagonal without asking.
    First,
    /// Ask the acting player's [`DiagonalChooser`].
    #[default]
    Ask,
}

/// Picks one of two open diagonal landings.
///
/// Returning `None`, or a square that is not one of `options`, rejects the
/// move with [`RuleError::InvalidFormat`].
pub trait DiagonalChooser {
    fn choose_diagonal(&mut self, player: usize, options: [Position; 2]) -> Option<Position>;
}

/// Always takes the first option.
pub struct FirstDiagonal;

impl DiagonalChooser for FirstDiagonal {
    fn choose_diagonal(&mut self, _player: usize, options: [Position; 2]) -> Option<Position> {
        Some(options[0])
    }
}

/// The mutation a successful action made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Moved { from: Position, to: Position },
    WallPlaced(WallSegment),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player: usize,
    pub applied: Applied,
    pub status: GameStatus,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    goals: Vec<Goal>,
    walls_remaining: Vec<u32>,
    action_counts: Vec<u32>,
    total_actions: u32,
    status: GameStatus,
    max_steps: Option<u32>,
    diagonal_policy: DiagonalPolicy,
    started: Instant,
}

impl Game {
    /// Start a match with the standard seating for `config.num_players`.
    pub fn new(config: &GameConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let seats = seats(config.board_size, config.num_players);
        let starts: Vec<Position> = seats.iter().map(|seat| seat.start).collect();
        let budget = config
            .walls_per_player
            .unwrap_or_else(|| default_wall_budget(config.num_players));

        info!(
            "Starting {}-player game on {}x{} board, {} walls each",
            config.num_players, config.board_size, config.board_size, budget
        );

        Ok(Self {
            board: Board::new(config.board_size, &starts),
            goals: seats.iter().map(|seat| seat.goal).collect(),
            walls_remaining: vec![budget; config.num_players],
            action_counts: vec![0; config.num_players],
            total_actions: 0,
            status: GameStatus::AwaitingAction(0),
            max_steps: config.max_steps,
            diagonal_policy: config.diagonal_policy,
            started: Instant::now(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn num_players(&self) -> usize {
        self.goals.len()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }

    pub fn current_player(&self) -> Option<usize> {
        match self.status {
            GameStatus::AwaitingAction(player) => Some(player),
            GameStatus::GameOver(_) => None,
        }
    }

    pub fn walls_remaining(&self, player: usize) -> u32 {
        self.walls_remaining[player]
    }

    pub fn walls_remaining_all(&self) -> &[u32] {
        &self.walls_remaining
    }

    pub fn action_count(&self, player: usize) -> u32 {
        self.action_counts[player]
    }

    pub fn total_actions(&self) -> u32 {
        self.total_actions
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// True if `player`'s pawn stands on their goal edge.
    pub fn has_won(&self, player: usize) -> bool {
        self.goals[player].is_reached(self.board.pawn_position(player))
    }

    /// Per-cell view of the live board.
    pub fn snapshot(&self) -> Array2<CellView> {
        self.board.snapshot()
    }

    /// The full legal-action set of the player to act, empty once the game is over.
    pub fn legal_actions(&self) -> Vec<Action> {
        match self.current_player() {
            Some(player) => legal_actions(
                &self.board,
                &self.goals,
                player,
                self.walls_remaining[player],
            ),
            None => Vec::new(),
        }
    }

    /// End the match immediately, whoever's turn it is.
    pub fn abort(&mut self) {
        if !self.is_over() {
            info!("Game aborted after {} actions", self.total_actions);
            self.status = GameStatus::GameOver(Outcome::Aborted);
        }
    }

    /// Validate and apply `action` for the player to act.
    ///
    /// On rejection nothing changes and the same player is still to act.
    /// Once the game is over every action is rejected as `InvalidFormat`.
    pub fn submit(
        &mut self,
        action: Action,
        chooser: &mut dyn DiagonalChooser,
    ) -> Result<TurnReport, RuleError> {
        let GameStatus::AwaitingAction(player) = self.status else {
            return Err(RuleError::InvalidFormat);
        };

        let applied = match self.apply(player, action, chooser) {
            Ok(applied) => applied,
            Err(reason) => {
                debug!("Player {} action {} rejected: {}", player, action, reason);
                return Err(reason);
            }
        };

        self.action_counts[player] += 1;
        self.total_actions += 1;

        self.status = if self.has_won(player) {
            info!("Player {} wins after {} actions", player, self.total_actions);
            GameStatus::GameOver(Outcome::Winner(player))
        } else if self.max_steps.is_some_and(|limit| self.total_actions >= limit) {
            info!("Game drawn at the {} action limit", self.total_actions);
            GameStatus::GameOver(Outcome::Draw)
        } else {
            GameStatus::AwaitingAction(next_player(player, self.num_players()))
        };
        debug!("Player {} applied {:?}, now {:?}", player, applied, self.status);

        Ok(TurnReport {
            player,
            applied,
            status: self.status,
        })
    }

    fn apply(
        &mut self,
        player: usize,
        action: Action,
        chooser: &mut dyn DiagonalChooser,
    ) -> Result<Applied, RuleError> {
        let resolution = match action {
            Action::Move(direction) => resolve_step(&self.board, player, direction)?,
            Action::MoveTo(to) => resolve_move(&self.board, player, to)?,
            Action::Wall { .. } => {
                if self.walls_remaining[player] == 0 {
                    return Err(RuleError::NoWallsRemaining);
                }
                let wall = action
                    .wall_segment(player)
                    .ok_or(RuleError::InvalidFormat)?;
                can_place_wall(&self.board, &self.goals, wall)?;
                self.board.place_wall_segment(wall)?;
                self.walls_remaining[player] -= 1;
                return Ok(Applied::WallPlaced(wall));
            }
        };

        let to = match resolution {
            MoveResolution::Land(to) => to,
            MoveResolution::Fork(options) => match self.diagonal_policy {
                DiagonalPolicy::First => options[0],
                DiagonalPolicy::Ask => chooser
                    .choose_diagonal(player, options)
                    .filter(|choice| options.contains(choice))
                    .ok_or(RuleError::InvalidFormat)?,
            },
        };

        let from = self.board.pawn_position(player);
        self.board.move_pawn(player, to);
        Ok(Applied::Moved { from, to })
    }
}
