//! Quoridor rules engine.
//!
//! The board model, move and wall validators, and the turn engine form the
//! rules core. The agents and match runner build on top of it and never
//! bypass the validators.

pub mod actions;
pub mod agents;
pub mod board;
pub mod config;
pub mod error;
pub mod game_runner;
pub mod game_state;
pub mod grid;
pub mod minimax;
pub mod pathfinding;
pub mod players;
pub mod stats;
pub mod validation;

#[cfg(test)]
mod test_boards;

pub use actions::Action;
pub use board::Board;
pub use error::RuleError;
pub use game_state::{Game, GameStatus, Outcome};
pub use grid::{Direction, Orientation, Position, WallSegment};
