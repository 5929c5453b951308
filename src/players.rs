//! Seating: starting squares, goal edges and wall budgets.

use serde::{Deserialize, Serialize};

use crate::grid::Position;

pub const WALLS_TWO_PLAYERS: u32 = 10;
pub const WALLS_FOUR_PLAYERS: u32 = 5;

/// The edge a player must reach to win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    Row(i32),
    Col(i32),
}

impl Goal {
    pub fn is_reached(self, pos: Position) -> bool {
        match self {
            Goal::Row(row) => pos.row == row,
            Goal::Col(col) => pos.col == col,
        }
    }

    /// Row or column offset from `pos` to the goal edge, ignoring walls.
    pub fn offset(self, pos: Position) -> i32 {
        match self {
            Goal::Row(row) => (row - pos.row).abs(),
            Goal::Col(col) => (col - pos.col).abs(),
        }
    }
}

/// Fixed per-player data for one match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    pub start: Position,
    pub goal: Goal,
}

/// Seats for a 2- or 4-player match on an NxN board.
///
/// Player 0 starts north and heads south, player 1 the reverse; in 4-player
/// games player 2 starts west and player 3 east.
pub fn seats(board_size: usize, num_players: usize) -> Vec<Seat> {
    let last = board_size as i32 - 1;
    let mid = board_size as i32 / 2;
    let all = [
        Seat {
            start: Position::new(0, mid),
            goal: Goal::Row(last),
        },
        Seat {
            start: Position::new(last, mid),
            goal: Goal::Row(0),
        },
        Seat {
            start: Position::new(mid, 0),
            goal: Goal::Col(last),
        },
        Seat {
            start: Position::new(mid, last),
            goal: Goal::Col(0),
        },
    ];
    all.into_iter().take(num_players).collect()
}

pub fn default_wall_budget(num_players: usize) -> u32 {
    if num_players > 2 {
        WALLS_FOUR_PLAYERS
    } else {
        WALLS_TWO_PLAYERS
    }
}

/// The player whose turn follows `player`, round-robin.
pub fn next_player(player: usize, num_players: usize) -> usize {
    (player + 1) % num_players
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_player_goal_detection() {
        let seats = seats(9, 2);
        for col in 0..9 {
            let pos = Position::new(8, col);
            assert!(seats[0].goal.is_reached(pos));
            assert!(!seats[1].goal.is_reached(pos));
        }
    }

    #[test]
    fn test_four_player_layout() {
        let seats = seats(9, 4);
        let starts: Vec<Position> = seats.iter().map(|s| s.start).collect();
        assert_eq!(
            starts,
            vec![
                Position::new(0, 4),
                Position::new(8, 4),
                Position::new(4, 0),
                Position::new(4, 8),
            ]
        );
        assert!(seats[2].goal.is_reached(Position::new(0, 8)));
        assert!(seats[3].goal.is_reached(Position::new(6, 0)));
        // nobody starts on their own goal
        for seat in &seats {
            assert!(!seat.goal.is_reached(seat.start));
            assert_eq!(seat.goal.offset(seat.start), 8);
        }
    }

    #[test]
    fn test_wall_budget_and_rotation() {
        assert_eq!(default_wall_budget(2), 10);
        assert_eq!(default_wall_budget(4), 5);
        assert_eq!(next_player(1, 2), 0);
        assert_eq!(next_player(2, 4), 3);
        assert_eq!(next_player(3, 4), 0);
    }
}
