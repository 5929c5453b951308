use std::collections::VecDeque;

use crate::board::Board;
use crate::grid::{Direction, Position};
use crate::players::Goal;

/// Shortest number of single steps from `start` to any cell satisfying `goal`,
/// moving only through unblocked edges. Pawns are ignored.
///
/// Returns `None` if the goal is unreachable.
pub fn distance_to_goal(board: &Board, start: Position, goal: Goal) -> Option<usize> {
    if goal.is_reached(start) {
        return Some(0);
    }

    let n = board.size();
    let mut visited = vec![false; n * n];
    let index = |p: Position| p.row as usize * n + p.col as usize;

    let mut queue = VecDeque::new();
    visited[index(start)] = true;
    queue.push_back((start, 0));

    while let Some((current, steps)) = queue.pop_front() {
        for direction in Direction::ALL {
            let next = current.step(direction);
            // off-board neighbours report as blocked
            if board.is_edge_blocked(current, next) || visited[index(next)] {
                continue;
            }
            if goal.is_reached(next) {
                return Some(steps + 1);
            }
            visited[index(next)] = true;
            queue.push_back((next, steps + 1));
        }
    }

    None
}

/// True if at least one path from `start` reaches the goal.
pub fn has_path_to_goal(board: &Board, start: Position, goal: Goal) -> bool {
    distance_to_goal(board, start, goal).is_some()
}
