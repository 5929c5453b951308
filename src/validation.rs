//! Move and wall legality.
//!
//! Validation never mutates the board it is given. Wall checks run the
//! reachability search on a scratch copy.

use crate::board::Board;
use crate::error::RuleError;
use crate::grid::{Direction, Position, WallSegment};
use crate::pathfinding::has_path_to_goal;
use crate::players::Goal;

/// Where a legal move request ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResolution {
    /// A single landing square.
    Land(Position),
    /// A blocked straight jump with both diagonals open. The caller picks one.
    Fork([Position; 2]),
}

impl MoveResolution {
    pub fn landings(&self) -> Vec<Position> {
        match *self {
            MoveResolution::Land(pos) => vec![pos],
            MoveResolution::Fork(options) => options.to_vec(),
        }
    }
}

/// Resolve a one-step move request in `direction`, escalating to a jump if
/// the neighbouring square holds a pawn.
pub fn resolve_step(
    board: &Board,
    player: usize,
    direction: Direction,
) -> Result<MoveResolution, RuleError> {
    let from = board.pawn_position(player);
    resolve_move(board, player, from.step(direction))
}

/// Resolve a move request with an explicit destination.
///
/// Accepted notations: a single orthogonal step (which may escalate into a
/// jump), an explicit straight jump two squares away, or an explicit diagonal
/// jump one square away on both axes.
pub fn resolve_move(
    board: &Board,
    player: usize,
    to: Position,
) -> Result<MoveResolution, RuleError> {
    if !to.in_bounds(board.size()) {
        return Err(RuleError::OutOfBounds);
    }

    let from = board.pawn_position(player);
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;

    match (d_row.abs(), d_col.abs()) {
        (1, 0) | (0, 1) => resolve_single_step(board, from, to),
        (2, 0) | (0, 2) => check_explicit_jump(board, from, to).map(MoveResolution::Land),
        (1, 1) => check_explicit_diagonal(board, from, to).map(MoveResolution::Land),
        _ => Err(RuleError::InvalidFormat),
    }
}

fn resolve_single_step(
    board: &Board,
    from: Position,
    to: Position,
) -> Result<MoveResolution, RuleError> {
    if board.is_edge_blocked(from, to) {
        return Err(RuleError::WallBlocked);
    }
    if board.is_occupied(to) {
        return resolve_jump(board, from, to);
    }
    Ok(MoveResolution::Land(to))
}

/// Jump over the pawn on `pivot`, which is adjacent to `from` with an open edge.
fn resolve_jump(
    board: &Board,
    from: Position,
    pivot: Position,
) -> Result<MoveResolution, RuleError> {
    let d_row = pivot.row - from.row;
    let d_col = pivot.col - from.col;

    let straight = pivot.offset(d_row, d_col);
    if !is_straight_jump_blocked(board, pivot, straight) {
        return Ok(MoveResolution::Land(straight));
    }

    let candidates = if d_row != 0 {
        [pivot.offset(0, -1), pivot.offset(0, 1)]
    } else {
        [pivot.offset(-1, 0), pivot.offset(1, 0)]
    };
    let open: Vec<Position> = candidates
        .into_iter()
        .filter(|&diag| is_open_landing(board, pivot, diag))
        .collect();

    match open.as_slice() {
        [single] => Ok(MoveResolution::Land(*single)),
        [first, second] => Ok(MoveResolution::Fork([*first, *second])),
        _ => Err(RuleError::NoLegalJump),
    }
}

/// `to` is two squares from `from` along a row or column.
fn check_explicit_jump(board: &Board, from: Position, to: Position) -> Result<Position, RuleError> {
    let middle = Position::new((from.row + to.row) / 2, (from.col + to.col) / 2);
    if !board.is_occupied(middle) {
        return Err(RuleError::NoLegalJump);
    }
    if board.is_edge_blocked(from, middle) || board.is_edge_blocked(middle, to) {
        return Err(RuleError::WallBlocked);
    }
    if board.is_occupied(to) {
        return Err(RuleError::Occupied);
    }
    Ok(to)
}

/// `to` is diagonally adjacent to `from`. Legal only as the outcome of a
/// straight jump that is blocked behind the pivot pawn.
fn check_explicit_diagonal(
    board: &Board,
    from: Position,
    to: Position,
) -> Result<Position, RuleError> {
    if board.is_occupied(to) {
        return Err(RuleError::Occupied);
    }

    let pivots = [Position::new(from.row, to.col), Position::new(to.row, from.col)];
    let legal = pivots.into_iter().any(|pivot| {
        let beyond = pivot.offset(pivot.row - from.row, pivot.col - from.col);
        board.is_occupied(pivot)
            && !board.is_edge_blocked(from, pivot)
            && is_straight_jump_blocked(board, pivot, beyond)
            && !board.is_edge_blocked(pivot, to)
    });

    if legal {
        Ok(to)
    } else {
        Err(RuleError::NoLegalJump)
    }
}

/// Off the board, behind a wall, or onto another pawn.
fn is_straight_jump_blocked(board: &Board, pivot: Position, beyond: Position) -> bool {
    !beyond.in_bounds(board.size())
        || board.is_edge_blocked(pivot, beyond)
        || board.is_occupied(beyond)
}

fn is_open_landing(board: &Board, pivot: Position, landing: Position) -> bool {
    landing.in_bounds(board.size())
        && !board.is_edge_blocked(pivot, landing)
        && !board.is_occupied(landing)
}

/// Check bounds, overlap, and that every player keeps a path to their goal.
///
/// `goals[i]` is the goal of the pawn at `board.pawn_position(i)`.
pub fn can_place_wall(board: &Board, goals: &[Goal], wall: WallSegment) -> Result<(), RuleError> {
    if !wall.in_bounds(board.size()) {
        return Err(RuleError::OutOfBounds);
    }
    if board.walls().iter().any(|existing| wall.overlaps(existing)) {
        return Err(RuleError::Overlap);
    }

    let mut scratch = board.snapshot_copy();
    scratch.place_wall_segment(wall)?;

    for (player, &goal) in goals.iter().enumerate() {
        if !has_path_to_goal(&scratch, scratch.pawn_position(player), goal) {
            return Err(RuleError::PathBlocked);
        }
    }

    Ok(())
}
