//! Action commands, their text notation, and legal-action enumeration.

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::error::RuleError;
use crate::grid::{Direction, Orientation, Position, WallSegment};
use crate::players::Goal;
use crate::validation::{can_place_wall, resolve_step};

/// A single turn's action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Step in a direction; jumps are resolved by the validator.
    Move(Direction),
    /// Move to an explicit square: a step, a straight jump or a diagonal jump.
    MoveTo(Position),
    /// Place a wall on the intersection `at`.
    Wall {
        at: Position,
        orientation: Orientation,
    },
}

impl Action {
    pub fn wall(row: i32, col: i32, orientation: Orientation) -> Self {
        Action::Wall {
            at: Position::new(row, col),
            orientation,
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Action::Wall { .. })
    }

    /// The segment this action would place for `owner`, if it is a wall action.
    pub fn wall_segment(&self, owner: usize) -> Option<WallSegment> {
        match *self {
            Action::Wall { at, orientation } => {
                Some(WallSegment::new(at.row, at.col, orientation, owner))
            }
            _ => None,
        }
    }
}

impl FromStr for Action {
    type Err = RuleError;

    /// Parse `M <N|S|E|W>`, `T <row> <col>` or `W <row> <col> <H|V>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let parse_coord = |token: &str| token.parse::<i32>().map_err(|_| RuleError::InvalidFormat);

        let Some((command, args)) = tokens.split_first() else {
            return Err(RuleError::InvalidFormat);
        };

        match (command.to_ascii_uppercase().as_str(), args) {
            ("M", [direction]) => Ok(Action::Move(direction.parse()?)),
            ("T", [row, col]) => Ok(Action::MoveTo(Position::new(
                parse_coord(*row)?,
                parse_coord(*col)?,
            ))),
            ("W", [row, col, orientation]) => Ok(Action::wall(
                parse_coord(*row)?,
                parse_coord(*col)?,
                orientation.parse()?,
            )),
            _ => Err(RuleError::InvalidFormat),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(direction) => write!(f, "M {}", direction.letter()),
            Action::MoveTo(to) => write!(f, "T {} {}", to.row, to.col),
            Action::Wall { at, orientation } => {
                write!(f, "W {} {} {}", at.row, at.col, orientation.letter())
            }
        }
    }
}

/// Bounds on the candidate list used by the AI tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidateLimits {
    /// Side length of the square of wall intersections scanned around the focus pawn.
    pub wall_window: usize,
    /// Walls stop being added once the list holds this many actions.
    pub max_candidates: usize,
}

impl Default for CandidateLimits {
    fn default() -> Self {
        Self {
            wall_window: 5,
            max_candidates: 10,
        }
    }
}

/// Every square `player` can land on this turn, with forks expanded into
/// both diagonals. Sorted and free of duplicates.
pub fn legal_move_destinations(board: &Board, player: usize) -> Vec<Position> {
    let mut destinations: Vec<Position> = Direction::ALL
        .into_iter()
        .filter_map(|direction| resolve_step(board, player, direction).ok())
        .flat_map(|resolution| resolution.landings())
        .collect();
    destinations.sort();
    destinations.dedup();
    destinations
}

/// Every wall `owner` could legally place anywhere on the board.
pub fn legal_wall_placements(board: &Board, goals: &[Goal], owner: usize) -> Vec<WallSegment> {
    let anchors = board.size() as i32 - 1;
    let mut walls = Vec::new();
    for row in 0..anchors {
        for col in 0..anchors {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                let wall = WallSegment::new(row, col, orientation, owner);
                if can_place_wall(board, goals, wall).is_ok() {
                    walls.push(wall);
                }
            }
        }
    }
    walls
}

/// The complete legal-action set: all landings plus, while the budget lasts,
/// all legal walls.
pub fn legal_actions(
    board: &Board,
    goals: &[Goal],
    player: usize,
    walls_remaining: u32,
) -> Vec<Action> {
    let mut actions: Vec<Action> = legal_move_destinations(board, player)
        .into_iter()
        .map(Action::MoveTo)
        .collect();
    if walls_remaining > 0 {
        actions.extend(
            legal_wall_placements(board, goals, player)
                .into_iter()
                .map(|wall| Action::Wall {
                    at: wall.position,
                    orientation: wall.orientation,
                }),
        );
    }
    actions
}

/// Bounded legal-action set for the AI.
///
/// All landings come first and are never dropped. Walls are scanned over a
/// `wall_window` square of intersections centred on `focus` (usually the
/// opponent's pawn), horizontal before vertical at each intersection, until
/// the list holds `max_candidates` actions.
pub fn candidate_actions(
    board: &Board,
    goals: &[Goal],
    player: usize,
    walls_remaining: u32,
    focus: Position,
    limits: CandidateLimits,
) -> Vec<Action> {
    let mut actions: Vec<Action> = legal_move_destinations(board, player)
        .into_iter()
        .map(Action::MoveTo)
        .collect();

    if walls_remaining == 0 || limits.wall_window == 0 {
        return actions;
    }

    let last_anchor = board.size() as i32 - 2;
    let half = (limits.wall_window / 2) as i32;
    let span = limits.wall_window as i32 - 1;
    let rows = (focus.row - half).max(0)..=(focus.row - half + span).min(last_anchor);
    let cols = (focus.col - half).max(0)..=(focus.col - half + span).min(last_anchor);

    'scan: for row in rows {
        for col in cols.clone() {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                if actions.len() >= limits.max_candidates {
                    break 'scan;
                }
                let wall = WallSegment::new(row, col, orientation, player);
                if can_place_wall(board, goals, wall).is_ok() {
                    actions.push(Action::wall(row, col, orientation));
                }
            }
        }
    }

    actions
}
