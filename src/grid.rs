//! Value types shared by the board, the validators and the agents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// A cell on the board, 0-indexed from the top-left corner.
///
/// Coordinates are signed so that offsets past the edge can be represented
/// and rejected by a bounds check instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.offset(d_row, d_col)
    }

    pub fn manhattan(self, other: Position) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn in_bounds(self, board_size: usize) -> bool {
        let n = board_size as i32;
        self.row >= 0 && self.row < n && self.col >= 0 && self.col < n
    }

    /// Direction of a single orthogonal step from `self` to `other`, if any.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        match (other.row - self.row, other.col - self.col) {
            (-1, 0) => Some(Direction::North),
            (1, 0) => Some(Direction::South),
            (0, 1) => Some(Direction::East),
            (0, -1) => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// (row, col) delta of one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Index into `CellView::blocked`.
    pub fn side_index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }
}

impl FromStr for Direction {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" | "NORTH" | "U" | "UP" => Ok(Direction::North),
            "S" | "SOUTH" | "D" | "DOWN" => Ok(Direction::South),
            "E" | "EAST" | "R" | "RIGHT" => Ok(Direction::East),
            "W" | "WEST" | "L" | "LEFT" => Ok(Direction::West),
            _ => Err(RuleError::InvalidFormat),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn letter(self) -> char {
        match self {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        }
    }
}

impl FromStr for Orientation {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" | "HORIZONTAL" => Ok(Orientation::Horizontal),
            "V" | "VERTICAL" => Ok(Orientation::Vertical),
            _ => Err(RuleError::InvalidFormat),
        }
    }
}

/// A double-wide wall anchored on a grid intersection.
///
/// The intersection `(row, col)` is the corner shared by cells
/// `(row, col)`, `(row, col + 1)`, `(row + 1, col)` and `(row + 1, col + 1)`.
/// A horizontal wall blocks the south edges of `(row, col)` and `(row, col + 1)`;
/// a vertical wall blocks the east edges of `(row, col)` and `(row + 1, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallSegment {
    pub position: Position,
    pub orientation: Orientation,
    pub owner: usize,
}

impl WallSegment {
    pub fn new(row: i32, col: i32, orientation: Orientation, owner: usize) -> Self {
        Self {
            position: Position::new(row, col),
            orientation,
            owner,
        }
    }

    /// True if the intersection lies on the (N-1)x(N-1) placeable grid.
    pub fn in_bounds(&self, board_size: usize) -> bool {
        self.position.in_bounds(board_size.saturating_sub(1))
    }

    /// True if `self` and `other` share an intersection or any edge.
    ///
    /// Ownership does not matter.
    pub fn overlaps(&self, other: &WallSegment) -> bool {
        let a = self.position;
        let b = other.position;
        if a == b {
            // identical, or crossing at the same intersection
            return true;
        }
        if self.orientation != other.orientation {
            return false;
        }
        match self.orientation {
            Orientation::Horizontal => a.row == b.row && (a.col - b.col).abs() <= 1,
            Orientation::Vertical => a.col == b.col && (a.row - b.row).abs() <= 1,
        }
    }

    /// The two unit edges this wall blocks, as pairs of 4-adjacent cells.
    pub fn blocked_edges(&self) -> [(Position, Position); 2] {
        let p = self.position;
        match self.orientation {
            Orientation::Horizontal => [
                (p, p.offset(1, 0)),
                (p.offset(0, 1), p.offset(1, 1)),
            ],
            Orientation::Vertical => [
                (p, p.offset(0, 1)),
                (p.offset(1, 0), p.offset(1, 1)),
            ],
        }
    }
}

impl fmt::Display for WallSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.position.row,
            self.position.col,
            self.orientation.letter()
        )
    }
}

/// Occupancy of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Pawn(usize),
}

/// Read-only view of one cell for display surfaces.
///
/// `blocked` is indexed by `Direction::side_index` (N, S, E, W). Board edges
/// count as blocked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellView {
    pub occupant: Cell,
    pub blocked: [bool; 4],
}

impl CellView {
    pub fn is_blocked(&self, direction: Direction) -> bool {
        self.blocked[direction.side_index()]
    }
}
