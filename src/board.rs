//! Board model: pawn positions and wall-blocked edges. No game rules live here.

use std::fmt;

use ndarray::Array2;

use crate::error::RuleError;
use crate::grid::{Cell, CellView, Direction, Position, WallSegment};

/// Grid state for one match.
///
/// Blocked edges are kept in two boolean planes:
/// - `blocked_south[[r, c]]` is the edge between `(r, c)` and `(r + 1, c)`, shape (N-1, N)
/// - `blocked_east[[r, c]]` is the edge between `(r, c)` and `(r, c + 1)`, shape (N, N-1)
///
/// `Clone` is a deep copy; see [`Board::snapshot_copy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    pawns: Vec<Position>,
    blocked_south: Array2<bool>,
    blocked_east: Array2<bool>,
    walls: Vec<WallSegment>,
}

impl Board {
    /// Create an empty board with one pawn per entry of `starts`.
    pub fn new(size: usize, starts: &[Position]) -> Self {
        assert!(size >= 2, "board must be at least 2x2");
        Self {
            size,
            pawns: starts.to_vec(),
            blocked_south: Array2::from_elem((size - 1, size), false),
            blocked_east: Array2::from_elem((size, size - 1), false),
            walls: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_players(&self) -> usize {
        self.pawns.len()
    }

    pub fn pawn_position(&self, player: usize) -> Position {
        self.pawns[player]
    }

    /// Relocate a pawn. The caller has already validated the move.
    pub fn move_pawn(&mut self, player: usize, pos: Position) {
        debug_assert!(pos.in_bounds(self.size));
        self.pawns[player] = pos;
    }

    /// Block the two unit edges covered by `wall`.
    ///
    /// Only the placeable-grid bounds are checked here; overlap and path rules
    /// belong to [`crate::validation::can_place_wall`].
    pub fn place_wall_segment(&mut self, wall: WallSegment) -> Result<(), RuleError> {
        if !wall.in_bounds(self.size) {
            return Err(RuleError::OutOfBounds);
        }
        for (a, b) in wall.blocked_edges() {
            self.set_edge(a, b, true);
        }
        self.walls.push(wall);
        Ok(())
    }

    pub fn walls(&self) -> &[WallSegment] {
        &self.walls
    }

    /// True if no step is possible between `a` and `b`.
    ///
    /// Cells that are not 4-adjacent, or that lie off the board, are never connected.
    pub fn is_edge_blocked(&self, a: Position, b: Position) -> bool {
        if !a.in_bounds(self.size) || !b.in_bounds(self.size) {
            return true;
        }
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let index = [first.row as usize, first.col as usize];
        match (second.row - first.row, second.col - first.col) {
            (1, 0) => self.blocked_south[index],
            (0, 1) => self.blocked_east[index],
            _ => true,
        }
    }

    pub fn occupant(&self, pos: Position) -> Cell {
        match self.pawns.iter().position(|&p| p == pos) {
            Some(player) => Cell::Pawn(player),
            None => Cell::Empty,
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.pawns.contains(&pos)
    }

    /// Deep, alias-free copy for speculative exploration.
    pub fn snapshot_copy(&self) -> Board {
        self.clone()
    }

    pub fn cell_view(&self, pos: Position) -> CellView {
        let mut blocked = [false; 4];
        for direction in Direction::ALL {
            blocked[direction.side_index()] = self.is_edge_blocked(pos, pos.step(direction));
        }
        CellView {
            occupant: self.occupant(pos),
            blocked,
        }
    }

    /// Per-cell view of the whole board, indexed `[[row, col]]`.
    pub fn snapshot(&self) -> Array2<CellView> {
        Array2::from_shape_fn((self.size, self.size), |(row, col)| {
            self.cell_view(Position::new(row as i32, col as i32))
        })
    }

    fn set_edge(&mut self, a: Position, b: Position, blocked: bool) {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let index = [first.row as usize, first.col as usize];
        if second.row > first.row {
            self.blocked_south[index] = blocked;
        } else {
            self.blocked_east[index] = blocked;
        }
    }
}

impl fmt::Display for Board {
    /// ASCII board: `=` marks a horizontal wall, `#` a vertical one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size as i32;

        write!(f, "   ")?;
        for col in 0..n {
            write!(f, "{:^4}", col)?;
        }
        writeln!(f)?;

        for row in 0..n {
            write!(f, "   ")?;
            for col in 0..n {
                let above = Position::new(row - 1, col);
                let here = Position::new(row, col);
                let wall = row > 0 && self.is_edge_blocked(above, here);
                write!(f, "+{}", if wall { "===" } else { "---" })?;
            }
            writeln!(f, "+")?;

            write!(f, "{:>2} ", row)?;
            for col in 0..n {
                let here = Position::new(row, col);
                let left = Position::new(row, col - 1);
                let wall = col > 0 && self.is_edge_blocked(left, here);
                let pawn = match self.occupant(here) {
                    Cell::Pawn(player) => format!(" {} ", player + 1),
                    Cell::Empty => "   ".to_string(),
                };
                write!(f, "{}{}", if wall { '#' } else { '|' }, pawn)?;
            }
            writeln!(f, "|")?;
        }

        write!(f, "   ")?;
        for _ in 0..n {
            write!(f, "+---")?;
        }
        writeln!(f, "+")
    }
}
