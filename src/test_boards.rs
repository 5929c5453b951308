//! ASCII board fixtures for unit tests.
//!
//! Format:
//! - `1`..`4`: pawn of player 0..3
//! - `.`: empty cell
//! - `*`: empty cell marked as an expected landing square
//! - `|`: vertical wall to the right of the cell (anchored on the first row it appears in)
//! - `-`: horizontal wall below the previous cell row (anchored on the first column it appears in)
//! - ` `, `+`: formatting, ignored
//!
//! Walls are drawn over both of the edges they block, so the second half of a
//! wall is skipped when it would overlap the first.

use crate::board::Board;
use crate::grid::{Orientation, Position, WallSegment};
use crate::players::{seats, Goal};

pub struct TestBoard {
    pub board: Board,
    pub goals: Vec<Goal>,
    pub marked: Vec<Position>,
}

pub fn parse_board(board_str: &str) -> TestBoard {
    let lines: Vec<&str> = board_str.lines().filter(|l| !l.trim().is_empty()).collect();

    let num_leading_spaces = lines
        .iter()
        .map(|line| line.chars().take_while(|c| *c == ' ').count())
        .min()
        .unwrap_or(0);
    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| line[num_leading_spaces..].trim_end())
        .collect();

    let is_cell_row = |line: &str| line.chars().any(|c| "1234.*".contains(c));
    let size = stripped.iter().filter(|l| is_cell_row(l)).count();

    let mut pawns: Vec<Option<Position>> = vec![None; 4];
    let mut marked = Vec::new();
    let mut walls: Vec<WallSegment> = Vec::new();
    let add_wall = |wall: WallSegment, walls: &mut Vec<WallSegment>| {
        if wall.in_bounds(size) && !walls.iter().any(|w| w.overlaps(&wall)) {
            walls.push(wall);
        }
    };

    let mut row_n: i32 = 0;
    for line in stripped {
        if is_cell_row(line) {
            for (ch_i, ch) in line.chars().enumerate() {
                let col_n = (ch_i / 2) as i32;
                if ch_i % 2 == 0 {
                    let pos = Position::new(row_n, col_n);
                    match ch {
                        '1'..='4' => pawns[ch as usize - '1' as usize] = Some(pos),
                        '*' => marked.push(pos),
                        '.' => {}
                        _ => panic!("Invalid character '{ch}' in cell row: '{line}'"),
                    }
                } else {
                    match ch {
                        '|' => add_wall(
                            WallSegment::new(row_n, col_n, Orientation::Vertical, 0),
                            &mut walls,
                        ),
                        ' ' => {}
                        _ => panic!("Invalid character '{ch}' in cell row: '{line}'"),
                    }
                }
            }
            row_n += 1;
        } else {
            for (ch_i, ch) in line.chars().enumerate() {
                match ch {
                    '-' if ch_i % 2 == 0 => add_wall(
                        WallSegment::new(row_n - 1, (ch_i / 2) as i32, Orientation::Horizontal, 0),
                        &mut walls,
                    ),
                    ' ' | '+' => {}
                    _ => panic!("Invalid character '{ch}' in wall row: '{line}'"),
                }
            }
        }
    }

    let num_players = pawns.iter().rposition(|p| p.is_some()).map_or(0, |i| i + 1);
    assert!(num_players >= 2, "Test board needs at least two pawns");
    let positions: Vec<Position> = pawns[..num_players]
        .iter()
        .map(|p| p.expect("Pawns must be numbered consecutively"))
        .collect();
    let goals = seats(size, 4)
        .into_iter()
        .take(num_players)
        .map(|seat| seat.goal)
        .collect();

    let mut board = Board::new(size, &positions);
    for wall in walls {
        board
            .place_wall_segment(wall)
            .expect("Test wall out of bounds");
    }

    TestBoard {
        board,
        goals,
        marked,
    }
}
