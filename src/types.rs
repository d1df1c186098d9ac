//! Coordinate and direction primitives for the 8x8 board.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board side length.
pub const BOARD_SIZE: usize = 8;

/// Move points granted to a player at the start of each turn.
pub const MOVE_POINTS_PER_TURN: u8 = 4;

/// The four fixed trap squares.
pub const TRAP_SQUARES: [Coord; 4] = [
    Coord::from_raw(2, 2),
    Coord::from_raw(2, 5),
    Coord::from_raw(5, 2),
    Coord::from_raw(5, 5),
];

/// A validated board coordinate. `row` and `col` both run 0-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    /// Create a new coordinate, validating it's within board bounds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidCoordinate`] if either axis is >= 8.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Coord { row, col })
        } else {
            Err(crate::Error::InvalidCoordinate { row, col })
        }
    }

    /// Create a coordinate from raw values without validation. Intended for
    /// known-good constants; out-of-range values corrupt board indexing.
    pub const fn from_raw(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// Get the row index.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Get the column index.
    pub fn col(&self) -> usize {
        self.col
    }

    /// The neighboring coordinate one step in `direction`, if it stays on the board.
    pub fn step(self, direction: Direction) -> Option<Coord> {
        let (row_delta, col_delta) = direction.offset();
        let row = self.row as isize + row_delta;
        let col = self.col as isize + col_delta;
        if (0..BOARD_SIZE as isize).contains(&row) && (0..BOARD_SIZE as isize).contains(&col) {
            Some(Coord {
                row: row as usize,
                col: col as usize,
            })
        } else {
            None
        }
    }

    /// In-bounds orthogonal neighbors, in [`Direction::ALL`] order.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.step(direction))
    }

    /// Whether this coordinate is one of the four fixed trap squares.
    pub fn is_trap(&self) -> bool {
        TRAP_SQUARES.contains(self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One orthogonal step direction. `North` points toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All four directions, in the fixed enumeration order used throughout the crate.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The (row, col) delta of one step in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }
}
