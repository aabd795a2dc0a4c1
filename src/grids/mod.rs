pub mod wall_grid;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Bit used for this side in a cell's wall mask.
    #[inline]
    pub fn wall_bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Coordinate one step away in this direction, `None` when it leaves the `usize` range.
    /// The grid's own bounds are the grid's business.
    pub fn offset(self, x: usize, y: usize) -> Option<(usize, usize)> {
        match self {
            Direction::North => y.checked_sub(1).map(|y| (x, y)),
            Direction::South => y.checked_add(1).map(|y| (x, y)),
            Direction::East => x.checked_add(1).map(|x| (x, y)),
            Direction::West => x.checked_sub(1).map(|x| (x, y)),
        }
    }

    /// Like [`Direction::offset`] but wraps at both ends of the `usize` range, so a
    /// missing neighbour shows up as an out of range coordinate.
    #[inline]
    pub(crate) fn wrapping_offset(self, x: usize, y: usize) -> (usize, usize) {
        match self {
            Direction::North => (x, y.wrapping_sub(1)),
            Direction::South => (x, y.wrapping_add(1)),
            Direction::East => (x.wrapping_add(1), y),
            Direction::West => (x.wrapping_sub(1), y),
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Self::Output {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A grid needs at least one row and one column.
    InvalidDimension { width: usize, height: usize },
    OutOfBounds { x: usize, y: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::InvalidDimension { width, height } => write!(
                f,
                "invalid grid dimensions {}x{}, both must be greater than 0",
                width, height
            ),
            GridError::OutOfBounds { x, y } => {
                write!(f, "cell ({}, {}) is outside the grid", x, y)
            }
        }
    }
}

impl std::error::Error for GridError {}
