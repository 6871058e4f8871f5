use serde::Serialize;
use std::fmt;
use std::ops::{Add, Sub};

/// Side length of the board.
pub const SIZE: usize = 3;
/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

/// Cell coordinate, `x` is the column and `y` the row (row 0 at the top).
#[derive(Serialize, Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vec2D {
    pub x: i16,
    pub y: i16,
}

impl Vec2D {
    pub fn new(x: i16, y: i16) -> Vec2D {
        Vec2D { x, y }
    }

    /// Coordinate of the cell at row-major `index`.
    pub fn from_index(index: usize) -> Vec2D {
        Vec2D::new((index % SIZE) as i16, (index / SIZE) as i16)
    }

    /// Row-major index of the cell, `None` if outside of the board.
    pub fn index(self) -> Option<usize> {
        if self.within() {
            Some(self.y as usize * SIZE + self.x as usize)
        } else {
            None
        }
    }

    pub fn within(self) -> bool {
        0 <= self.x && self.x < SIZE as i16 && 0 <= self.y && self.y < SIZE as i16
    }

    pub fn apply(self, d: Direction) -> Vec2D {
        self + d.into()
    }

    pub fn manhattan(&self) -> u32 {
        self.x.unsigned_abs() as u32 + self.y.unsigned_abs() as u32
    }
}

impl From<Direction> for Vec2D {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => Vec2D::new(0, -1),
            Direction::Down => Vec2D::new(0, 1),
            Direction::Left => Vec2D::new(-1, 0),
            Direction::Right => Vec2D::new(1, 0),
        }
    }
}

impl Add for Vec2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Movement of the blank cell.
///
/// The declaration order is the enumeration order of all transitions.
/// Strategies rely on it for deterministic tie breaking.
#[derive(Serialize, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn iter() -> impl Iterator<Item = Direction> {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .iter()
        .copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

impl TryFrom<Vec2D> for Direction {
    type Error = ();

    /// Only unit steps map to a direction.
    fn try_from(p: Vec2D) -> Result<Direction, ()> {
        Direction::iter()
            .find(|&d| Vec2D::from(d) == p)
            .ok_or(())
    }
}

impl From<u8> for Direction {
    fn from(v: u8) -> Direction {
        match v & 3 {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
