//! Cardinal directions and fixed per-direction storage
//!
//! Directions are ordered clockwise starting at `Up`. Grid coordinates grow
//! rightwards in `x` and downwards in `y`, so `Up` is a step of `y - 1`.

use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the four cardinal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Towards the last column
    Right,
    /// Towards the last row
    Down,
    /// Towards column 0
    Left,
}

impl Direction {
    /// All directions in clockwise order starting at `Up`
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Position of the direction in the clockwise cycle
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Direction at a position of the clockwise cycle, wrapping modulo 4
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            _ => Self::Left,
        }
    }

    /// Up and Down swap, Right and Left swap
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// The direction `steps` quarter turns clockwise from this one
    pub const fn rotated(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps % 4)
    }

    /// Single bit used by connection masks
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Grid step `(dx, dy)` taken when moving in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// One value per direction
///
/// Used for adjacency tables and border flags so lookups by `Direction`
/// never go through a fallible slice index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectionMap<T> {
    up: T,
    right: T,
    down: T,
    left: T,
}

impl<T> DirectionMap<T> {
    /// Build a map from explicit values in clockwise order
    pub const fn new(up: T, right: T, down: T, left: T) -> Self {
        Self {
            up,
            right,
            down,
            left,
        }
    }

    /// Build a map by evaluating `f` for every direction
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self {
            up: f(Direction::Up),
            right: f(Direction::Right),
            down: f(Direction::Down),
            left: f(Direction::Left),
        }
    }

    /// Value stored for `direction`
    pub const fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::Up => &self.up,
            Direction::Right => &self.right,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
        }
    }

    /// Mutable value stored for `direction`
    pub const fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
        }
    }

    /// Iterate `(direction, value)` pairs in clockwise order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL
            .into_iter()
            .map(move |direction| (direction, self.get(direction)))
    }
}

impl<T> Index<Direction> for DirectionMap<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        self.get(direction)
    }
}

impl<T> IndexMut<Direction> for DirectionMap<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        self.get_mut(direction)
    }
}
