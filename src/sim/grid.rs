//! Grid geometry: cells, directions and the random source
//!
//! The board is a square torus: leaving one edge re-enters from the opposite
//! edge, so every neighbour of a cell is another valid cell.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// A tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbour one step in `direction`, wrapped onto a `tiles`×`tiles` board
    pub fn stepped(self, direction: Direction, tiles: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: (self.x + dx + tiles).rem_euclid(tiles),
            y: (self.y + dy + tiles).rem_euclid(tiles),
        }
    }

    /// Whether the cell lies on a `tiles`×`tiles` board
    pub fn in_bounds(self, tiles: i32) -> bool {
        (0..tiles).contains(&self.x) && (0..tiles).contains(&self.y)
    }
}

/// Heading of the snake
///
/// `Neutral` is only ever the initial heading, before the first input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Neutral,
}

impl Direction {
    /// The four directions an obstacle may drift in
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (dx, dy) per tick; y grows downward as on the canvas
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Neutral => (0, 0),
        }
    }

    /// True when turning from `self` to `other` would be a 180° reversal
    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    pub fn is_neutral(self) -> bool {
        self == Direction::Neutral
    }
}

/// Uniform randomness consumed by the simulation
///
/// Production code uses a seeded [`Pcg32`]; tests can script exact draws.
pub trait RandomSource {
    /// Uniform integer in `0..n` (`n > 0`)
    fn below(&mut self, n: u32) -> u32;

    /// Bernoulli trial succeeding with probability `p`
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform cell on a `tiles`×`tiles` board
    fn cell(&mut self, tiles: i32) -> Cell {
        let n = tiles as u32;
        Cell::new(self.below(n) as i32, self.below(n) as i32)
    }

    /// Uniform cardinal direction
    fn cardinal(&mut self) -> Direction {
        Direction::CARDINALS[self.below(4) as usize]
    }
}

impl RandomSource for Pcg32 {
    fn below(&mut self, n: u32) -> u32 {
        self.random_range(0..n)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.random_bool(p.clamp(0.0, 1.0))
    }
}
