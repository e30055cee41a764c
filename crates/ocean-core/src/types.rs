//! Core type definitions for the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the toroidal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed offset and wrap into a `rows` x `cols` torus.
    ///
    /// Works for offsets of any magnitude, including ones larger than the
    /// extent itself.
    pub fn offset(&self, dr: i64, dc: i64, rows: usize, cols: usize) -> Self {
        Self {
            row: wrap(self.row as i64 + dr, rows),
            col: wrap(self.col as i64 + dc, cols),
        }
    }

    /// Step `distance` cells in `direction`, wrapping at the edges
    pub fn step(&self, direction: Direction, distance: u32, rows: usize, cols: usize) -> Self {
        let (dr, dc) = direction.delta();
        let distance = distance as i64;
        self.offset(dr * distance, dc * distance, rows, cols)
    }

    /// Row-major index into a grid with `cols` columns
    pub fn to_index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    pub fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

fn wrap(value: i64, extent: usize) -> usize {
    value.rem_euclid(extent as i64) as usize
}

/// Orthogonal direction for movement and neighbor lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Order in which neighborhoods are scanned; the first match wins
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// (row, col) delta of a single step. Rows grow southwards.
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Slot of this direction within a neighborhood
    pub fn slot(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::West => 2,
            Direction::East => 3,
        }
    }

    /// Uniform draw over the four directions
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        match rng.gen_range(0..4) {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }
}
