use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense row-major index of a grid cell (`row * cols + col`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateIndex(usize);

impl StateIndex {
    /// Return the underlying cell index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for StateIndex {
    fn from(value: usize) -> Self {
        StateIndex(value)
    }
}

/// A `(row, col)` coordinate inside a grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Canonical `"row,col"` key used by keyed value/policy maps.
    pub fn key(&self) -> String {
        format!("{},{}", self.row, self.col)
    }

    /// Parse a `"row,col"` key. Surrounding whitespace is not accepted.
    pub fn parse_key(key: &str) -> Option<Position> {
        let (row, col) = key.split_once(',')?;
        Some(Position {
            row: row.parse().ok()?,
            col: col.parse().ok()?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}
