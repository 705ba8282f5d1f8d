use serde::{Deserialize, Serialize};

use crate::{Grid, Position};

/// Declarative grid description: size, special cells, and an optional start.
///
/// Coordinates are signed so that out-of-range entries (including negative
/// ones) can be expressed and are then ignored when the grid is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub walls: Vec<(i64, i64)>,
    #[serde(default)]
    pub goals: Vec<(i64, i64)>,
    #[serde(default)]
    pub traps: Vec<(i64, i64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_start: Option<(i64, i64)>,
}

impl GridLayout {
    /// An all-floor layout with no start cell.
    pub fn new(rows: usize, cols: usize) -> Self {
        GridLayout {
            rows,
            cols,
            walls: Vec::new(),
            goals: Vec::new(),
            traps: Vec::new(),
            agent_start: None,
        }
    }

    /// The 6x8 maze used by the solver walkthroughs.
    pub fn medium() -> Self {
        GridLayout {
            rows: 6,
            cols: 8,
            walls: vec![
                (0, 3),
                (1, 1),
                (1, 3),
                (1, 5),
                (1, 6),
                (3, 1),
                (3, 2),
                (3, 4),
                (3, 5),
                (5, 1),
                (5, 2),
                (5, 4),
            ],
            goals: vec![(5, 7)],
            traps: vec![(3, 7)],
            agent_start: Some((0, 0)),
        }
    }

    /// A single-row corridor with the goal in the last column.
    pub fn corridor(len: usize) -> Self {
        let mut layout = GridLayout::new(1, len);
        if len > 0 {
            layout.goals.push((0, len as i64 - 1));
        }
        layout.agent_start = Some((0, 0));
        layout
    }

    /// Build the dense grid for this layout.
    pub fn to_grid(&self) -> Grid {
        Grid::from_layout(self)
    }

    /// The start cell, if one is set and lies inside the grid.
    pub fn start_position(&self) -> Option<Position> {
        let (row, col) = self.agent_start?;
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(Position::new(row as usize, col as usize))
    }
}
