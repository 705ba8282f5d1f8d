use serde::{Deserialize, Serialize};

use crate::{GridLayout, Position, StateIndex};

/// Kind of a single grid cell.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    #[default]
    Floor,
    Wall,
    Goal,
    Trap,
}

impl CellType {
    /// Goal and trap cells end an episode.
    pub fn is_terminal(self) -> bool {
        matches!(self, CellType::Goal | CellType::Trap)
    }

    pub fn is_wall(self) -> bool {
        self == CellType::Wall
    }
}

/// Dense `rows x cols` array of cell types, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellType>,
}

impl Grid {
    /// Build a grid from a layout.
    ///
    /// Walls are applied first, then goals, then traps, so a later list wins
    /// when a coordinate appears in several. Out-of-range coordinates are ignored.
    pub fn from_layout(layout: &GridLayout) -> Self {
        let mut grid = Grid {
            rows: layout.rows,
            cols: layout.cols,
            cells: vec![CellType::Floor; layout.rows * layout.cols],
        };

        for &(row, col) in &layout.walls {
            grid.set(row, col, CellType::Wall);
        }
        for &(row, col) in &layout.goals {
            grid.set(row, col, CellType::Goal);
        }
        for &(row, col) in &layout.traps {
            grid.set(row, col, CellType::Trap);
        }

        grid
    }

    /// Build a grid from explicit rows. The column count is taken from the
    /// first row; shorter rows are padded with floor and longer rows truncated.
    pub fn from_rows(rows: Vec<Vec<CellType>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut cells = Vec::with_capacity(row_count * cols);
        for mut row in rows {
            row.resize(cols, CellType::Floor);
            cells.extend(row);
        }

        Grid {
            rows: row_count,
            cols,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell type at `(row, col)`, or `None` when off-grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<CellType> {
        self.index_of(Position::new(row, col))
            .map(|index| self.cells[index.index()])
    }

    /// Row-major index of an in-bounds position.
    pub fn index_of(&self, position: Position) -> Option<StateIndex> {
        if position.row >= self.rows || position.col >= self.cols {
            return None;
        }
        Some(StateIndex::from(position.row * self.cols + position.col))
    }

    /// Coordinate of a row-major index.
    pub fn position_of(&self, index: StateIndex) -> Position {
        let cols = self.cols.max(1);
        Position::new(index.index() / cols, index.index() % cols)
    }

    /// Iterate over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellType)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.position_of(StateIndex::from(index)), *cell))
    }

    pub(crate) fn cells(&self) -> &[CellType] {
        &self.cells
    }

    fn set(&mut self, row: i64, col: i64, cell: CellType) {
        if row < 0 || col < 0 {
            return;
        }
        if let Some(index) = self.index_of(Position::new(row as usize, col as usize)) {
            self.cells[index.index()] = cell;
        }
    }
}
