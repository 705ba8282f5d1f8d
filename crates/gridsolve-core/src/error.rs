use std::fmt;

/// Error type for the up-front Monte Carlo input guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Seed-pool indexing reserves a fixed number of slots per batch.
    EpisodesPerBatchExceedsCap { requested: usize, cap: usize },
    /// The pool cannot supply one seed per episode without reuse.
    SeedPoolTooSmall { required: usize, available: usize },
    /// The fixed start cell lies outside the grid.
    StartOutOfBounds { row: usize, col: usize },
    /// The fixed start cell is a wall.
    StartNotPassable { row: usize, col: usize },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::EpisodesPerBatchExceedsCap { requested, cap } => write!(
                f,
                "episodes_per_batch {requested} exceeds the per-batch seed cap {cap}"
            ),
            SolverError::SeedPoolTooSmall {
                required,
                available,
            } => write!(
                f,
                "seed pool holds {available} seeds but the run needs {required}"
            ),
            SolverError::StartOutOfBounds { row, col } => {
                write!(f, "start cell ({row}, {col}) lies outside the grid")
            }
            SolverError::StartNotPassable { row, col } => {
                write!(f, "start cell ({row}, {col}) is a wall")
            }
        }
    }
}

impl std::error::Error for SolverError {}
