use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for layout IO and session construction.
pub enum MdpError {
    #[error("layout file access failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("layout YAML is malformed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("start cell ({row}, {col}) lies outside the grid")]
    StartOutOfBounds { row: usize, col: usize },

    #[error("start cell ({row}, {col}) is not a floor cell")]
    StartNotFloor { row: usize, col: usize },
}
