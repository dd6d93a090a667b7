// error.rs - Error type shared by the grid, the engine and the driver

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// A grid needs at least one row and one column.
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds { row: usize, col: usize, rows: usize, cols: usize },

    #[error("grid shape mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    DimensionMismatch { expected: (usize, usize), actual: (usize, usize) },

    #[error("tick interval must be at least 1 ms")]
    InvalidInterval,

    #[error("pattern line {line}: {reason}")]
    InvalidPattern { line: usize, reason: String },
}
