//! All kinds of errors in this crate.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Grid construction with a zero width or height.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// Seed placement that would land outside the grid.
    #[error("cell ({x}, {y}) is outside the grid bounds")]
    OutOfBounds { x: usize, y: usize },
}
