// Core engine for Conway's Game of Life.
//
// This crate is a pure computation library: it knows nothing about
// rendering, input or animation loops. An external driver holds the
// current grid and calls `evolve` in a loop.

mod cell;
mod error;
mod grid;
mod patterns;
mod rules;

// Re-exports for convenience
pub use cell::Cell;
pub use error::Error;
pub use grid::Grid;
pub use patterns::{Pattern, presets};
pub use rules::{ConwayRule, Rule, default_rule};
