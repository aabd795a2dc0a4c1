//! Step-by-step perfect maze generation with a randomized depth-first search.

pub mod generators;
pub mod grids;
pub mod renderer;

pub use generators::backtracker::Backtracker;
pub use generators::{Generator, Step};
pub use grids::wall_grid::WallGrid;
pub use grids::{Direction, GridError};
