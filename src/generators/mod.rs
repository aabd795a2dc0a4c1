pub mod backtracker;

use crate::grids::wall_grid::WallGrid;
use crate::grids::Direction;

/// What a single call to [`Generator::step_generation`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The wall between `from` and `to` was opened and `to` became the active cell.
    Carved {
        from: (usize, usize),
        to: (usize, usize),
        direction: Direction,
    },
    /// Dead end, the cell was dropped from the path.
    Backtracked((usize, usize)),
    /// Nothing left to do.
    Finished,
}

pub trait Generator {
    fn step_generation(&mut self) -> Step;
    fn next_step(&mut self) -> &WallGrid;
    fn generate_maze(&mut self) -> &WallGrid;
    fn is_done(&self) -> bool;
}
