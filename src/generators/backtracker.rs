use crate::generators::{Generator, Step};
use crate::grids::wall_grid::WallGrid;
use crate::grids::{Direction, GridError};
use fnv::FnvHashSet;
use log::{debug, info, trace};
use rand::prelude::*;

/// Randomized depth-first search ("recursive backtracker") maze generator.
///
/// Carving happens one step at a time so a driver can draw the grid in between.
/// The frontier is the path from the starting cell to the active cell: every step
/// either pushes a freshly carved neighbour onto it or pops a dead end off it.
/// Generation is over once the frontier is empty, at which point every cell has
/// been carved into a perfect maze.
pub struct Backtracker<R: Rng = ThreadRng> {
    grid: WallGrid,
    frontier: Vec<(usize, usize)>,
    // mirrors the frontier for O(1) membership checks while rendering
    on_path: FnvHashSet<(usize, usize)>,
    carved: FnvHashSet<(usize, usize)>,
    rng: R,
    steps: usize,
}

impl<R: Rng> Backtracker<R> {
    /// Creates a generator over a `width` x `height` grid, starting from a cell chosen
    /// uniformly with `rng`.
    pub fn new(width: usize, height: usize, mut rng: R) -> Result<Self, GridError> {
        let mut grid = WallGrid::with_dims(width, height)?;

        let start = (rng.gen_range(0, width), rng.gen_range(0, height));
        grid.mark_constructed(start.0, start.1)?;
        debug!("backtracker on {}x{} grid starting at {:?}", width, height, start);

        let mut on_path = FnvHashSet::default();
        on_path.insert(start);

        Ok(Self {
            grid,
            frontier: vec![start],
            on_path,
            carved: FnvHashSet::default(),
            rng,
            steps: 0,
        })
    }

    /// Advances generation by one push or one pop. A no-op once finished.
    pub fn step(&mut self) -> Step {
        let current = match self.frontier.last() {
            Some(&current) => current,
            None => return Step::Finished,
        };
        self.steps += 1;

        let candidates = self.unconstructed_neighbours(current);
        let direction = match candidates.choose(&mut self.rng) {
            Some(&direction) => direction,
            None => {
                self.frontier.pop();
                self.on_path.remove(&current);
                self.carved.insert(current);
                trace!("backtracked from {:?}", current);

                if self.frontier.is_empty() {
                    info!(
                        "maze of {} cells finished after {} steps",
                        self.grid.size(),
                        self.steps
                    );
                }
                return Step::Backtracked(current);
            }
        };

        let next = match self.grid.remove_wall(current.0, current.1, direction) {
            Ok(next) => next,
            Err(err) => unreachable!("carved toward a missing neighbour: {}", err),
        };
        if let Err(err) = self.grid.mark_constructed(next.0, next.1) {
            unreachable!("carved into a missing cell: {}", err);
        }
        self.frontier.push(next);
        self.on_path.insert(next);
        trace!("carved {} from {:?} to {:?}", direction, current, next);

        Step::Carved {
            from: current,
            to: next,
            direction,
        }
    }

    fn unconstructed_neighbours(&self, (x, y): (usize, usize)) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&side| match self.grid.neighbour(x, y, side) {
                Some((nx, ny)) => match self.grid.cell_at(nx, ny) {
                    Ok(cell) => cell.is_unconstructed(),
                    Err(err) => unreachable!("neighbour lookup left the grid: {}", err),
                },
                None => false,
            })
            .collect()
    }
}

impl Backtracker<StdRng> {
    /// Reproducible generator, the same seed always carves the same maze.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self, GridError> {
        Self::new(width, height, StdRng::seed_from_u64(seed))
    }
}

impl Backtracker<ThreadRng> {
    pub fn from_entropy(width: usize, height: usize) -> Result<Self, GridError> {
        Self::new(width, height, rand::thread_rng())
    }
}

impl<R: Rng> Backtracker<R> {
    #[inline]
    pub fn grid(&self) -> &WallGrid {
        &self.grid
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Top of the frontier, `None` once finished.
    #[inline]
    pub fn current(&self) -> Option<(usize, usize)> {
        self.frontier.last().copied()
    }

    pub fn is_current(&self, x: usize, y: usize) -> bool {
        self.current() == Some((x, y))
    }

    pub fn is_on_active_path(&self, x: usize, y: usize) -> bool {
        self.on_path.contains(&(x, y))
    }

    /// Whether the cell has been backtracked over at least once. Only used for drawing,
    /// carving decisions look at the grid's unconstructed marker.
    pub fn is_carved(&self, x: usize, y: usize) -> bool {
        self.carved.contains(&(x, y))
    }

    /// The current path, starting cell first.
    pub fn frontier(&self) -> &[(usize, usize)] {
        &self.frontier
    }

    /// Calls to [`Backtracker::step`] that changed anything.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn has_wall(&self, x: usize, y: usize, side: Direction) -> Result<bool, GridError> {
        self.grid.has_wall(x, y, side)
    }

    pub fn is_unconstructed(&self, x: usize, y: usize) -> Result<bool, GridError> {
        self.grid.is_unconstructed(x, y)
    }
}

impl<R: Rng> Generator for Backtracker<R> {
    fn step_generation(&mut self) -> Step {
        self.step()
    }

    fn next_step(&mut self) -> &WallGrid {
        self.step();
        &self.grid
    }

    fn generate_maze(&mut self) -> &WallGrid {
        while !self.is_finished() {
            self.step();
        }
        &self.grid
    }

    fn is_done(&self) -> bool {
        self.is_finished()
    }
}
