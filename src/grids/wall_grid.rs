use crate::grids::{Dimensions, Direction, GridError};

/// One bit per side, see [`Direction::wall_bit`].
type WalledCell = u8;

const ALL_WALLS: WalledCell = 0b1111;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    walls: WalledCell,
    unconstructed: bool,
}

impl Cell {
    fn new() -> Self {
        Self {
            walls: ALL_WALLS,
            unconstructed: true,
        }
    }

    #[inline]
    pub fn has_wall(&self, side: Direction) -> bool {
        self.walls & side.wall_bit() != 0
    }

    /// True until the carving process reaches this cell.
    #[inline]
    pub fn is_unconstructed(&self) -> bool {
        self.unconstructed
    }

    #[inline]
    fn clear_wall(&mut self, side: Direction) {
        self.walls &= !side.wall_bit();
    }
}

/// Rectangular grid of walled cells, stored row-major.
#[derive(Debug, Clone)]
pub struct WallGrid {
    pub dims: Dimensions,
    cells: Vec<Cell>,
}

impl WallGrid {
    pub fn with_dims(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimension { width, height });
        }

        Ok(Self {
            dims: Dimensions { width, height },
            cells: vec![Cell::new(); width * height],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dims.size()
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if self.dims.contains(x, y) {
            Ok((self.dims.width * y) + x)
        } else {
            Err(GridError::OutOfBounds { x, y })
        }
    }

    pub fn cell_at(&self, x: usize, y: usize) -> Result<&Cell, GridError> {
        let index = self.index_of(x, y)?;
        Ok(&self.cells[index])
    }

    pub fn has_wall(&self, x: usize, y: usize, side: Direction) -> Result<bool, GridError> {
        Ok(self.cell_at(x, y)?.has_wall(side))
    }

    pub fn is_unconstructed(&self, x: usize, y: usize) -> Result<bool, GridError> {
        Ok(self.cell_at(x, y)?.is_unconstructed())
    }

    pub fn mark_constructed(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        let index = self.index_of(x, y)?;
        self.cells[index].unconstructed = false;
        Ok(())
    }

    /// In-bounds neighbour of `(x, y)` on `side`. `None` when either cell is outside the grid.
    pub fn neighbour(&self, x: usize, y: usize, side: Direction) -> Option<(usize, usize)> {
        if !self.dims.contains(x, y) {
            return None;
        }
        side.offset(x, y)
            .filter(|&(nx, ny)| self.dims.contains(nx, ny))
    }

    /// Opens the wall on `side` of `(x, y)` together with the facing wall of the neighbour.
    /// Returns the neighbour's coordinate. Nothing is touched if either cell is missing.
    pub fn remove_wall(
        &mut self,
        x: usize,
        y: usize,
        side: Direction,
    ) -> Result<(usize, usize), GridError> {
        let index = self.index_of(x, y)?;
        let (nx, ny) = side.wrapping_offset(x, y);
        let neighbour_index = self.index_of(nx, ny)?;

        self.cells[index].clear_wall(side);
        self.cells[neighbour_index].clear_wall(-side);

        Ok((nx, ny))
    }

    /// All coordinates, row by row.
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> {
        let width = self.dims.width;
        (0..self.size()).map(move |index| (index % width, index / width))
    }

    pub fn constructed_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.unconstructed).count()
    }

    /// Number of open shared walls, each passage counted once.
    pub fn open_passage_count(&self) -> usize {
        self.coordinates()
            .map(|(x, y)| {
                [Direction::South, Direction::East]
                    .iter()
                    .filter(|&&side| {
                        self.neighbour(x, y, side).is_some()
                            && !self.cells[self.dims.width * y + x].has_wall(side)
                    })
                    .count()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_grid_is_fully_walled() {
        let grid = WallGrid::with_dims(4, 3).unwrap();
        assert_eq!(grid.size(), 12);
        assert_eq!(grid.constructed_count(), 0);
        assert_eq!(grid.open_passage_count(), 0);

        for (x, y) in grid.coordinates() {
            let cell = grid.cell_at(x, y).unwrap();
            assert!(cell.is_unconstructed());
            for side in Direction::ALL.iter().copied() {
                assert!(cell.has_wall(side));
            }
        }
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            WallGrid::with_dims(0, 5).unwrap_err(),
            GridError::InvalidDimension { width: 0, height: 5 }
        );
        assert_eq!(
            WallGrid::with_dims(5, 0).unwrap_err(),
            GridError::InvalidDimension { width: 5, height: 0 }
        );
        assert!(WallGrid::with_dims(1, 1).is_ok());
    }

    #[test]
    fn cell_access_is_bounds_checked() {
        let grid = WallGrid::with_dims(3, 2).unwrap();
        assert!(grid.cell_at(2, 1).is_ok());
        assert_eq!(
            grid.cell_at(3, 0).unwrap_err(),
            GridError::OutOfBounds { x: 3, y: 0 }
        );
        assert_eq!(
            grid.cell_at(0, 2).unwrap_err(),
            GridError::OutOfBounds { x: 0, y: 2 }
        );
    }

    #[test]
    fn coordinates_are_row_major() {
        let grid = WallGrid::with_dims(3, 2).unwrap();
        let coords: Vec<_> = grid.coordinates().collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn neighbours_respect_edges() {
        let grid = WallGrid::with_dims(3, 3).unwrap();
        assert_eq!(grid.neighbour(0, 0, Direction::North), None);
        assert_eq!(grid.neighbour(0, 0, Direction::West), None);
        assert_eq!(grid.neighbour(2, 2, Direction::South), None);
        assert_eq!(grid.neighbour(2, 2, Direction::East), None);
        assert_eq!(grid.neighbour(1, 1, Direction::North), Some((1, 0)));
        assert_eq!(grid.neighbour(1, 1, Direction::East), Some((2, 1)));
    }

    #[test]
    fn neighbours_of_outside_cells_are_none() {
        let grid = WallGrid::with_dims(3, 3).unwrap();
        assert_eq!(grid.neighbour(usize::MAX, 0, Direction::East), None);
        assert_eq!(grid.neighbour(0, usize::MAX, Direction::South), None);
        // (3, 1) is outside even though its west neighbour is not
        assert_eq!(grid.neighbour(3, 1, Direction::West), None);
        assert_eq!(grid.neighbour(1, 3, Direction::North), None);
    }

    #[test]
    fn removing_a_wall_far_outside_fails() {
        let mut grid = WallGrid::with_dims(3, 3).unwrap();
        assert_eq!(
            grid.remove_wall(usize::MAX, 0, Direction::East).unwrap_err(),
            GridError::OutOfBounds { x: usize::MAX, y: 0 }
        );
        assert_eq!(grid.open_passage_count(), 0);
    }

    #[test]
    fn removing_a_wall_opens_both_sides() {
        let mut grid = WallGrid::with_dims(3, 3).unwrap();

        assert_eq!(grid.remove_wall(1, 1, Direction::North), Ok((1, 0)));
        assert!(!grid.has_wall(1, 1, Direction::North).unwrap());
        assert!(!grid.has_wall(1, 0, Direction::South).unwrap());

        assert_eq!(grid.remove_wall(1, 1, Direction::West), Ok((0, 1)));
        assert!(!grid.has_wall(1, 1, Direction::West).unwrap());
        assert!(!grid.has_wall(0, 1, Direction::East).unwrap());

        // untouched sides keep their walls
        assert!(grid.has_wall(1, 1, Direction::South).unwrap());
        assert!(grid.has_wall(1, 1, Direction::East).unwrap());
        assert!(grid.has_wall(1, 0, Direction::North).unwrap());
        assert_eq!(grid.open_passage_count(), 2);
    }

    #[test]
    fn removing_a_boundary_wall_fails_without_side_effects() {
        let mut grid = WallGrid::with_dims(2, 2).unwrap();

        assert!(grid.remove_wall(0, 0, Direction::North).is_err());
        assert!(grid.remove_wall(0, 0, Direction::West).is_err());
        assert_eq!(
            grid.remove_wall(1, 1, Direction::East).unwrap_err(),
            GridError::OutOfBounds { x: 2, y: 1 }
        );
        assert_eq!(
            grid.remove_wall(5, 5, Direction::North).unwrap_err(),
            GridError::OutOfBounds { x: 5, y: 5 }
        );

        for (x, y) in grid.coordinates() {
            for side in Direction::ALL.iter().copied() {
                assert!(grid.has_wall(x, y, side).unwrap());
            }
        }
    }

    #[test]
    fn marking_constructed_only_touches_target() {
        let mut grid = WallGrid::with_dims(2, 2).unwrap();
        grid.mark_constructed(1, 0).unwrap();

        assert!(!grid.is_unconstructed(1, 0).unwrap());
        assert!(grid.is_unconstructed(0, 0).unwrap());
        assert!(grid.is_unconstructed(0, 1).unwrap());
        assert_eq!(grid.constructed_count(), 1);
        assert!(grid.mark_constructed(2, 0).is_err());
    }
}
