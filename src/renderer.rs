use crate::generators::backtracker::Backtracker;
use crate::grids::{Direction, GridError};
use rand::Rng;

pub const DEFAULT_CELL_WIDTH: usize = 3;

const CORNER: char = '+';
const HORIZONTAL_WALL: char = '-';
const VERTICAL_WALL: char = '|';

/// Fill used for each kind of cell, in order of precedence.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub current: char,
    pub active_path: char,
    pub unconstructed: char,
    pub carved: char,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            current: '@',
            active_path: 'o',
            unconstructed: '#',
            carved: '.',
        }
    }
}

/// Draws a generator's grid as text using only its read-only queries.
pub struct TextRenderer {
    pub cell_width: usize,
    pub palette: Palette,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::with_cell_width(DEFAULT_CELL_WIDTH)
    }

    pub fn with_cell_width(cell_width: usize) -> Self {
        Self {
            cell_width: cell_width.max(1),
            palette: Palette::default(),
        }
    }

    fn fill_of<R: Rng>(&self, gen: &Backtracker<R>, x: usize, y: usize) -> Result<char, GridError> {
        let fill = if gen.is_current(x, y) {
            self.palette.current
        } else if gen.is_on_active_path(x, y) {
            self.palette.active_path
        } else if gen.is_unconstructed(x, y)? {
            self.palette.unconstructed
        } else {
            // constructed and off the path means it was backtracked over
            self.palette.carved
        };
        Ok(fill)
    }

    fn horizontal_edge<R: Rng>(
        &self,
        out: &mut String,
        gen: &Backtracker<R>,
        y: usize,
        side: Direction,
    ) -> Result<(), GridError> {
        out.push(CORNER);
        for x in 0..gen.grid().width() {
            let segment = if gen.has_wall(x, y, side)? {
                HORIZONTAL_WALL
            } else {
                ' '
            };
            out.extend(std::iter::repeat(segment).take(self.cell_width));
            out.push(CORNER);
        }
        out.push('\n');
        Ok(())
    }

    pub fn render<R: Rng>(&self, gen: &Backtracker<R>) -> Result<String, GridError> {
        let grid = gen.grid();
        let row_len = grid.width() * (self.cell_width + 1) + 2;
        let mut out = String::with_capacity(row_len * (grid.height() * 2 + 1));

        for y in 0..grid.height() {
            self.horizontal_edge(&mut out, gen, y, Direction::North)?;

            for x in 0..grid.width() {
                if x == 0 {
                    out.push(if gen.has_wall(x, y, Direction::West)? {
                        VERTICAL_WALL
                    } else {
                        ' '
                    });
                }
                let fill = self.fill_of(gen, x, y)?;
                out.extend(std::iter::repeat(fill).take(self.cell_width));
                out.push(if gen.has_wall(x, y, Direction::East)? {
                    VERTICAL_WALL
                } else {
                    ' '
                });
            }
            out.push('\n');
        }
        self.horizontal_edge(&mut out, gen, grid.height() - 1, Direction::South)?;

        Ok(out)
    }

    /// Single status line shown under the maze while animating.
    pub fn status<R: Rng>(&self, gen: &Backtracker<R>) -> String {
        let grid = gen.grid();
        let mut line = format!(
            "step {:>6} | constructed {}/{} | path depth {}",
            gen.steps_taken(),
            grid.constructed_count(),
            grid.size(),
            gen.frontier().len()
        );
        if gen.is_finished() {
            line.push_str(" | done");
        }
        line
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}
