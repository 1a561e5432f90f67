use crate::complex::C;
use crate::coord::Viewport;
use crate::solver::escape::{escape_time, Escape};
use crate::solver::{EscapeGrid, Solver};
use crate::threads::{Join, Split};

#[derive(Clone, Debug)]
pub struct ScalarCell {
    pub(crate) c: C<f64>,
    pub(crate) iterations: u32,
    pub(crate) escaped: bool,
}

/// Row-major grid of sample points, one cell per pixel.
#[derive(Clone, Debug)]
pub struct ScalarGrid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) max_iterations: u32,
    pub(crate) cells: Vec<ScalarCell>,
}

impl ScalarGrid {
    pub fn initialize(width: usize, height: usize, max_iterations: u32, region: &Viewport) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(ScalarCell {
                    c: region.sample(x, y, width, height),
                    iterations: 0,
                    escaped: false,
                });
            }
        }
        Self {
            width,
            height,
            max_iterations,
            cells,
        }
    }
}

impl EscapeGrid for ScalarGrid {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    fn escape(&self, x: usize, y: usize) -> Escape {
        let cell = &self.cells[y * self.width + x];
        Escape {
            iterations: cell.iterations,
            escaped: cell.escaped,
        }
    }
}

impl Split for ScalarGrid {
    fn split_to_vec(self, n: usize) -> Vec<Self> {
        let rows = self.cells.split_to_vec(self.height);
        let row_groups = rows.split_to_vec(n);

        let mut parts = Vec::with_capacity(n);
        for row_group in row_groups {
            let height = row_group.len();
            let cells = Vec::join_vec(row_group);
            parts.push(Self {
                width: self.width,
                height,
                max_iterations: self.max_iterations,
                cells,
            });
        }
        parts
    }
}

impl Join for ScalarGrid {
    fn join_vec(parts: Vec<Self>) -> Self {
        let width = parts[0].width;
        let max_iterations = parts[0].max_iterations;
        let mut height = 0;
        let mut cell_parts = Vec::with_capacity(parts.len());
        for part in parts {
            assert!(part.width == width);
            assert!(part.max_iterations == max_iterations);
            height += part.height;
            cell_parts.push(part.cells);
        }
        Self {
            width,
            height,
            max_iterations,
            cells: Vec::join_vec(cell_parts),
        }
    }
}

/// Evaluates each cell to completion with [`escape_time`], so a diverging
/// cell stops as soon as its orbit leaves the escape radius.
#[derive(Copy, Clone, Debug, Default)]
pub struct ScalarSolver;

impl Solver<ScalarGrid> for ScalarSolver {
    fn solve(&self, mut state: ScalarGrid) -> ScalarGrid {
        let max_iterations = state.max_iterations;
        for cell in &mut state.cells {
            let e = escape_time(cell.c, max_iterations);
            cell.iterations = e.iterations;
            cell.escaped = e.escaped;
        }
        state
    }
}
