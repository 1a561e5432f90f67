use crate::grid::{GridResult, PixelResult};
use crate::threads::{Call, Join, Split, WorkerPool};

pub mod escape;
pub mod scalar;
pub mod simd;

pub use escape::{escape_time, Escape, ESCAPE_RADIUS_SQ};
pub use scalar::{ScalarGrid, ScalarSolver};
pub use simd::{SimdGrid, SimdSolver};

/// A strategy for evaluating every cell of a grid state.
pub trait Solver<T> {
    fn solve(&self, state: T) -> T;

    /// Wraps this solver in a pool of `n` worker threads, each solving one
    /// row band of the grid.
    fn threaded(self, n: usize) -> WorkerPool<T, T>
    where
        Self: Sized + Clone + Send + 'static,
        T: Send + 'static,
    {
        WorkerPool::with(n, || {
            let solver = self.clone();
            move |state| solver.solve(state)
        })
    }
}

impl<T> Solver<T> for WorkerPool<T, T>
where
    T: Split + Join + Send + 'static,
{
    fn solve(&self, state: T) -> T {
        self.call(state)
    }
}

/// A grid of escape-time cells: dimensions plus per-pixel classification,
/// assembled into a [`GridResult`] in row-major order.
pub trait EscapeGrid {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn escape(&self, x: usize, y: usize) -> Escape;

    fn into_result(self) -> GridResult
    where
        Self: Sized,
    {
        let (width, height) = (self.width(), self.height());
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let e = self.escape(x, y);
                pixels.push(PixelResult {
                    x: x as u32,
                    y: y as u32,
                    iterations: e.iterations,
                    escaped: e.escaped,
                });
            }
        }
        GridResult::new(width, height, pixels)
    }
}

pub fn default_solver() -> WorkerPool<ScalarGrid, ScalarGrid> {
    ScalarSolver.threaded(num_cpus::get_physical())
}
