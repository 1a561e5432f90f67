use log::debug;

use crate::solver::{EscapeGrid, ScalarGrid, Solver};

pub mod complex;
pub mod coord;
pub mod grid;
pub mod painter;
pub mod solver;
pub mod threads;

pub use crate::coord::{Axis, Viewport};
pub use crate::grid::{ConfigError, GridParams, GridResult, PixelResult};

/// Classifies every pixel of a `width` x `height` grid over `region`, in
/// row-major order. Validates `params` before any computation; the work is
/// spread across a worker pool, one row band per worker.
pub fn generate(params: GridParams, region: &Viewport) -> Result<GridResult, ConfigError> {
    let (width, height, max_iterations) = params.checked()?;
    debug!(
        "generating {}x{} grid, iteration budget {}",
        width, height, max_iterations
    );
    let state = ScalarGrid::initialize(width, height, max_iterations, region);
    Ok(solver::default_solver().solve(state).into_result())
}

/// [`generate`] over the default region: real axis [-2, 1], imaginary [-1, 1].
pub fn generate_default(params: GridParams) -> Result<GridResult, ConfigError> {
    generate(params, &Viewport::default())
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;
    use crate::solver::ScalarSolver;

    #[test]
    fn covers_the_full_grid_exactly_once() {
        let grid = generate_default(GridParams::new(8, 5, 25)).unwrap();
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.pixels().len(), 40);
        let coords: HashSet<(u32, u32)> = grid.pixels().iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords.len(), 40);
    }

    #[test]
    fn pixels_come_out_row_major() {
        let grid = generate_default(GridParams::new(3, 2, 10)).unwrap();
        let coords: Vec<(u32, u32)> = grid.pixels().iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn repeat_runs_are_bit_identical() {
        let params = GridParams::new(16, 11, 40);
        assert_eq!(
            generate_default(params).unwrap(),
            generate_default(params).unwrap()
        );
    }

    #[test]
    fn zero_budget_marks_everything_in_the_set() {
        let grid = generate_default(GridParams::new(6, 4, 0)).unwrap();
        for pixel in grid.pixels() {
            assert!(!pixel.escaped);
            assert_eq!(pixel.iterations, 0);
        }
    }

    #[test]
    fn origin_pixel_never_escapes() {
        // Pixel (2, 1) of a 3x2 default-region grid samples c = (0, 0).
        let grid = generate_default(GridParams::new(3, 2, 75)).unwrap();
        let pixel = grid.get(2, 1);
        assert_eq!((pixel.iterations, pixel.escaped), (75, false));
    }

    #[test]
    fn invalid_params_fail_before_any_work() {
        assert_eq!(
            generate_default(GridParams::new(0, 10, 5)),
            Err(ConfigError::NonPositiveWidth(0))
        );
        assert_eq!(
            generate_default(GridParams::new(10, -5, 5)),
            Err(ConfigError::NonPositiveHeight(-5))
        );
        assert_eq!(
            generate_default(GridParams::new(10, 10, -1)),
            Err(ConfigError::NegativeMaxIterations(-1))
        );
    }

    #[test]
    fn single_pixel_grid_samples_the_region_corner() {
        let grid = generate_default(GridParams::new(1, 1, 1)).unwrap();
        let pixel = grid.get(0, 0);
        assert_eq!((pixel.x, pixel.y), (0, 0));
        // (-2, -1) escapes on the first update.
        assert_eq!((pixel.iterations, pixel.escaped), (1, true));
    }

    #[test]
    fn two_by_one_grid_with_budget_one() {
        let grid = generate_default(GridParams::new(2, 1, 1)).unwrap();
        // (0,0) samples c = (-2, -1): |z1|² = 5 after one update.
        let left = grid.get(0, 0);
        assert_eq!((left.iterations, left.escaped), (1, true));
        // (1,0) samples c = (-0.5, -1): |z1|² = 1.25, budget exhausted.
        let right = grid.get(1, 0);
        assert_eq!((right.iterations, right.escaped), (1, false));
    }

    #[test]
    fn arrays_reconstruct_the_2d_grid() {
        let grid = generate_default(GridParams::new(5, 3, 20)).unwrap();
        let iterations = grid.iterations();
        assert_eq!(iterations.dim(), (3, 5));
        assert_eq!(iterations[[2, 4]], grid.get(4, 2).iterations);
        let escaped = grid.escaped();
        assert_eq!(escaped[[0, 0]], grid.get(0, 0).escaped);
    }

    #[test]
    fn threaded_and_single_threaded_agree() {
        let region = Viewport::default();
        let single = ScalarSolver
            .solve(ScalarGrid::initialize(9, 7, 50, &region))
            .into_result();
        let pooled = ScalarSolver
            .threaded(3)
            .solve(ScalarGrid::initialize(9, 7, 50, &region))
            .into_result();
        assert_eq!(single, pooled);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn remote_payloads_round_trip() {
        let params = GridParams::new(4, 2, 12);
        let encoded = serde_json::to_string(&params).unwrap();
        let decoded: GridParams = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, params);

        let grid = generate_default(params).unwrap();
        let encoded = serde_json::to_string(&grid).unwrap();
        let decoded: GridResult = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, grid);
    }
}
