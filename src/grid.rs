use std::error::Error;
use std::fmt;

use ndarray::Array2;

/// Sampling resolution and iteration budget, as supplied by the caller.
///
/// Fields are raw integers on purpose: values arrive from forms, CLIs or
/// remote payloads, and validation belongs to the core. [`crate::generate`]
/// rejects invalid values with [`ConfigError`] before any pixel is computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridParams {
    pub width: i64,
    pub height: i64,
    pub max_iterations: i64,
}

impl GridParams {
    pub fn new(width: i64, height: i64, max_iterations: i64) -> Self {
        Self {
            width,
            height,
            max_iterations,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checked().map(|_| ())
    }

    /// Validated dimensions and iteration budget. Budgets beyond `u32::MAX`
    /// are clamped here; total work gets bounded at the configuration
    /// boundary, not inside the evaluator.
    pub(crate) fn checked(&self) -> Result<(usize, usize, u32), ConfigError> {
        if self.width <= 0 {
            return Err(ConfigError::NonPositiveWidth(self.width));
        }
        if self.height <= 0 {
            return Err(ConfigError::NonPositiveHeight(self.height));
        }
        if self.max_iterations < 0 {
            return Err(ConfigError::NegativeMaxIterations(self.max_iterations));
        }
        let max_iterations = u32::try_from(self.max_iterations).unwrap_or(u32::MAX);
        Ok((self.width as usize, self.height as usize, max_iterations))
    }
}

/// Invalid grid configuration. Raised synchronously, before any computation;
/// nothing here is transient and there is no recovery path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NonPositiveWidth(i64),
    NonPositiveHeight(i64),
    NegativeMaxIterations(i64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveWidth(w) => {
                write!(f, "grid width must be positive, got {}", w)
            }
            Self::NonPositiveHeight(h) => {
                write!(f, "grid height must be positive, got {}", h)
            }
            Self::NegativeMaxIterations(i) => {
                write!(f, "iteration budget must be non-negative, got {}", i)
            }
        }
    }
}

impl Error for ConfigError {}

/// Escape-time classification of one pixel.
///
/// `escaped == false` means the orbit stayed bounded for the whole budget
/// (the point is "in the set"); `iterations` then equals the budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelResult {
    pub x: u32,
    pub y: u32,
    pub iterations: u32,
    pub escaped: bool,
}

/// Classification of a full grid: exactly `width * height` pixels in
/// row-major order, `y` outer ascending, `x` inner ascending. Consumers rely
/// on the ordering to rebuild a 2-D image from the flat sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridResult {
    width: usize,
    height: usize,
    pixels: Vec<PixelResult>,
}

impl GridResult {
    pub(crate) fn new(width: usize, height: usize, pixels: Vec<PixelResult>) -> Self {
        assert!(pixels.len() == width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[PixelResult] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<PixelResult> {
        self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> PixelResult {
        self.pixels[y * self.width + x]
    }

    /// Iteration counts as a `(height, width)` array.
    pub fn iterations(&self) -> Array2<u32> {
        Array2::from_shape_vec(
            (self.height, self.width),
            self.pixels.iter().map(|p| p.iterations).collect(),
        )
        .unwrap()
    }

    /// Escape flags as a `(height, width)` array.
    pub fn escaped(&self) -> Array2<bool> {
        Array2::from_shape_vec(
            (self.height, self.width),
            self.pixels.iter().map(|p| p.escaped).collect(),
        )
        .unwrap()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_zero_width() {
        let params = GridParams::new(0, 10, 5);
        assert_eq!(params.validate(), Err(ConfigError::NonPositiveWidth(0)));
    }

    #[test]
    fn rejects_negative_height() {
        let params = GridParams::new(10, -5, 5);
        assert_eq!(params.validate(), Err(ConfigError::NonPositiveHeight(-5)));
    }

    #[test]
    fn rejects_negative_budget() {
        let params = GridParams::new(10, 10, -1);
        assert_eq!(
            params.validate(),
            Err(ConfigError::NegativeMaxIterations(-1))
        );
    }

    #[test]
    fn accepts_valid_params() {
        assert_eq!(GridParams::new(1, 1, 0).validate(), Ok(()));
    }

    #[test]
    fn clamps_oversized_budget() {
        let params = GridParams::new(1, 1, i64::MAX);
        assert_eq!(params.checked(), Ok((1, 1, u32::MAX)));
    }

    #[test]
    fn get_indexes_row_major() {
        let pixels = (0..6)
            .map(|n| PixelResult {
                x: n % 3,
                y: n / 3,
                iterations: n,
                escaped: false,
            })
            .collect();
        let grid = GridResult::new(3, 2, pixels);
        assert_eq!(grid.get(2, 1).iterations, 5);
        assert_eq!(grid.get(0, 1).iterations, 3);
    }
}
