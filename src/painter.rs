use image::{Rgb, RgbImage};

use crate::grid::GridResult;

/// Maps a solved grid to an image. Pixels that never escaped are painted
/// black; everything else is colored from its iteration count.
pub trait Painter {
    fn escape_color(&self, iterations: u32) -> Rgb<u8>;

    fn paint(&self, grid: &GridResult) -> RgbImage {
        let mut img = RgbImage::new(grid.width() as u32, grid.height() as u32);
        for pixel in grid.pixels() {
            let color = if pixel.escaped {
                self.escape_color(pixel.iterations)
            } else {
                Rgb([0, 0, 0])
            };
            img.put_pixel(pixel.x, pixel.y, color);
        }
        img
    }
}

pub struct GreyscalePainter {
    max_iterations: f64,
}

impl GreyscalePainter {
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations: max_iterations as f64,
        }
    }
}

impl Painter for GreyscalePainter {
    fn escape_color(&self, iterations: u32) -> Rgb<u8> {
        let frac = (iterations as f64 / self.max_iterations).clamp(0.0, 1.0);
        let v: u8 = 255 - (frac * 255.0).round() as u8;
        Rgb([v, v, v])
    }
}

/// Cycles a fixed palette by iteration count, indexing with `m % len` the
/// way the reference renderer indexed its color table.
pub struct PalettePainter {
    palette: Vec<Rgb<u8>>,
}

impl PalettePainter {
    pub fn new(palette: Vec<Rgb<u8>>) -> Self {
        assert!(!palette.is_empty(), "empty palette");
        Self { palette }
    }

    pub fn rainbow() -> Self {
        Self::new(vec![
            Rgb([0xbe, 0x0a, 0xff]),
            Rgb([0x58, 0x0a, 0xff]),
            Rgb([0x14, 0x7d, 0xf5]),
            Rgb([0x0a, 0xef, 0xff]),
            Rgb([0x0a, 0xff, 0x99]),
            Rgb([0xa1, 0xff, 0x0a]),
            Rgb([0xde, 0xff, 0x0a]),
            Rgb([0xff, 0xd3, 0x00]),
            Rgb([0xff, 0x87, 0x00]),
            Rgb([0xff, 0x00, 0x00]),
        ])
    }
}

impl Painter for PalettePainter {
    fn escape_color(&self, iterations: u32) -> Rgb<u8> {
        self.palette[iterations as usize % self.palette.len()]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::generate_default;
    use crate::grid::GridParams;

    #[test]
    fn in_set_pixels_are_black() {
        // Budget 0 marks the whole grid as in the set.
        let grid = generate_default(GridParams::new(4, 3, 0)).unwrap();
        let img = PalettePainter::rainbow().paint(&grid);
        assert_eq!(img.dimensions(), (4, 3));
        for (_, _, pixel) in img.enumerate_pixels() {
            assert_eq!(*pixel, Rgb([0, 0, 0]));
        }
    }

    #[test]
    fn greyscale_ramp_runs_white_to_black() {
        let painter = GreyscalePainter::new(100);
        assert_eq!(painter.escape_color(0), Rgb([255, 255, 255]));
        assert_eq!(painter.escape_color(100), Rgb([0, 0, 0]));
    }

    #[test]
    fn palette_wraps_around() {
        let painter = PalettePainter::new(vec![Rgb([1, 1, 1]), Rgb([2, 2, 2])]);
        assert_eq!(painter.escape_color(0), painter.escape_color(2));
        assert_eq!(painter.escape_color(1), painter.escape_color(3));
    }

    #[test]
    fn escaped_pixels_use_the_palette() {
        // 1x1 over the default region samples (-2, -1), which escapes after
        // one update; color index 1.
        let grid = generate_default(GridParams::new(1, 1, 5)).unwrap();
        let painter = PalettePainter::rainbow();
        let img = painter.paint(&grid);
        assert_eq!(*img.get_pixel(0, 0), painter.escape_color(1));
    }
}
