use crate::complex::C;

/// Squared escape radius: an orbit whose squared magnitude exceeds this is
/// diverging. Radius 2, compared squared to avoid the square root.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Outcome of iterating one sample point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Escape {
    pub iterations: u32,
    pub escaped: bool,
}

/// Iterates `z = z² + c` from `z = 0` and reports when the orbit leaves the
/// escape radius, or that the budget ran out first.
///
/// The squared terms are carried across passes: each pass updates `z` from
/// the previous pass's squares, then squares the new `z` and tests it.
/// `iterations` counts completed updates, so on escape it is in
/// `[1, max_iterations]`; a zero budget never runs the loop body.
pub fn escape_time(c: C<f64>, max_iterations: u32) -> Escape {
    let mut z_re = 0.0;
    let mut z_im = 0.0;
    let mut re_sq = 0.0;
    let mut im_sq = 0.0;
    let mut n = 0;
    while n < max_iterations {
        z_im = 2.0 * z_re * z_im + c.im;
        z_re = re_sq - im_sq + c.re;
        n += 1;
        re_sq = z_re * z_re;
        im_sq = z_im * z_im;
        if re_sq + im_sq > ESCAPE_RADIUS_SQ {
            return Escape {
                iterations: n,
                escaped: true,
            };
        }
    }
    Escape {
        iterations: max_iterations,
        escaped: false,
    }
}
