use std::path::PathBuf;
use std::process::exit;

use log::info;
use structopt::StructOpt;

use mandelgrid::painter::{GreyscalePainter, Painter, PalettePainter};
use mandelgrid::{generate, Axis, GridParams, Viewport};

#[derive(StructOpt)]
#[structopt(
    name = "mandelgrid-imagegen",
    about = "Render the Mandelbrot set to a PNG"
)]
struct Opt {
    /// Grid width in pixels
    #[structopt(long, default_value = "1500")]
    width: i64,

    /// Grid height in pixels
    #[structopt(long, default_value = "1000")]
    height: i64,

    /// Escape-time iteration budget per pixel
    #[structopt(short = "i", long, default_value = "100")]
    max_iterations: i64,

    /// Lower bound of the real axis
    #[structopt(long, default_value = "-2.0")]
    re_min: f64,

    /// Upper bound of the real axis
    #[structopt(long, default_value = "1.0")]
    re_max: f64,

    /// Lower bound of the imaginary axis
    #[structopt(long, default_value = "-1.0")]
    im_min: f64,

    /// Upper bound of the imaginary axis
    #[structopt(long, default_value = "1.0")]
    im_max: f64,

    /// Render a greyscale ramp instead of the cycled palette
    #[structopt(short, long)]
    greyscale: bool,

    /// Output file
    #[structopt(short, long, default_value = "out.png")]
    output: PathBuf,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let params = GridParams::new(opt.width, opt.height, opt.max_iterations);
    let region = Viewport::new(
        Axis::new(opt.re_min, opt.re_max),
        Axis::new(opt.im_min, opt.im_max),
    );

    let grid = match generate(params, &region) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{}", e);
            exit(2);
        }
    };

    info!("painting {} pixels", grid.pixels().len());
    let img = if opt.greyscale {
        let budget = opt.max_iterations.clamp(1, i64::from(u32::MAX)) as u32;
        GreyscalePainter::new(budget).paint(&grid)
    } else {
        PalettePainter::rainbow().paint(&grid)
    };
    img.save(&opt.output).expect("failed to save image");
}
