use std::num::ParseFloatError;
use std::process::exit;

use structopt::StructOpt;

use fractalox::coord::Frame;
use fractalox::function::Polynomial;
use fractalox::painter::{EscapePainter, Painter, RootPainter};
use fractalox::{c, C, MandelbrotFractal, NewtonFractal};

fn parse_complex(s: &str) -> Result<C<f64>, String> {
    let parse = |v: &str| -> Result<f64, ParseFloatError> { v.trim().parse() };
    match s.split_once(',') {
        Some((re, im)) => Ok(c(
            parse(re).map_err(|e| e.to_string())?,
            parse(im).map_err(|e| e.to_string())?,
        )),
        None => Ok(c(parse(s).map_err(|e| e.to_string())?, 0.0)),
    }
}

#[derive(StructOpt)]
struct Bounds {
    #[structopt(long, default_value = "-2.0", allow_hyphen_values = true)]
    xstart: f64,
    #[structopt(long, default_value = "2.0", allow_hyphen_values = true)]
    xend: f64,
    #[structopt(long, default_value = "-2.0", allow_hyphen_values = true)]
    ystart: f64,
    #[structopt(long, default_value = "2.0", allow_hyphen_values = true)]
    yend: f64,
    #[structopt(long, default_value = "1000")]
    width: usize,
    #[structopt(long, default_value = "1000")]
    height: usize,
    #[structopt(long, default_value = "out.png")]
    out: String,
}

#[derive(StructOpt)]
#[structopt(name = "fractalox-imagegen", about = "Render fractal images to PNG")]
enum Opt {
    /// Escape-time fractal over the parameter plane
    Mandelbrot {
        #[structopt(flatten)]
        bounds: Bounds,
        #[structopt(long, default_value = "2")]
        power: u32,
        #[structopt(long, default_value = "4.0")]
        threshold: f64,
        #[structopt(long, default_value = "200")]
        max_rounds: u32,
    },
    /// Newton basins for the monic polynomial with the given roots
    Newton {
        #[structopt(flatten)]
        bounds: Bounds,
        /// Roots as `re,im` pairs (or bare reals), tie-break order
        #[structopt(long, required = true, allow_hyphen_values = true, parse(try_from_str = parse_complex))]
        root: Vec<C<f64>>,
        #[structopt(long, default_value = "200")]
        max_rounds: u32,
    },
}

fn run(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    match opt {
        Opt::Mandelbrot {
            bounds,
            power,
            threshold,
            max_rounds,
        } => {
            let frame = Frame::from_nums(bounds.xstart, bounds.xend, bounds.ystart, bounds.yend);
            let counts = MandelbrotFractal::new()
                .with_power(power)
                .with_threshold(threshold)
                .with_max_rounds(max_rounds)
                .generate(&frame, bounds.width, bounds.height)?;
            let img = EscapePainter::new(max_rounds).paint(&counts);
            img.save(&bounds.out)?;
        }
        Opt::Newton {
            bounds,
            root,
            max_rounds,
        } => {
            let frame = Frame::from_nums(bounds.xstart, bounds.xend, bounds.ystart, bounds.yend);
            let poly = Polynomial::from_roots(&root);
            let labels = NewtonFractal::new(poly.newton_step(), root)
                .with_max_rounds(max_rounds)
                .generate(&frame, bounds.width, bounds.height)?;
            let img = RootPainter.paint(&labels);
            img.save(&bounds.out)?;
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(Opt::from_args()) {
        eprintln!("error: {}", e);
        exit(1);
    }
}
