use image::{Rgb, RgbImage};
use ndarray::Array2;

/// Turns a `(height, width)` label array into an image. The sentinel
/// label -1 (no root matched / never escaped in bounded palettes) is
/// always painted black.
pub trait Painter {
    fn label_color(&self, label: i32) -> Rgb<u8>;

    fn paint(&self, labels: &Array2<i32>) -> RgbImage {
        let width: u32 = labels.ncols().try_into().unwrap();
        let height: u32 = labels.nrows().try_into().unwrap();

        let mut img = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let label = labels[[y as usize, x as usize]];
                let color = if label == -1 {
                    Rgb([0, 0, 0])
                } else {
                    self.label_color(label)
                };
                img.put_pixel(x, y, color);
            }
        }
        img
    }
}

fn palette_color(n: i32) -> [u8; 3] {
    match n {
        0 => [0xbe, 0x0a, 0xff],
        1 => [0x58, 0x0a, 0xff],
        2 => [0x14, 0x7d, 0xf5],
        3 => [0x0a, 0xef, 0xff],
        4 => [0x0a, 0xff, 0x99],
        5 => [0xa1, 0xff, 0x0a],
        6 => [0xde, 0xff, 0x0a],
        7 => [0xff, 0xd3, 0x00],
        8 => [0xff, 0x87, 0x00],
        _ => [0xff, 0x00, 0x00],
    }
}

/// One flat palette entry per root index; basins come out as solid
/// regions of color.
pub struct RootPainter;

impl Painter for RootPainter {
    fn label_color(&self, label: i32) -> Rgb<u8> {
        Rgb(palette_color(label.rem_euclid(9)))
    }
}

/// Interpolated ramp over escape counts, scaled to the round ceiling.
pub struct EscapePainter {
    max_count: f64,
}

impl EscapePainter {
    pub fn new(max_count: u32) -> Self {
        Self {
            max_count: max_count as f64,
        }
    }
}

fn mix(a: u8, b: u8, frac: f64) -> u8 {
    let af = a as f64;
    let bf = b as f64;
    let m = af * (1.0 - frac) + bf * frac;
    f64::round(m) as u8
}

impl Painter for EscapePainter {
    fn label_color(&self, label: i32) -> Rgb<u8> {
        let scaled = (9.0 * label as f64 / self.max_count).clamp(0.0, 9.0);
        let n = scaled.floor() as i32;
        let frac = scaled - n as f64;
        let rgb1 = palette_color(n);
        let rgb2 = palette_color(n + 1);
        Rgb([
            mix(rgb1[0], rgb2[0], frac),
            mix(rgb1[1], rgb2[1], frac),
            mix(rgb1[2], rgb2[2], frac),
        ])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sentinel_is_black() {
        let labels = array![[-1, 0], [1, -1]];
        let img = RootPainter.paint(&labels);
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(1, 1), &Rgb([0, 0, 0]));
        assert_ne!(img.get_pixel(1, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_escape_ramp_endpoints() {
        let p = EscapePainter::new(100);
        assert_eq!(p.label_color(0), Rgb(palette_color(0)));
        assert_eq!(p.label_color(100), Rgb(palette_color(9)));
    }
}
