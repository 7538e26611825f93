use ndarray::{Array1, Array2};
use num::Num;

use crate::complex::*;
use crate::error::FractalError;

#[derive(Clone, Debug)]
pub struct Axis<T> {
    pub min: T,
    pub max: T,
}

impl<T> Axis<T>
where
    T: Num + Copy,
{
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn length(&self) -> T {
        self.max - self.min
    }

    pub fn center(&self) -> T {
        (self.max + self.min) / (T::one() + T::one())
    }
}

#[derive(Clone, Debug)]
pub struct Frame<T> {
    pub x: Axis<T>,
    pub y: Axis<T>,
}

impl<T> Frame<T>
where
    T: Num + Copy,
{
    pub fn new(x: Axis<T>, y: Axis<T>) -> Self {
        Self { x, y }
    }

    pub fn from_nums(x1: T, x2: T, y1: T, y2: T) -> Self {
        Self::new(Axis::new(x1, x2), Axis::new(y1, y2))
    }

    pub fn aspect_ratio(&self) -> T {
        self.x.length() / self.y.length()
    }

    pub fn pan(&mut self, x: T, y: T) {
        self.x.min = self.x.min + x;
        self.x.max = self.x.max + x;
        self.y.min = self.y.min + y;
        self.y.max = self.y.max + y;
    }
}

impl Frame<f64> {
    pub fn pan_relative(&mut self, xfrac: f64, yfrac: f64) {
        self.pan(xfrac * self.x.length(), yfrac * self.y.length());
    }

    pub fn zoom(&mut self, factor: f64) {
        let xc = self.x.center();
        let yc = self.y.center();
        self.x.min = xc + (self.x.min - xc) * factor;
        self.x.max = xc + (self.x.max - xc) * factor;
        self.y.min = yc + (self.y.min - yc) * factor;
        self.y.max = yc + (self.y.max - yc) * factor;
    }
}

impl Default for Frame<f64> {
    fn default() -> Self {
        Self::new(Axis::new(-2.0, 1.0), Axis::new(-1.0, 1.0))
    }
}

/// `n` evenly spaced values over `[start, end]`, endpoints included.
/// `n == 1` yields just `start`.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Sampled complex-plane coordinates for one render request.
///
/// Owns the two linspaced axes; the point lattice and the final
/// `(height, width)` reshape are both derived from it, so the flattening
/// order and the output orientation cannot drift apart.
#[derive(Clone, Debug)]
pub struct Grid {
    pub x: Axis<f64>,
    pub y: Axis<f64>,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Grid {
    pub fn generate(frame: &Frame<f64>, width: usize, height: usize) -> Result<Self, FractalError> {
        if width == 0 || height == 0 {
            return Err(FractalError::InvalidDimension { width, height });
        }
        Ok(Self {
            x: frame.x.clone(),
            y: frame.y.clone(),
            xs: linspace(frame.x.min, frame.x.max, width),
            ys: linspace(frame.y.min, frame.y.max, height),
        })
    }

    pub fn width(&self) -> usize {
        self.xs.len()
    }

    pub fn height(&self) -> usize {
        self.ys.len()
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// The flattened point lattice, row-major by x: all y values for the
    /// first x, then all y values for the next x, and so on.
    pub fn lattice(&self) -> Vec<C<f64>> {
        let mut points = Vec::with_capacity(self.xs.len() * self.ys.len());
        for &a in &self.xs {
            for &b in &self.ys {
                points.push(c(a, b));
            }
        }
        points
    }

    /// Reshapes a flat per-point vector (in `lattice` order) into the
    /// `(height, width)` output layout, row = y, column = x.
    pub fn reshape<T: Clone>(&self, flat: &[T]) -> Array2<T> {
        assert_eq!(flat.len(), self.width() * self.height());
        Array1::from_vec(flat.to_vec())
            .into_shape((self.width(), self.height()))
            .unwrap()
            .reversed_axes()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(-2.0, 2.0, 5);
        assert_eq!(xs, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_linspace_single() {
        assert_eq!(linspace(-1.5, 3.0, 1), vec![-1.5]);
    }

    #[test]
    fn test_grid_lattice_order() {
        let frame = Frame::from_nums(0.0, 2.0, 0.0, 1.0);
        let grid = Grid::generate(&frame, 3, 2).unwrap();
        let points = grid.lattice();
        assert_eq!(
            points,
            vec![
                c(0.0, 0.0),
                c(0.0, 1.0),
                c(1.0, 0.0),
                c(1.0, 1.0),
                c(2.0, 0.0),
                c(2.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_grid_reshape_orientation() {
        let frame = Frame::from_nums(0.0, 2.0, 0.0, 1.0);
        let grid = Grid::generate(&frame, 3, 2).unwrap();
        let flat: Vec<i32> = (0..6).collect();
        let arr = grid.reshape(&flat);
        assert_eq!(arr.dim(), (2, 3));
        // flat index = ix * height + iy
        assert_eq!(arr[[0, 0]], 0);
        assert_eq!(arr[[1, 0]], 1);
        assert_eq!(arr[[0, 2]], 4);
        assert_eq!(arr[[1, 2]], 5);
    }

    #[test]
    fn test_grid_degenerate_dimensions() {
        let frame = Frame::from_nums(-1.0, 1.0, -1.0, 1.0);
        let row = Grid::generate(&frame, 4, 1).unwrap();
        assert_eq!(row.ys(), &[-1.0]);
        let col = Grid::generate(&frame, 1, 4).unwrap();
        assert_eq!(col.xs(), &[-1.0]);
    }

    #[test]
    fn test_grid_invalid_dimension() {
        let frame = Frame::from_nums(-1.0, 1.0, -1.0, 1.0);
        let err = Grid::generate(&frame, 0, 10).unwrap_err();
        assert_eq!(
            err,
            FractalError::InvalidDimension {
                width: 0,
                height: 10
            }
        );
        assert!(Grid::generate(&frame, 10, 0).is_err());
    }
}
