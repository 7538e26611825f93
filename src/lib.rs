#![allow(clippy::new_without_default)]

use ndarray::Array2;

pub mod bench;
pub mod classify;
mod complex;
pub mod coord;
pub mod error;
pub mod function;
pub mod painter;
pub mod solver;
pub mod threads;

pub use complex::{c, ci, cr, C};
pub use error::FractalError;

use classify::{classify, DEFAULT_ROOT_TOLERANCE};
use coord::{Frame, Grid};
use solver::newton::{DEFAULT_MAX_ROUNDS, DEFAULT_PRECISION_GOAL};
use solver::{EscapeSolver, EscapeState, NewtonSolver, NewtonState, PointStatus, Solver};
use threads::Threaded;

/// Newton root-convergence fractal: iterates `z <- z - f(z)/f'(z)` over a
/// sampled grid and labels every point with the index of the root it
/// converged to, or -1.
///
/// Only configuration lives here; grid and iteration state are created
/// fresh for every [`generate`](Self::generate) call and discarded at its
/// end, so identical calls produce bit-identical arrays.
#[derive(Clone)]
pub struct NewtonFractal<F> {
    step: F,
    roots: Vec<C<f64>>,
    precision_goal: f64,
    root_tolerance: f64,
    max_rounds: u32,
    threads: usize,
}

impl<F> NewtonFractal<F>
where
    F: Fn(C<f64>) -> C<f64> + Clone + Send + 'static,
{
    /// `step` is the elementwise `f(z)/f'(z)`; `roots` are the known zeros
    /// of `f`, in the order that breaks classification ties.
    pub fn new(step: F, roots: Vec<C<f64>>) -> Self {
        Self {
            step,
            roots,
            precision_goal: DEFAULT_PRECISION_GOAL,
            root_tolerance: DEFAULT_ROOT_TOLERANCE,
            max_rounds: DEFAULT_MAX_ROUNDS,
            threads: num_cpus::get_physical(),
        }
    }

    pub fn with_precision_goal(mut self, precision_goal: f64) -> Self {
        self.precision_goal = precision_goal;
        self
    }

    pub fn with_root_tolerance(mut self, root_tolerance: f64) -> Self {
        self.root_tolerance = root_tolerance;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn roots(&self) -> &[C<f64>] {
        &self.roots
    }

    /// Runs the engine over `frame` at the given resolution and returns
    /// the `(height, width)` root-index array.
    pub fn generate(
        &self,
        frame: &Frame<f64>,
        width: usize,
        height: usize,
    ) -> Result<Array2<i32>, FractalError> {
        if self.roots.is_empty() {
            return Err(FractalError::UnresolvedRoots);
        }
        let grid = Grid::generate(frame, width, height)?;
        let solver = NewtonSolver::new(self.step.clone())
            .with_precision_goal(self.precision_goal)
            .with_max_rounds(self.max_rounds);
        let initial = NewtonState::initialize(&grid);
        let solved = if self.threads > 1 {
            solver.threaded(self.threads).solve(&initial)
        } else {
            solver.solve(&initial)
        };
        let mut labels = classify(&solved.finals(), &self.roots, self.root_tolerance)?;
        for (label, status) in labels.iter_mut().zip(solved.statuses()) {
            if status == PointStatus::Defunct {
                *label = -1;
            }
        }
        Ok(grid.reshape(&labels))
    }
}

/// Mandelbrot-family escape-time fractal: iterates `z <- z^power + c` and
/// labels every point with the number of rounds it survived below the
/// escape threshold.
#[derive(Clone, Debug)]
pub struct MandelbrotFractal {
    power: u32,
    threshold: f64,
    max_rounds: u32,
    threads: usize,
}

impl MandelbrotFractal {
    pub fn new() -> Self {
        Self {
            power: solver::escape::DEFAULT_POWER,
            threshold: solver::escape::DEFAULT_THRESHOLD,
            max_rounds: solver::escape::DEFAULT_MAX_ROUNDS,
            threads: num_cpus::get_physical(),
        }
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Runs the engine over `frame` at the given resolution and returns
    /// the `(height, width)` escape-count array.
    pub fn generate(
        &self,
        frame: &Frame<f64>,
        width: usize,
        height: usize,
    ) -> Result<Array2<i32>, FractalError> {
        let grid = Grid::generate(frame, width, height)?;
        let solver = EscapeSolver::new(self.power, self.threshold, self.max_rounds);
        let initial = EscapeState::initialize(&grid);
        let solved = if self.threads > 1 {
            solver.threaded(self.threads).solve(&initial)
        } else {
            solver.solve(&initial)
        };
        let counts: Vec<i32> = solved.counts().into_iter().map(|n| n as i32).collect();
        Ok(grid.reshape(&counts))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::function::Polynomial;

    fn cube_root_model() -> NewtonFractal<impl Fn(C<f64>) -> C<f64> + Clone + Send + 'static> {
        let s = 3_f64.sqrt() / 2.0;
        let roots = vec![c(1.0, 0.0), c(-0.5, s), c(-0.5, -s)];
        let poly = Polynomial::from_roots(&roots);
        NewtonFractal::new(poly.newton_step(), roots).with_threads(1)
    }

    #[test]
    fn test_newton_output_shape_and_range() {
        let model = cube_root_model();
        let frame = Frame::from_nums(-2.0, 2.0, -2.0, 2.0);
        let labels = model.generate(&frame, 10, 10).unwrap();
        assert_eq!(labels.dim(), (10, 10));
        for &label in labels.iter() {
            assert!((-1..=2).contains(&label));
        }
        // All three basins show up on this window.
        for r in 0..3 {
            assert!(labels.iter().any(|&l| l == r));
        }
    }

    #[test]
    fn test_newton_real_axis_reflection() {
        // Conjugate-paired roots on an exactly symmetric grid: reflecting
        // across the real axis swaps the two conjugate basins.
        let model = cube_root_model();
        let frame = Frame::from_nums(-2.0, 2.0, -2.0, 2.0);
        let labels = model.generate(&frame, 9, 9).unwrap();
        for row in 0..9 {
            for col in 0..9 {
                let mirrored = match labels[[8 - row, col]] {
                    1 => 2,
                    2 => 1,
                    other => other,
                };
                assert_eq!(labels[[row, col]], mirrored);
            }
        }
    }

    #[test]
    fn test_newton_idempotent() {
        let model = cube_root_model();
        let frame = Frame::from_nums(-1.5, 1.5, -1.5, 1.5);
        let first = model.generate(&frame, 12, 8).unwrap();
        let second = model.generate(&frame, 12, 8).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_newton_empty_roots_rejected() {
        let model = NewtonFractal::new(|z| z, vec![]);
        let err = model.generate(&Frame::default(), 4, 4).unwrap_err();
        assert_eq!(err, FractalError::UnresolvedRoots);
    }

    #[test]
    fn test_newton_single_row_and_column() {
        let model = cube_root_model();
        let frame = Frame::from_nums(-2.0, 2.0, -2.0, 2.0);
        assert_eq!(model.generate(&frame, 5, 1).unwrap().dim(), (1, 5));
        assert_eq!(model.generate(&frame, 1, 5).unwrap().dim(), (5, 1));
    }

    #[test]
    fn test_mandelbrot_interior_window() {
        // Inside the main cardioid nothing escapes: every count is the ceiling.
        let model = MandelbrotFractal::new().with_threads(1);
        let frame = Frame::from_nums(-0.1, 0.1, -0.1, 0.1);
        let counts = model.generate(&frame, 5, 5).unwrap();
        assert_eq!(counts.dim(), (5, 5));
        assert!(counts.iter().all(|&n| n == 200));
    }

    #[test]
    fn test_mandelbrot_orientation() {
        // Single row, x from 0 to 3: c = 0 never escapes, c = 3 does.
        let model = MandelbrotFractal::new().with_threads(1);
        let frame = Frame::from_nums(0.0, 3.0, 0.0, 0.0);
        let counts = model.generate(&frame, 2, 1).unwrap();
        assert_eq!(counts.dim(), (1, 2));
        assert_eq!(counts[[0, 0]], 200);
        assert!(counts[[0, 1]] < 5);
    }

    #[test]
    fn test_mandelbrot_threaded_matches_serial() {
        let frame = Frame::from_nums(-2.0, 1.0, -1.0, 1.0);
        let serial = MandelbrotFractal::new()
            .with_threads(1)
            .generate(&frame, 24, 16)
            .unwrap();
        let threaded = MandelbrotFractal::new()
            .with_threads(4)
            .generate(&frame, 24, 16)
            .unwrap();
        assert_eq!(serial, threaded);
    }
}
