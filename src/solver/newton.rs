use crate::complex::*;
use crate::coord::Grid;
use crate::solver::Solver;
use crate::threads::Split;

pub const DEFAULT_PRECISION_GOAL: f64 = 1e-11;
pub const DEFAULT_MAX_ROUNDS: u32 = 200;

/// Where a lattice point is in its iteration lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointStatus {
    /// Still iterating.
    Active,
    /// Relative step error dropped below the precision goal.
    Settled,
    /// Retired without a usable value: the iterate hit exactly zero
    /// (relative error undefined) or an update produced a non-finite
    /// value. Always labels -1, never compared against roots.
    Defunct,
}

#[derive(Clone, Debug)]
pub struct NewtonCell {
    pub(crate) z: C<f64>,
    pub(crate) count: u32,
    pub(crate) status: PointStatus,
}

/// Per-point iteration state for one Newton run, one cell per lattice
/// point in lattice order.
#[derive(Clone, Debug)]
pub struct NewtonState {
    pub(crate) cells: Vec<NewtonCell>,
}

impl NewtonState {
    pub fn initialize(grid: &Grid) -> Self {
        let cells = grid
            .lattice()
            .into_iter()
            .map(|z| NewtonCell {
                z,
                count: 0,
                status: PointStatus::Active,
            })
            .collect();
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Final iterate of every point, frozen at the value reached when the
    /// point left the active set.
    pub fn finals(&self) -> Vec<C<f64>> {
        self.cells.iter().map(|cell| cell.z).collect()
    }

    pub fn counts(&self) -> Vec<u32> {
        self.cells.iter().map(|cell| cell.count).collect()
    }

    pub fn statuses(&self) -> Vec<PointStatus> {
        self.cells.iter().map(|cell| cell.status).collect()
    }
}

impl Split for NewtonState {
    fn split_parts(&self, n: usize) -> Vec<Self> {
        self.cells
            .split_parts(n)
            .into_iter()
            .map(|cells| Self { cells })
            .collect()
    }

    fn join_parts(&self, parts: &[Self]) -> Self {
        let mut cells = self.cells.clone();
        for part in parts {
            cells.extend_from_slice(&part.cells);
        }
        Self { cells }
    }
}

/// Newton-step solver: `z <- z - step(z)` where `step` is the elementwise
/// `f(z)/f'(z)` supplied by the caller. A point keeps iterating while its
/// relative step error `|step(z) / z|` exceeds the precision goal; its
/// count is the number of rounds it was still not converged.
#[derive(Clone)]
pub struct NewtonSolver<F> {
    step: F,
    precision_goal: f64,
    max_rounds: u32,
}

impl<F> NewtonSolver<F>
where
    F: Fn(C<f64>) -> C<f64>,
{
    pub fn new(step: F) -> Self {
        Self {
            step,
            precision_goal: DEFAULT_PRECISION_GOAL,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn with_precision_goal(mut self, precision_goal: f64) -> Self {
        self.precision_goal = precision_goal;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// One round for one cell. Inactive cells are left untouched by the
    /// driver; this is only ever called on an active cell.
    fn step_cell(&self, cell: &mut NewtonCell) -> bool {
        if cell.z == c(0.0, 0.0) {
            cell.status = PointStatus::Defunct;
            return false;
        }
        let diff = (self.step)(cell.z);
        let next = cell.z - diff;
        if !diff.is_finite() || !next.is_finite() {
            cell.status = PointStatus::Defunct;
            return false;
        }
        let rel_error = (diff / cell.z).norm();
        cell.z = next;
        if rel_error > self.precision_goal {
            cell.count += 1;
            true
        } else {
            cell.status = PointStatus::Settled;
            false
        }
    }
}

impl<F> Solver<NewtonState> for NewtonSolver<F>
where
    F: Fn(C<f64>) -> C<f64>,
{
    fn solve(&self, state: &NewtonState) -> NewtonState {
        let mut state = state.clone();
        for _ in 0..self.max_rounds {
            let mut any_active = false;
            for cell in &mut state.cells {
                if cell.status != PointStatus::Active {
                    continue;
                }
                if self.step_cell(cell) {
                    any_active = true;
                }
            }
            if !any_active {
                break;
            }
        }
        state
    }
}
