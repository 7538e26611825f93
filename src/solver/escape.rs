use crate::complex::*;
use crate::coord::Grid;
use crate::solver::Solver;
use crate::threads::Split;

pub const DEFAULT_POWER: u32 = 2;
pub const DEFAULT_THRESHOLD: f64 = 4.0;
pub const DEFAULT_MAX_ROUNDS: u32 = 200;

#[derive(Clone, Debug)]
pub struct EscapeCell {
    pub(crate) c: C<f64>,
    pub(crate) z: C<f64>,
    pub(crate) count: u32,
    pub(crate) active: bool,
}

/// Per-point state for one escape-time run. The lattice value is the fixed
/// parameter `c`; the iterate starts at zero.
#[derive(Clone, Debug)]
pub struct EscapeState {
    pub(crate) cells: Vec<EscapeCell>,
}

impl EscapeState {
    pub fn initialize(grid: &Grid) -> Self {
        let cells = grid
            .lattice()
            .into_iter()
            .map(|point| EscapeCell {
                c: point,
                z: c(0.0, 0.0),
                count: 0,
                active: true,
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

    /// Rounds each point survived below the threshold: its escape time,
    /// or `max_rounds` if it never escaped.
    pub fn counts(&self) -> Vec<u32> {
        self.cells.iter().map(|cell| cell.count).collect()
    }
}

impl Split for EscapeState {
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

/// Escape-time solver: `z <- z^power + c`, a point stays active while
/// `|z| < threshold`. Overflow to infinity is just an escape, not an
/// error; the point goes inactive at the same check.
#[derive(Clone, Debug)]
pub struct EscapeSolver {
    power: u32,
    threshold: f64,
    max_rounds: u32,
}

impl EscapeSolver {
    pub fn new(power: u32, threshold: f64, max_rounds: u32) -> Self {
        Self {
            power,
            threshold,
            max_rounds,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

impl Default for EscapeSolver {
    fn default() -> Self {
        Self::new(DEFAULT_POWER, DEFAULT_THRESHOLD, DEFAULT_MAX_ROUNDS)
    }
}

impl Solver<EscapeState> for EscapeSolver {
    fn solve(&self, state: &EscapeState) -> EscapeState {
        let mut state = state.clone();
        for _ in 0..self.max_rounds {
            let mut any_active = false;
            for cell in &mut state.cells {
                if !cell.active {
                    continue;
                }
                cell.z = cell.z.powu(self.power) + cell.c;
                if cell.z.norm() < self.threshold {
                    cell.count += 1;
                    any_active = true;
                } else {
                    cell.active = false;
                }
            }
            if !any_active {
                break;
            }
        }
        state
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord::{Frame, Grid};

    #[test]
    fn test_interior_point_never_escapes() {
        // Main cardioid: every point survives all rounds.
        let grid = Grid::generate(&Frame::from_nums(-0.1, 0.1, -0.1, 0.1), 5, 5).unwrap();
        let solver = EscapeSolver::default();
        let solved = solver.solve(&EscapeState::initialize(&grid));
        for count in solved.counts() {
            assert_eq!(count, DEFAULT_MAX_ROUNDS);
        }
    }

    #[test]
    fn test_exterior_point_escapes_quickly() {
        let grid = Grid::generate(&Frame::from_nums(3.0, 3.0, 0.0, 0.0), 1, 1).unwrap();
        let solver = EscapeSolver::default();
        let solved = solver.solve(&EscapeState::initialize(&grid));
        // z1 = 3 (|z| < 4, survives), z2 = 12 (escaped).
        assert_eq!(solved.counts()[0], 1);
    }

    #[test]
    fn test_escape_counts_monotonic_in_max_rounds() {
        let grid = Grid::generate(&Frame::from_nums(-2.0, 1.0, -1.0, 1.0), 8, 6).unwrap();
        let initial = EscapeState::initialize(&grid);
        let short = EscapeSolver::default().with_max_rounds(30).solve(&initial);
        let long = EscapeSolver::default().with_max_rounds(120).solve(&initial);
        for (a, b) in short.counts().iter().zip(long.counts().iter()) {
            assert!(a <= b);
            // Once escaped, the recorded escape time is final.
            if *a < 30 {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_early_exit_matches_full_run() {
        // A region where everything escapes: raising the ceiling changes nothing.
        let grid = Grid::generate(&Frame::from_nums(2.0, 3.0, 2.0, 3.0), 4, 4).unwrap();
        let initial = EscapeState::initialize(&grid);
        let a = EscapeSolver::default().with_max_rounds(50).solve(&initial);
        let b = EscapeSolver::default().with_max_rounds(5000).solve(&initial);
        assert_eq!(a.counts(), b.counts());
    }
}
