pub mod escape;
pub mod newton;

pub use escape::{EscapeSolver, EscapeState};
pub use newton::{NewtonSolver, NewtonState, PointStatus};

/// One complete grid evaluation: drives its own rounds until every point
/// has settled (converged, escaped, or been retired) or the round ceiling
/// is hit. Each point is a pure function of its own prior state, so a
/// solver may be run over any partition of the state with identical
/// results; see [`crate::threads`].
pub trait Solver<T> {
    fn solve(&self, state: &T) -> T;
}
