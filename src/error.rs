use thiserror::Error;

/// Configuration errors, surfaced before any iteration starts.
///
/// Per-point numerical anomalies (a zero Newton iterate, an update that
/// overflows to a non-finite value) are not errors: they retire the affected
/// point locally and never abort the rest of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractalError {
    #[error("invalid grid dimension {width}x{height}: both must be at least 1")]
    InvalidDimension { width: usize, height: usize },
    #[error("newton fractal needs at least one known root to classify against")]
    UnresolvedRoots,
}
