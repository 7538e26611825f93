use crate::complex::*;
use crate::error::FractalError;

pub const DEFAULT_ROOT_TOLERANCE: f64 = 1e-10;

/// Maps each final iterate to the index of the first root within
/// `tolerance`, or -1 if none match.
///
/// The scan order is the root set's order: when a value lies within
/// tolerance of two roots at once (closely spaced roots, or a loose
/// tolerance), the lower index wins. That tie-break is deliberate, so the
/// caller's root ordering is part of the output contract.
pub fn classify(
    finals: &[C<f64>],
    roots: &[C<f64>],
    tolerance: f64,
) -> Result<Vec<i32>, FractalError> {
    if roots.is_empty() {
        return Err(FractalError::UnresolvedRoots);
    }
    Ok(finals
        .iter()
        .map(|z| {
            roots
                .iter()
                .position(|r| (*z - *r).norm() < tolerance)
                .map(|i| i as i32)
                .unwrap_or(-1)
        })
        .collect())
}
