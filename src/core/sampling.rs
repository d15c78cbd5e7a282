//! Validation of sampling patterns shared by every analysis engine.
//!
//! All engines validate before computing, so a failed call never produces
//! partial output.

use crate::error::{Result, TimescalesError};

/// Relative tolerance used when testing a grid for uniform spacing.
pub const UNIFORM_TOLERANCE: f64 = 1e-6;

/// Returns true if `values` is in non-decreasing order.
///
/// Empty and single-element slices are sorted. Any NaN makes the slice unsorted.
pub fn is_sorted(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Returns true if `values` is evenly spaced within `rel_tol` of the mean step.
///
/// Grids with fewer than two points are trivially uniform; a grid whose
/// points all coincide is not.
pub fn is_uniform(values: &[f64], rel_tol: f64) -> bool {
    let n = values.len();
    if n < 2 {
        return true;
    }

    let step = (values[n - 1] - values[0]) / (n - 1) as f64;
    if !(step.is_finite() && step > 0.0) {
        return false;
    }

    let tol = rel_tol * step;
    values.windows(2).all(|w| ((w[1] - w[0]) - step).abs() <= tol)
}

/// Returns true if `values` holds at least two distinct entries.
pub fn has_distinct_values(values: &[f64]) -> bool {
    match values.first() {
        Some(&first) => values.iter().any(|&v| v != first),
        None => false,
    }
}

/// Checks that `times` has at least two distinct values and is ascending.
///
/// Distinctness is tested first, so a constant series reports
/// [`TimescalesError::DegenerateInput`] rather than anything else.
pub(crate) fn check_times(times: &[f64], op: &str) -> Result<()> {
    if !has_distinct_values(times) {
        return Err(TimescalesError::DegenerateInput(format!(
            "argument 'times' to {}() contains fewer than two unique values",
            op
        )));
    }
    if !is_sorted(times) {
        return Err(TimescalesError::NotSorted(format!(
            "argument 'times' to {}() is not sorted in ascending order",
            op
        )));
    }
    Ok(())
}

/// Checks that a value series matches the length of its time stamps.
pub(crate) fn check_lengths(times: &[f64], values: &[f64], name: &str, op: &str) -> Result<()> {
    if times.len() != values.len() {
        return Err(TimescalesError::InvalidArgument(format!(
            "arguments 'times' and '{}' to {}() are not the same length (gave {} for times and {} for {})",
            name,
            op,
            times.len(),
            values.len(),
            name
        )));
    }
    Ok(())
}

/// Checks that every frequency in the grid is strictly positive.
pub(crate) fn check_frequencies(freqs: &[f64]) -> Result<()> {
    match freqs.iter().position(|&f| !(f > 0.0)) {
        Some(index) => Err(TimescalesError::NegativeFrequency {
            index,
            value: freqs[index],
        }),
        None => Ok(()),
    }
}

/// Checks that a series has non-zero spread about its mean.
pub(crate) fn check_variance(variance: f64, name: &str, op: &str) -> Result<()> {
    if !(variance > 0.0) || !variance.is_finite() {
        return Err(TimescalesError::DegenerateInput(format!(
            "argument '{}' to {}() has no variance",
            name, op
        )));
    }
    Ok(())
}
