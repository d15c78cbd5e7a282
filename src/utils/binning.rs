//! Histogram-style binning over ascending edges.
//!
//! Bins are half-open `[e_k, e_{k+1})` except the last, which also holds
//! its right edge.

use crate::error::{Result, TimescalesError};

/// Checks that `edges` describes at least one bin with finite, strictly
/// ascending boundaries.
pub(crate) fn check_edges(edges: &[f64], op: &str) -> Result<()> {
    if edges.len() < 2 {
        return Err(TimescalesError::InvalidArgument(format!(
            "argument 'bin_edges' to {}() needs at least two edges (gave {})",
            op,
            edges.len()
        )));
    }
    if let Some(i) = edges.iter().position(|e| !e.is_finite()) {
        return Err(TimescalesError::InvalidArgument(format!(
            "argument 'bin_edges' to {}() has a non-finite edge at index {}",
            op, i
        )));
    }
    if let Some(i) = edges.windows(2).position(|w| !(w[1] > w[0])) {
        return Err(TimescalesError::InvalidArgument(format!(
            "argument 'bin_edges' to {}() is not strictly ascending at index {}",
            op,
            i + 1
        )));
    }
    Ok(())
}

/// Bin holding `x`, or `None` if it falls outside `[e_0, e_last]`.
///
/// `edges` must be ascending with at least two entries.
#[inline]
pub(crate) fn bin_index(edges: &[f64], x: f64) -> Option<usize> {
    let n_bins = edges.len().checked_sub(1)?;
    if n_bins == 0 || !(x >= edges[0] && x <= edges[n_bins]) {
        return None;
    }
    // Number of edges <= x; at least 1 here
    let upper = edges.partition_point(|&e| e <= x);
    Some((upper - 1).min(n_bins - 1))
}
