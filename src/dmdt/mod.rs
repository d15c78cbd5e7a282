//! Δm-Δt pair statistics.
//!
//! Every unordered pair of observations contributes one point: its time
//! separation and its change in brightness. Binning the cloud by separation
//! shows on which timescales a source varies, without assuming periodicity.

mod binning;

pub use binning::{delta_m_bin_quantile, hi_amp_bin_frac};

use crate::core::sampling::{check_lengths, has_distinct_values};
use crate::error::{Result, TimescalesError};
use log::debug;
use std::cmp::Ordering;

/// The Δm-Δt cloud of a lightcurve, ordered by ascending time separation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DmDtCloud {
    delta_t: Vec<f64>,
    delta_m: Vec<f64>,
}

impl DmDtCloud {
    /// Time separations, non-negative and ascending.
    pub fn delta_t(&self) -> &[f64] {
        &self.delta_t
    }

    /// Brightness changes aligned with [`delta_t`](Self::delta_t).
    pub fn delta_m(&self) -> &[f64] {
        &self.delta_m
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.delta_t.len()
    }

    /// Whether the cloud has no pairs.
    pub fn is_empty(&self) -> bool {
        self.delta_t.is_empty()
    }

    /// Iterate over `(Δt, Δm)` points.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.delta_t.iter().copied().zip(self.delta_m.iter().copied())
    }

    /// Fraction of pairs per bin with `|Δm| > threshold`. See [`hi_amp_bin_frac`].
    pub fn hi_amp_bin_frac(&self, bin_edges: &[f64], threshold: f64) -> Result<Vec<f64>> {
        hi_amp_bin_frac(&self.delta_t, &self.delta_m, bin_edges, threshold)
    }

    /// Quantile of `|Δm|` per bin. See [`delta_m_bin_quantile`].
    pub fn delta_m_bin_quantile(&self, bin_edges: &[f64], q: f64) -> Result<Vec<f64>> {
        delta_m_bin_quantile(&self.delta_t, &self.delta_m, bin_edges, q)
    }

    /// Consume the cloud, returning `(delta_t, delta_m)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.delta_t, self.delta_m)
    }
}

/// Computes the Δm-Δt cloud of a lightcurve.
///
/// For each pair `i < j` the cloud holds `Δt = |t_j - t_i|` and
/// `Δm = v_j - v_i`. Pairs are ordered by `Δt`; pairs with equal separation
/// keep their enumeration order. The cost is quadratic in the number of
/// observations.
///
/// `times` need not be sorted.
///
/// # Errors
/// * [`TimescalesError::InvalidArgument`] if the lengths differ
/// * [`TimescalesError::DegenerateInput`] for fewer than two unique times
///
/// # Example
/// ```
/// use anofox_timescales::dmdt::dmdt;
///
/// let cloud = dmdt(&[0.0, 1.0, 2.0], &[0.0, 1.0, 3.0]).unwrap();
/// assert_eq!(cloud.len(), 3);
/// assert_eq!(cloud.delta_t(), &[1.0, 1.0, 2.0]);
/// assert_eq!(cloud.delta_m(), &[1.0, 2.0, 3.0]);
/// ```
pub fn dmdt(times: &[f64], values: &[f64]) -> Result<DmDtCloud> {
    check_lengths(times, values, "values", "dmdt")?;
    if !has_distinct_values(times) {
        return Err(TimescalesError::DegenerateInput(
            "argument 'times' to dmdt() contains fewer than two unique values".to_string(),
        ));
    }

    let n = times.len();
    let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push(((times[j] - times[i]).abs(), values[j] - values[i]));
        }
    }
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    debug!("dmdt: {} pairs from {} observations", pairs.len(), n);

    let (delta_t, delta_m) = pairs.into_iter().unzip();
    Ok(DmDtCloud { delta_t, delta_m })
}
