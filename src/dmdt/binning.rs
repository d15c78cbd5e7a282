//! Summaries of a Δm-Δt cloud binned by time separation.

use crate::error::{Result, TimescalesError};
use crate::utils::binning::{bin_index, check_edges};
use crate::utils::stats::{quantile_sorted, sort_floats};

fn check_cloud(delta_t: &[f64], delta_m: &[f64], op: &str) -> Result<()> {
    if delta_t.len() != delta_m.len() {
        return Err(TimescalesError::InvalidArgument(format!(
            "arguments 'delta_t' and 'delta_m' to {}() are not the same length (gave {} and {})",
            op,
            delta_t.len(),
            delta_m.len()
        )));
    }
    Ok(())
}

/// Group `|Δm|` by the bin of its `Δt`, dropping pairs outside the edges.
fn group_amplitudes(delta_t: &[f64], delta_m: &[f64], bin_edges: &[f64]) -> Vec<Vec<f64>> {
    let mut groups = vec![Vec::new(); bin_edges.len() - 1];
    for (&dt, &dm) in delta_t.iter().zip(delta_m.iter()) {
        if let Some(k) = bin_index(bin_edges, dt) {
            groups[k].push(dm.abs());
        }
    }
    groups
}

/// Fraction of pairs in each `Δt` bin whose `|Δm|` exceeds `threshold`.
///
/// Bins are `[e_k, e_{k+1})`, with the last bin closed. Pairs outside the
/// edges are ignored; empty bins report NaN.
///
/// # Errors
/// [`TimescalesError::InvalidArgument`] if the cloud lengths differ or the
/// edges are fewer than two, non-finite or not strictly ascending.
///
/// # Example
/// ```
/// use anofox_timescales::dmdt::hi_amp_bin_frac;
///
/// let fracs = hi_amp_bin_frac(&[1.0, 1.0, 2.0], &[1.0, 2.0, 3.0], &[0.0, 3.0], 1.5).unwrap();
/// assert!((fracs[0] - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn hi_amp_bin_frac(
    delta_t: &[f64],
    delta_m: &[f64],
    bin_edges: &[f64],
    threshold: f64,
) -> Result<Vec<f64>> {
    check_cloud(delta_t, delta_m, "hi_amp_bin_frac")?;
    check_edges(bin_edges, "hi_amp_bin_frac")?;

    Ok(group_amplitudes(delta_t, delta_m, bin_edges)
        .into_iter()
        .map(|group| {
            if group.is_empty() {
                f64::NAN
            } else {
                group.iter().filter(|&&amp| amp > threshold).count() as f64 / group.len() as f64
            }
        })
        .collect())
}

/// The `q`-quantile of `|Δm|` in each `Δt` bin.
///
/// Quantiles interpolate linearly between order statistics. Binning follows
/// [`hi_amp_bin_frac`].
///
/// # Errors
/// As [`hi_amp_bin_frac`], and [`TimescalesError::InvalidArgument`] if `q`
/// is outside `[0, 1]`.
pub fn delta_m_bin_quantile(
    delta_t: &[f64],
    delta_m: &[f64],
    bin_edges: &[f64],
    q: f64,
) -> Result<Vec<f64>> {
    if !(0.0..=1.0).contains(&q) {
        return Err(TimescalesError::InvalidArgument(format!(
            "argument 'q' to delta_m_bin_quantile() must be in [0, 1] (gave {})",
            q
        )));
    }
    check_cloud(delta_t, delta_m, "delta_m_bin_quantile")?;
    check_edges(bin_edges, "delta_m_bin_quantile")?;

    Ok(group_amplitudes(delta_t, delta_m, bin_edges)
        .into_iter()
        .map(|mut group| {
            sort_floats(&mut group);
            quantile_sorted(&group, q)
        })
        .collect())
}
