//! Autocorrelation of irregularly sampled lightcurves.
//!
//! Without a frequency cutoff, pairs of observations are binned by their
//! separation and each bin yields a locally normalized discrete correlation
//! (Lehar et al. 1992). With a cutoff, the correlation is computed from the
//! band-limited power spectrum.

use super::fourier::band_limited_acf;
use crate::core::sampling::{
    check_lengths, check_times, check_variance, is_sorted, is_uniform, UNIFORM_TOLERANCE,
};
use crate::error::{Result, TimescalesError};
use crate::grid::{delta_t, max_freq as sampling_max_freq};
use crate::utils::binning::bin_index;
use crate::utils::stats::{mean, variance};
use log::debug;

/// Per-bin pair sums.
#[derive(Debug, Clone, Copy, Default)]
struct PairSums {
    cross: f64,
    left: f64,
    right: f64,
    count: usize,
}

/// Calculates the autocorrelation function of a lightcurve at each offset.
///
/// # Arguments
/// * `times` - Observation times, ascending, at least two unique values
/// * `fluxes` - One measurement per time; must not be constant
/// * `offsets` - Non-negative, ascending lags (see [`offset_gen`](crate::grid::offset_gen))
/// * `max_freq` - Optional cutoff; when set, the correlation only uses power
///   below it and `offsets` must be evenly spaced
///
/// # Returns
/// One value per offset in `[-1, 1]`. On the pairwise path an offset whose
/// bin holds no pair of observations reports NaN.
///
/// # Errors
/// * [`TimescalesError::DegenerateInput`] for fewer than two unique times or constant fluxes
/// * [`TimescalesError::NotSorted`] if `times` or `offsets` is not ascending
/// * [`TimescalesError::InvalidArgument`] for mismatched lengths or a negative or non-finite offset
/// * [`TimescalesError::NotUniform`] if a cutoff is given and `offsets` is unevenly spaced
/// * [`TimescalesError::NegativeFrequency`] if the cutoff is not positive
///
/// # Example
/// ```
/// use anofox_timescales::correlation::auto_corr;
///
/// let times: Vec<f64> = (0..200).map(|i| i as f64 * 0.5).collect();
/// let fluxes: Vec<f64> = times.iter().map(|t| (t / 3.0).sin()).collect();
/// let offsets: Vec<f64> = (0..20).map(|k| k as f64 * 0.5).collect();
/// let acf = auto_corr(&times, &fluxes, &offsets, None).unwrap();
/// assert!((acf[0] - 1.0).abs() < 1e-12);
/// ```
pub fn auto_corr(
    times: &[f64],
    fluxes: &[f64],
    offsets: &[f64],
    max_freq: Option<f64>,
) -> Result<Vec<f64>> {
    check_times(times, "auto_corr")?;
    check_lengths(times, fluxes, "fluxes", "auto_corr")?;
    check_offsets(offsets, "auto_corr")?;
    check_variance(variance(fluxes), "fluxes", "auto_corr")?;
    if offsets.is_empty() {
        return Ok(Vec::new());
    }

    let m = mean(fluxes);
    let centered: Vec<f64> = fluxes.iter().map(|&x| x - m).collect();

    match max_freq {
        Some(cutoff) => {
            debug!("auto_corr: band-limited path below {} over {} lags", cutoff, offsets.len());
            band_limited(times, &centered, offsets, cutoff, "auto_corr")
        }
        None => {
            debug!("auto_corr: pairwise path over {} lags", offsets.len());
            let edges = lag_edges(times, offsets)?;
            Ok(pair_sums(times, &centered, &edges)
                .into_iter()
                .map(|bin| {
                    let norm = (bin.left * bin.right).sqrt();
                    if bin.count == 0 || !(norm > 0.0) {
                        f64::NAN
                    } else {
                        (bin.cross / norm).clamp(-1.0, 1.0)
                    }
                })
                .collect())
        }
    }
}

/// Calculates the sampling window function at each offset.
///
/// The window describes how well the observing pattern alone covers each
/// lag. On the pairwise path it is the number of observation pairs per
/// observation, `n_k / N`, where `n_k` counts the pairs (self-pairs
/// included) whose separation falls in lag bin `k`. On the band-limited
/// path it is the autocorrelation of a constant series computed with the
/// same spectral kernel as [`auto_corr`].
///
/// # Errors
/// As [`auto_corr`], without the flux checks.
pub fn ac_window(times: &[f64], offsets: &[f64], max_freq: Option<f64>) -> Result<Vec<f64>> {
    check_times(times, "ac_window")?;
    check_offsets(offsets, "ac_window")?;
    if offsets.is_empty() {
        return Ok(Vec::new());
    }

    let ones = vec![1.0; times.len()];
    match max_freq {
        Some(cutoff) => band_limited(times, &ones, offsets, cutoff, "ac_window"),
        None => {
            let edges = lag_edges(times, offsets)?;
            let n = times.len() as f64;
            Ok(pair_sums(times, &ones, &edges)
                .into_iter()
                .map(|bin| bin.count as f64 / n)
                .collect())
        }
    }
}

fn check_offsets(offsets: &[f64], op: &str) -> Result<()> {
    if let Some(i) = offsets.iter().position(|&o| !(o.is_finite() && o >= 0.0)) {
        return Err(TimescalesError::InvalidArgument(format!(
            "argument 'offsets' to {}() must be non-negative and finite (gave {} at index {})",
            op, offsets[i], i
        )));
    }
    if !is_sorted(offsets) {
        return Err(TimescalesError::NotSorted(format!(
            "argument 'offsets' to {}() is not sorted in ascending order",
            op
        )));
    }
    Ok(())
}

fn band_limited(
    times: &[f64],
    series: &[f64],
    offsets: &[f64],
    cutoff: f64,
    op: &str,
) -> Result<Vec<f64>> {
    if !(cutoff > 0.0) {
        return Err(TimescalesError::NegativeFrequency {
            index: 0,
            value: cutoff,
        });
    }
    if !is_uniform(offsets, UNIFORM_TOLERANCE) {
        return Err(TimescalesError::NotUniform(format!(
            "argument 'offsets' to {}() must be evenly spaced when a maximum frequency is given",
            op
        )));
    }
    let baseline = delta_t(times)?;
    band_limited_acf(times, series, offsets, cutoff, baseline, op)
}

/// Bin edges around each lag: midpoints between neighbours, extended by half
/// a step at either end and clipped at zero lag.
///
/// Repeated lags produce empty bins.
fn lag_edges(times: &[f64], offsets: &[f64]) -> Result<Vec<f64>> {
    let k = offsets.len();
    let (first_half, last_half) = if k == 1 {
        let half = 0.25 / sampling_max_freq(times)?;
        (half, half)
    } else {
        (
            0.5 * (offsets[1] - offsets[0]),
            0.5 * (offsets[k - 1] - offsets[k - 2]),
        )
    };

    let mut edges = Vec::with_capacity(k + 1);
    edges.push((offsets[0] - first_half).max(0.0));
    edges.extend(offsets.windows(2).map(|w| 0.5 * (w[0] + w[1])));
    edges.push(offsets[k - 1] + last_half);
    Ok(edges)
}

/// Accumulate `Σ a_i a_j`, `Σ a_i²`, `Σ a_j²` and the pair count per lag bin
/// over all pairs `i <= j`. `times` must be ascending.
fn pair_sums(times: &[f64], series: &[f64], edges: &[f64]) -> Vec<PairSums> {
    let mut bins = vec![PairSums::default(); edges.len() - 1];
    let reach = edges[edges.len() - 1];

    for i in 0..times.len() {
        let (ti, ai) = (times[i], series[i]);
        for j in i..times.len() {
            let lag = times[j] - ti;
            if lag > reach {
                break;
            }
            if let Some(k) = bin_index(edges, lag) {
                let aj = series[j];
                let bin = &mut bins[k];
                bin.cross += ai * aj;
                bin.left += ai * ai;
                bin.right += aj * aj;
                bin.count += 1;
            }
        }
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn sinusoid(n: usize, step: f64, period: f64) -> (Vec<f64>, Vec<f64>) {
        let times: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
        let fluxes = times.iter().map(|&t| (2.0 * PI * t / period).sin()).collect();
        (times, fluxes)
    }

    #[test]
    fn pairwise_sinusoid_repeats_each_period() {
        let (times, fluxes) = sinusoid(1000, 0.1, 10.0);
        // Bins narrower than the sampling step hold a single lag each
        let offsets: Vec<f64> = (0..=400).map(|k| k as f64 * 0.05).collect();
        let acf = auto_corr(&times, &fluxes, &offsets, None).unwrap();

        assert_relative_eq!(acf[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(acf[200], 1.0, epsilon = 1e-6);
        assert_relative_eq!(acf[100], -1.0, epsilon = 1e-6);
        assert!(acf[1].is_nan());
        assert!(acf
            .iter()
            .filter(|r| !r.is_nan())
            .all(|&r| (-1.0..=1.0).contains(&r)));
    }

    #[test]
    fn pairwise_values_bounded_on_irregular_sampling() {
        let times: Vec<f64> = (0..150)
            .map(|i| i as f64 + 0.45 * ((i * 37 % 11) as f64 / 11.0))
            .collect();
        let fluxes: Vec<f64> = times
            .iter()
            .enumerate()
            .map(|(i, &t)| (t / 4.0).cos() + 0.3 * ((i * 13 % 7) as f64 - 3.0))
            .collect();
        let offsets: Vec<f64> = (0..40).map(|k| k as f64 * 1.3).collect();
        let acf = auto_corr(&times, &fluxes, &offsets, None).unwrap();
        for r in acf.into_iter().filter(|r| !r.is_nan()) {
            assert!((-1.0..=1.0).contains(&r), "{} out of bounds", r);
        }
    }

    #[test]
    fn empty_bin_reports_nan() {
        let times = [0.0, 1.0, 2.0, 10.0, 11.0];
        let fluxes = [1.0, -1.0, 0.5, 2.0, -0.5];
        let offsets = [0.0, 1.0, 5.0, 9.0];
        let acf = auto_corr(&times, &fluxes, &offsets, None).unwrap();
        assert!(acf[2].is_nan());
        assert!(!acf[1].is_nan());
        assert_relative_eq!(acf[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn band_limited_at_nyquist_matches_lagged_products() {
        let (times, fluxes) = sinusoid(100, 1.0, 10.0);
        let offsets: Vec<f64> = (0..=30).map(|k| k as f64).collect();
        let acf = auto_corr(&times, &fluxes, &offsets, Some(0.5)).unwrap();

        let m = mean(&fluxes);
        let a: Vec<f64> = fluxes.iter().map(|x| x - m).collect();
        let zero_lag: f64 = a.iter().map(|x| x * x).sum();
        for (k, &r) in acf.iter().enumerate() {
            let lagged: f64 = (0..a.len() - k).map(|i| a[i] * a[i + k]).sum();
            assert_relative_eq!(r, lagged / zero_lag, epsilon = 1e-9);
        }
        assert!(acf[10] > 0.85);
        assert!(acf[5] < -0.85);
    }

    #[test]
    fn band_limit_removes_fast_component() {
        let times: Vec<f64> = (0..400).map(|i| i as f64 * 0.25).collect();
        let fluxes: Vec<f64> = times
            .iter()
            .map(|&t| (2.0 * PI * t / 20.0).sin() + (2.0 * PI * t / 1.0).sin())
            .collect();
        let offsets: Vec<f64> = (0..=40).map(|k| k as f64 * 0.25).collect();

        let full = auto_corr(&times, &fluxes, &offsets, Some(2.0)).unwrap();
        let slow = auto_corr(&times, &fluxes, &offsets, Some(0.2)).unwrap();
        // Half a fast period: the fast term anti-correlates only in the full band
        assert!(slow[2] > 0.9);
        assert!(full[2] < slow[2] - 0.3);
    }

    #[test]
    fn band_limited_rejects_uneven_offsets() {
        let (times, fluxes) = sinusoid(50, 1.0, 7.0);
        assert!(matches!(
            auto_corr(&times, &fluxes, &[0.0, 1.0, 3.0], Some(0.5)),
            Err(TimescalesError::NotUniform(_))
        ));
        assert!(matches!(
            ac_window(&times, &[0.0, 1.0, 3.0], Some(0.5)),
            Err(TimescalesError::NotUniform(_))
        ));
        // The pairwise path has no such requirement
        assert!(auto_corr(&times, &fluxes, &[0.0, 1.0, 3.0], None).is_ok());
    }

    #[test]
    fn window_is_triangular_for_even_sampling() {
        let n = 50;
        let times: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let offsets: Vec<f64> = (0..20).map(|k| k as f64).collect();
        let direct = ac_window(&times, &offsets, None).unwrap();
        let spectral = ac_window(&times, &offsets, Some(0.5)).unwrap();
        for k in 0..offsets.len() {
            let expected = (n - k) as f64 / n as f64;
            assert_relative_eq!(direct[k], expected, epsilon = 1e-12);
            assert_relative_eq!(spectral[k], expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn single_offset_uses_half_gap_bin() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let window = ac_window(&times, &[0.0], None).unwrap();
        assert_relative_eq!(window[0], 1.0, epsilon = 1e-12);
        let window = ac_window(&times, &[2.0], None).unwrap();
        assert_relative_eq!(window[0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn huge_cutoff_on_single_offset_is_capped() {
        let (times, fluxes) = sinusoid(20, 1.0, 6.0);
        let acf = auto_corr(&times, &fluxes, &[0.0], Some(1e20)).unwrap();
        assert_relative_eq!(acf[0], 1.0, epsilon = 1e-9);
        let window = ac_window(&times, &[0.0], Some(1e20)).unwrap();
        assert_relative_eq!(window[0], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn unreachable_lag_resolution_is_invalid_argument() {
        let (times, fluxes) = sinusoid(20, 1.0, 6.0);
        assert!(matches!(
            auto_corr(&times, &fluxes, &[0.0, 1e-12], Some(0.5)),
            Err(TimescalesError::InvalidArgument(_))
        ));
        assert!(matches!(
            ac_window(&times, &[1e300], Some(0.5)),
            Err(TimescalesError::InvalidArgument(_))
        ));
    }

    #[test]
    fn empty_offsets_yield_empty_result() {
        let (times, fluxes) = sinusoid(10, 1.0, 3.0);
        assert!(auto_corr(&times, &fluxes, &[], None).unwrap().is_empty());
        assert!(ac_window(&times, &[], Some(0.5)).unwrap().is_empty());
    }

    #[test]
    fn validation_errors() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let fluxes = [1.0, 2.0, 0.0, 1.0];
        assert!(matches!(
            auto_corr(&[1.0, 1.0], &[1.0, 2.0], &[0.0], None),
            Err(TimescalesError::DegenerateInput(_))
        ));
        assert!(matches!(
            auto_corr(&times, &[1.0; 4], &[0.0], None),
            Err(TimescalesError::DegenerateInput(_))
        ));
        assert!(matches!(
            auto_corr(&[0.0, 2.0, 1.0], &[1.0, 2.0, 3.0], &[0.0], None),
            Err(TimescalesError::NotSorted(_))
        ));
        assert!(matches!(
            auto_corr(&times, &fluxes[..3], &[0.0], None),
            Err(TimescalesError::InvalidArgument(_))
        ));
        assert!(matches!(
            auto_corr(&times, &fluxes, &[0.0, -1.0], None),
            Err(TimescalesError::InvalidArgument(_))
        ));
        assert!(matches!(
            auto_corr(&times, &fluxes, &[2.0, 1.0], None),
            Err(TimescalesError::NotSorted(_))
        ));
        assert_eq!(
            auto_corr(&times, &fluxes, &[0.0, 1.0], Some(-0.5)),
            Err(TimescalesError::NegativeFrequency {
                index: 0,
                value: -0.5
            })
        );
    }
}
