//! Band-limited autocorrelation via the power spectrum.
//!
//! By the Wiener-Khinchin theorem the pair products `Σ x_i x_j` at lag τ are
//! the inverse transform of the power spectrum. Truncating the spectrum at a
//! cutoff replaces the boxcar lag bins of the pairwise estimator with a
//! smooth kernel that ignores structure faster than the cutoff. Evaluating
//! the inverse transform on a uniform lag grid is a single FFT.

use crate::error::{Result, TimescalesError};
use crate::grid::{max_freq, MAX_GRID_LEN};
use crate::spectral::fourier_coefficient;
use log::{debug, trace};
use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;
use std::f64::consts::PI;

/// Normalized band-limited autocorrelation of `series` at uniform `offsets`.
///
/// Inputs must already be validated: `times` ascending with a positive
/// baseline, `offsets` non-empty, non-negative and evenly spaced, `cutoff`
/// positive. The spectrum is sampled finely enough (`df <= 1 / (2 T)`) that
/// the circular inverse transform does not wrap pairs within the baseline.
/// A single offset is evaluated at the step of the cutoff, capped by the
/// sampling's [`max_freq`].
///
/// Fails with [`TimescalesError::InvalidArgument`] when the transform would
/// need more than [`MAX_GRID_LEN`] samples.
pub(crate) fn band_limited_acf(
    times: &[f64],
    series: &[f64],
    offsets: &[f64],
    cutoff: f64,
    baseline: f64,
    op: &str,
) -> Result<Vec<f64>> {
    let k = offsets.len();
    let lag_step = if k > 1 {
        (offsets[k - 1] - offsets[0]) / (k - 1) as f64
    } else {
        0.5 / cutoff.min(max_freq(times)?)
    };
    let first_lag = offsets[0];
    let last_lag = offsets[k - 1];

    let span = (2.0 * last_lag.max(baseline) / lag_step).ceil();
    if !(span.is_finite() && span < MAX_GRID_LEN as f64) {
        return Err(TimescalesError::InvalidArgument(format!(
            "offsets to {}() need a transform of {:.3e} samples at lag step {} (at most {} allowed)",
            op,
            span + 1.0,
            lag_step,
            MAX_GRID_LEN
        )));
    }
    let len = span as usize + 1;
    let df = 1.0 / (len as f64 * lag_step);
    let band = cutoff.min(0.5 / lag_step);
    let n_freqs = ((band / df).floor() as usize + 1).min(len);
    debug!(
        "{}: {} spectral samples below {} (transform length {})",
        op, n_freqs, band, len
    );

    let mut buffer = vec![Complex64::new(0.0, 0.0); len];
    let mut total = 0.0;
    for (m, slot) in buffer.iter_mut().take(n_freqs).enumerate() {
        let freq = m as f64 * df;
        let power = fourier_coefficient(times, series, 2.0 * PI * freq).norm_sqr();
        let weighted = if m == 0 { power } else { 2.0 * power };
        total += weighted;
        // Shift so FFT bin k lands on offsets[0] + k * lag_step
        *slot = weighted * Complex64::from_polar(1.0, 2.0 * PI * freq * first_lag);
    }
    trace!("{}: total band power {}", op, total);

    if !(total > 0.0) {
        return Err(TimescalesError::DegenerateInput(format!(
            "argument 'fluxes' to {}() has no power below {}",
            op, band
        )));
    }

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_inverse(len).process(&mut buffer);

    Ok(buffer
        .iter()
        .take(k)
        .map(|c| (c.re / total).clamp(-1.0, 1.0))
        .collect())
}
