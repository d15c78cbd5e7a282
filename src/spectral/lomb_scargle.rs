//! Lomb-Scargle periodogram.
//!
//! Implements the Scargle (1982) power with the variance normalization of
//! Horne & Baliunas (1986): for pure Gaussian noise the power at any single
//! frequency is approximately exponentially distributed with mean 1.

use super::dft::{trig_sums, unit_trig_sums};
use crate::core::sampling::{check_frequencies, check_lengths, check_times, check_variance};
use crate::error::Result;
use crate::peaks::{peak_find, Peak};
use crate::utils::stats::{argmax, mean, variance};
use std::f64::consts::PI;

/// Fraction of N below which a quadrature normalization is treated as zero.
const DEGENERATE_QUADRATURE: f64 = 1e-10;

/// Per-frequency terms that depend on the sampling only.
#[derive(Debug, Clone, Copy)]
struct PlanRow {
    omega: f64,
    cos_wtau: f64,
    sin_wtau: f64,
    cos_norm: f64,
    sin_norm: f64,
}

/// Sampling-dependent part of the periodogram, reusable across flux series
/// observed at the same times.
///
/// The phase offset τ that makes the sine and cosine components orthogonal
/// depends only on the times, so repeated evaluations (as in the
/// significance simulations) pay for it once.
#[derive(Debug, Clone)]
pub(crate) struct ScarglePlan {
    rows: Vec<PlanRow>,
}

impl ScarglePlan {
    /// Precompute the phase offsets for `freqs`. Inputs must already be validated.
    pub(crate) fn new(times: &[f64], freqs: &[f64]) -> Self {
        let n = times.len() as f64;
        let rows = freqs
            .iter()
            .map(|&f| {
                let omega = 2.0 * PI * f;
                // tan(2ωτ) = Σ sin 2ωt / Σ cos 2ωt
                let (c2, s2) = unit_trig_sums(times, 2.0 * omega);
                let (sin_wtau, cos_wtau) = (0.5 * s2.atan2(c2)).sin_cos();
                let resultant = c2.hypot(s2);
                PlanRow {
                    omega,
                    cos_wtau,
                    sin_wtau,
                    cos_norm: 0.5 * (n + resultant),
                    sin_norm: 0.5 * (n - resultant),
                }
            })
            .collect();
        Self { rows }
    }

    /// Number of frequencies in the plan.
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    /// Normalized power at every frequency for a mean-subtracted series.
    pub(crate) fn powers(&self, times: &[f64], centered: &[f64], variance: f64) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row_power(row, times, centered, variance))
            .collect()
    }

    /// Largest normalized power over the grid, or NaN for an empty grid.
    pub(crate) fn max_power(&self, times: &[f64], centered: &[f64], variance: f64) -> f64 {
        self.rows
            .iter()
            .map(|row| row_power(row, times, centered, variance))
            .fold(f64::NAN, f64::max)
    }
}

fn row_power(row: &PlanRow, times: &[f64], centered: &[f64], variance: f64) -> f64 {
    let n = times.len() as f64;
    let (cy, sy) = trig_sums(times, centered, row.omega);

    // Rotate the sums by ωτ
    let y_cos = cy * row.cos_wtau + sy * row.sin_wtau;
    let y_sin = sy * row.cos_wtau - cy * row.sin_wtau;

    let mut power = 0.0;
    if row.cos_norm > DEGENERATE_QUADRATURE * n {
        power += y_cos * y_cos / row.cos_norm;
    }
    // All phases coincide modulo π (e.g. integer times at integer frequencies)
    if row.sin_norm > DEGENERATE_QUADRATURE * n {
        power += y_sin * y_sin / row.sin_norm;
    }
    power / (2.0 * variance)
}

/// Subtracts the mean and returns the centered series with its sample variance.
pub(crate) fn center(fluxes: &[f64]) -> (Vec<f64>, f64) {
    let m = mean(fluxes);
    let centered = fluxes.iter().map(|&x| x - m).collect();
    (centered, variance(fluxes))
}

/// Calculates the Lomb-Scargle periodogram of a lightcurve.
///
/// # Arguments
/// * `times` - Observation times, ascending, at least two unique values
/// * `fluxes` - One measurement per time; must not be constant
/// * `freqs` - Strictly positive frequencies (see [`freq_gen`](crate::grid::freq_gen))
///
/// # Returns
/// One non-negative power per frequency, in grid order.
///
/// # Errors
/// The same sampling and frequency errors as [`dft`](super::dft), plus
/// [`DegenerateInput`](crate::TimescalesError::DegenerateInput) if the fluxes have no variance.
///
/// # Example
/// ```
/// use anofox_timescales::spectral::lomb_scargle;
///
/// let times: Vec<f64> = (0..100).map(|i| i as f64 * 0.37).collect();
/// let fluxes: Vec<f64> = times.iter().map(|t| (2.0 * std::f64::consts::PI * t / 5.0).sin()).collect();
/// let freqs: Vec<f64> = (1..200).map(|k| k as f64 * 0.005).collect();
/// let power = lomb_scargle(&times, &fluxes, &freqs).unwrap();
/// assert_eq!(power.len(), freqs.len());
/// ```
pub fn lomb_scargle(times: &[f64], fluxes: &[f64], freqs: &[f64]) -> Result<Vec<f64>> {
    check_times(times, "lomb_scargle")?;
    check_lengths(times, fluxes, "fluxes", "lomb_scargle")?;
    check_frequencies(freqs)?;

    let (centered, var) = center(fluxes);
    check_variance(var, "fluxes", "lomb_scargle")?;

    let plan = ScarglePlan::new(times, freqs);
    Ok(plan.powers(times, &centered, var))
}

/// A Lomb-Scargle periodogram together with the grid it was evaluated on.
#[derive(Debug, Clone, PartialEq)]
pub struct Periodogram {
    frequencies: Vec<f64>,
    powers: Vec<f64>,
}

impl Periodogram {
    /// Evaluate the periodogram of a lightcurve over `freqs`.
    pub fn compute(times: &[f64], fluxes: &[f64], freqs: &[f64]) -> Result<Self> {
        let powers = lomb_scargle(times, fluxes, freqs)?;
        Ok(Self {
            frequencies: freqs.to_vec(),
            powers,
        })
    }

    /// Frequency grid.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Power at each grid frequency.
    pub fn powers(&self) -> &[f64] {
        &self.powers
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True if the grid was empty.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency and power of the highest peak.
    pub fn peak(&self) -> Option<(f64, f64)> {
        argmax(&self.powers).map(|i| (self.frequencies[i], self.powers[i]))
    }

    /// Period of the highest peak.
    pub fn best_period(&self) -> Option<f64> {
        self.peak().map(|(f, _)| 1.0 / f)
    }

    /// Local maxima of the power spectrum with prominence above `min_prominence`.
    pub fn peaks(&self, min_prominence: f64) -> Vec<Peak> {
        peak_find(&self.frequencies, &self.powers, min_prominence)
    }

    /// Consume the periodogram, returning `(frequencies, powers)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.frequencies, self.powers)
    }
}
