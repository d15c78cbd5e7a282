//! Discrete Fourier transform for irregularly sampled data.
//!
//! No assumption of uniform spacing is made, so the transform is evaluated by
//! direct summation in O(N·F) time rather than through an FFT factorization.

use crate::core::sampling::{check_frequencies, check_lengths, check_times};
use crate::error::Result;
use rustfft::num_complex::Complex64;
use std::f64::consts::PI;

/// Weighted trigonometric sums `(Σ w cos ωt, Σ w sin ωt)`.
///
/// This is the spectral accumulation primitive shared by the DFT, the
/// Lomb-Scargle periodogram and the band-limited autocorrelation path.
#[inline]
pub(crate) fn trig_sums(times: &[f64], weights: &[f64], omega: f64) -> (f64, f64) {
    times
        .iter()
        .zip(weights.iter())
        .fold((0.0, 0.0), |(c, s), (&t, &w)| {
            let (sin, cos) = (omega * t).sin_cos();
            (c + w * cos, s + w * sin)
        })
}

/// Unweighted trigonometric sums `(Σ cos ωt, Σ sin ωt)`.
#[inline]
pub(crate) fn unit_trig_sums(times: &[f64], omega: f64) -> (f64, f64) {
    times.iter().fold((0.0, 0.0), |(c, s), &t| {
        let (sin, cos) = (omega * t).sin_cos();
        (c + cos, s + sin)
    })
}

/// Fourier coefficient `Σ_j x_j exp(-i ω t_j)` without input validation.
#[inline]
pub(crate) fn fourier_coefficient(times: &[f64], values: &[f64], omega: f64) -> Complex64 {
    let (c, s) = trig_sums(times, values, omega);
    Complex64::new(c, -s)
}

/// Calculates the discrete Fourier transform of a lightcurve.
///
/// For each frequency `f` the result is `Σ_j fluxes[j] · exp(-2πi f times[j])`.
/// No mean is subtracted: a constant series has a non-zero transform wherever
/// the sampling aliases the frequency to zero (e.g. integer times at `f = 1`).
///
/// # Arguments
/// * `times` - Observation times, ascending, at least two unique values
/// * `fluxes` - One measurement per time
/// * `freqs` - Strictly positive frequencies, in the inverse units of `times`
///
/// # Errors
/// * [`DegenerateInput`](crate::TimescalesError::DegenerateInput) if `times` has one unique value
/// * [`NotSorted`](crate::TimescalesError::NotSorted) if `times` is not ascending
/// * [`InvalidArgument`](crate::TimescalesError::InvalidArgument) if the lengths differ
/// * [`NegativeFrequency`](crate::TimescalesError::NegativeFrequency) for any `f <= 0`
///
/// # Example
/// ```
/// use anofox_timescales::spectral::dft;
///
/// let times = [0.0, 1.0, 2.0, 3.0];
/// let fluxes = [1.0; 4];
/// let spectrum = dft(&times, &fluxes, &[0.25]).unwrap();
/// assert!(spectrum[0].norm() < 1e-9);
/// ```
pub fn dft(times: &[f64], fluxes: &[f64], freqs: &[f64]) -> Result<Vec<Complex64>> {
    check_times(times, "dft")?;
    check_lengths(times, fluxes, "fluxes", "dft")?;
    check_frequencies(freqs)?;

    Ok(freqs
        .iter()
        .map(|&f| fourier_coefficient(times, fluxes, 2.0 * PI * f))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimescalesError;
    use approx::assert_relative_eq;

    #[test]
    fn constant_signal_vanishes_at_unaliased_frequencies() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let fluxes = [1.0; 4];
        let spectrum = dft(&times, &fluxes, &[0.25, 0.5, 0.75]).unwrap();
        for coeff in spectrum {
            assert!(coeff.norm() < 1e-9, "expected zero, got {}", coeff);
        }
    }

    #[test]
    fn constant_signal_aliases_to_dc_at_sampling_frequency() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let fluxes = [1.0; 4];
        let spectrum = dft(&times, &fluxes, &[1.0]).unwrap();
        assert_relative_eq!(spectrum[0].norm(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn sinusoid_concentrates_power_at_its_frequency() {
        let n = 200;
        let f0 = 0.1;
        let times: Vec<f64> = (0..n).map(|i| i as f64 + 0.3 * ((i * 7) % 5) as f64 / 5.0).collect();
        let fluxes: Vec<f64> = times.iter().map(|&t| (2.0 * PI * f0 * t).cos()).collect();
        let spectrum = dft(&times, &fluxes, &[f0, 0.237]).unwrap();
        // On-frequency coefficient approaches N/2
        assert!(spectrum[0].norm() > 0.4 * n as f64);
        assert!(spectrum[1].norm() < 0.1 * n as f64);
    }

    #[test]
    fn matches_direct_complex_sum() {
        let times = [0.1, 0.4, 1.3, 2.2, 2.9];
        let fluxes = [1.5, -0.3, 0.8, 2.0, -1.1];
        let freqs = [0.2, 0.7, 1.9];
        let spectrum = dft(&times, &fluxes, &freqs).unwrap();
        for (k, &f) in freqs.iter().enumerate() {
            let expected: Complex64 = times
                .iter()
                .zip(fluxes.iter())
                .map(|(&t, &x)| x * Complex64::new(0.0, -2.0 * PI * f * t).exp())
                .sum();
            assert_relative_eq!(spectrum[k].re, expected.re, epsilon = 1e-12);
            assert_relative_eq!(spectrum[k].im, expected.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn output_aligned_with_grid() {
        let times = [0.0, 1.0, 2.0];
        let spectrum = dft(&times, &[1.0, 2.0, 3.0], &[]).unwrap();
        assert!(spectrum.is_empty());
        let spectrum = dft(&times, &[1.0, 2.0, 3.0], &[0.1; 7]).unwrap();
        assert_eq!(spectrum.len(), 7);
    }

    #[test]
    fn validation_errors() {
        assert!(matches!(
            dft(&[1.0, 1.0], &[1.0, 2.0], &[0.1]),
            Err(TimescalesError::DegenerateInput(_))
        ));
        assert!(matches!(
            dft(&[2.0, 1.0, 3.0], &[1.0, 2.0, 3.0], &[0.1]),
            Err(TimescalesError::NotSorted(_))
        ));
        assert!(matches!(
            dft(&[1.0, 2.0, 3.0], &[1.0, 2.0], &[0.1]),
            Err(TimescalesError::InvalidArgument(_))
        ));
        assert_eq!(
            dft(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], &[0.1, -0.2]),
            Err(TimescalesError::NegativeFrequency {
                index: 1,
                value: -0.2
            })
        );
    }
}
