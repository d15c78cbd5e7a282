//! Spectral analysis of irregularly sampled lightcurves.
//!
//! This module provides:
//! - [`dft`]: the brute-force discrete Fourier transform
//! - [`lomb_scargle`]: the Lomb-Scargle periodogram
//! - [`ls_threshold`] and [`ls_normal_edf`]: Monte-Carlo false-alarm thresholds

mod dft;
mod lomb_scargle;
mod significance;

pub use dft::dft;
pub use lomb_scargle::{lomb_scargle, Periodogram};
pub use significance::{ls_normal_edf, ls_threshold, EmpiricalDistribution, SimulationConfig};

pub(crate) use dft::fourier_coefficient;
pub use rustfft::num_complex::Complex64;
