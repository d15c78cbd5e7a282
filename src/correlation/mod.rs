//! Autocorrelation and sampling window functions.
//!
//! Two estimators share one interface:
//! - pairwise binning ([`auto_corr`] with `max_freq = None`), valid for any lag grid
//! - band-limited spectral ([`auto_corr`] with `max_freq = Some(f)`), on uniform lag grids

mod acf;
mod fourier;

pub use acf::{ac_window, auto_corr};
