//! # anofox-timescales
//!
//! Timescale analysis for irregularly sampled astronomical lightcurves.
//!
//! Provides the Lomb-Scargle periodogram with Monte-Carlo significance
//! thresholds, a direct discrete Fourier transform, pairwise and
//! band-limited autocorrelation, Δm-Δt pair statistics, frequency and lag
//! grid generation, and prominence-based peak detection.
//!
//! Every analysis is a free function over `(times, values)` slices;
//! [`LightCurve`](core::LightCurve) bundles a validated series with the
//! same operations as methods.

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod correlation;
pub mod dmdt;
pub mod error;
pub mod grid;
pub(crate) mod parallel;
pub mod peaks;
pub mod spectral;
pub mod utils;

pub use error::{Result, TimescalesError};

pub mod prelude {
    pub use crate::core::LightCurve;
    pub use crate::correlation::{ac_window, auto_corr};
    pub use crate::dmdt::{delta_m_bin_quantile, dmdt, hi_amp_bin_frac, DmDtCloud};
    pub use crate::error::{Result, TimescalesError};
    pub use crate::grid::{
        delta_t, freq_gen, max_freq, offset_gen, pseudo_nyquist_freq, FrequencyGridConfig,
        OffsetGridConfig,
    };
    pub use crate::peaks::{peak_find, Peak};
    pub use crate::spectral::{
        dft, lomb_scargle, ls_normal_edf, ls_threshold, EmpiricalDistribution, Periodogram,
        SimulationConfig,
    };
}
