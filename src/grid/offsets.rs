//! Time-lag grids for the autocorrelation engine.

use super::frequency::{delta_t, max_freq, MAX_GRID_LEN};
use crate::error::{Result, TimescalesError};
use log::debug;

/// Configuration for [`offset_gen`].
///
/// Unset values are derived from the sampling: the step defaults to the
/// smallest positive gap between observations and the largest lag to the
/// full baseline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetGridConfig {
    /// Spacing between lags.
    pub step: Option<f64>,
    /// Largest lag in the grid.
    pub max_offset: Option<f64>,
}

impl OffsetGridConfig {
    /// Create a config with every value derived from the sampling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lag spacing.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Set the largest lag.
    pub fn with_max_offset(mut self, max_offset: f64) -> Self {
        self.max_offset = Some(max_offset);
        self
    }
}

/// Creates a uniform lag grid `0, step, 2 step, ... <= max_offset`.
///
/// The result always starts at zero lag and is uniform, so it can be passed
/// to the band-limited path of [`auto_corr`](crate::correlation::auto_corr).
///
/// # Errors
/// * [`TimescalesError::InvalidRange`] for a non-positive step, a negative
///   largest lag, non-finite values, or a grid longer than
///   [`MAX_GRID_LEN`].
/// * Sampling errors of [`delta_t`] and, when the step is derived,
///   [`max_freq`] (which requires sorted times).
pub fn offset_gen(times: &[f64], config: &OffsetGridConfig) -> Result<Vec<f64>> {
    let max_offset = match config.max_offset {
        Some(m) => m,
        None => delta_t(times)?,
    };
    let step = match config.step {
        Some(s) => s,
        None => 0.5 / max_freq(times)?,
    };

    if !(step.is_finite() && step > 0.0) {
        return Err(TimescalesError::InvalidRange(format!(
            "lag step {} passed to offset_gen() must be positive and finite",
            step
        )));
    }
    if !(max_offset.is_finite() && max_offset >= 0.0) {
        return Err(TimescalesError::InvalidRange(format!(
            "largest lag {} passed to offset_gen() must be non-negative and finite",
            max_offset
        )));
    }

    let steps = max_offset / step + 1e-9;
    if !(steps.is_finite() && steps < MAX_GRID_LEN as f64) {
        return Err(TimescalesError::InvalidRange(format!(
            "offset_gen() would create {:.3e} lags with step {} (at most {} allowed)",
            steps + 1.0,
            step,
            MAX_GRID_LEN
        )));
    }
    let n_steps = steps.floor() as usize;
    let grid: Vec<f64> = (0..=n_steps)
        .map(|k| (k as f64 * step).min(max_offset))
        .collect();

    debug!("offset grid: {} lags up to {} with step {}", grid.len(), max_offset, step);
    Ok(grid)
}
