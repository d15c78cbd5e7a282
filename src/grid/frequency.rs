//! Characteristic frequencies of a sampling cadence and frequency grids.

use crate::core::sampling::is_sorted;
use crate::error::{Result, TimescalesError};
use log::debug;

/// Default number of grid points per resolution element `1 / delta_t`.
pub const DEFAULT_OVERSAMPLING: f64 = 5.0;

/// Largest number of points any generated grid may hold.
pub const MAX_GRID_LEN: usize = 1 << 26;

/// Relative slack, in units of the step, for admitting `f_max` into a grid.
const ENDPOINT_SLACK: f64 = 1e-9;

/// Returns the time interval covered by the data.
///
/// The times need not be sorted.
///
/// # Errors
/// [`TimescalesError::DegenerateInput`] if `times` has fewer than two
/// elements or only one unique value.
pub fn delta_t(times: &[f64]) -> Result<f64> {
    if times.len() < 2 {
        return Err(TimescalesError::DegenerateInput(format!(
            "argument 'times' to delta_t() contains fewer than 2 observations (gave {})",
            times.len()
        )));
    }

    let (t_min, t_max) = times
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
            (lo.min(t), hi.max(t))
        });

    if t_max > t_min {
        Ok(t_max - t_min)
    } else {
        Err(TimescalesError::DegenerateInput(
            "argument 'times' to delta_t() contains only one unique value".to_string(),
        ))
    }
}

/// Returns the pseudo-Nyquist frequency `N / (2 T)` of a set of observations.
///
/// This is the frequency resolution the data would have if the same number of
/// points were spread evenly over the same baseline.
pub fn pseudo_nyquist_freq(times: &[f64]) -> Result<f64> {
    Ok(0.5 * times.len() as f64 / delta_t(times)?)
}

/// Returns the highest frequency the data can resolve, `1 / (2 dt)`, where `dt`
/// is the smallest strictly positive gap between consecutive observations.
///
/// # Errors
/// * [`TimescalesError::DegenerateInput`] for fewer than two observations, or
///   if no positive gap exists.
/// * [`TimescalesError::NotSorted`] if `times` is not ascending.
pub fn max_freq(times: &[f64]) -> Result<f64> {
    if times.len() < 2 {
        return Err(TimescalesError::DegenerateInput(format!(
            "argument 'times' to max_freq() contains fewer than 2 observations (gave {})",
            times.len()
        )));
    }
    if !is_sorted(times) {
        return Err(TimescalesError::NotSorted(
            "argument 'times' to max_freq() is unsorted".to_string(),
        ));
    }

    let min_gap = times
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&gap| gap > 0.0)
        .fold(f64::INFINITY, f64::min);

    if min_gap.is_finite() {
        Ok(0.5 / min_gap)
    } else {
        Err(TimescalesError::DegenerateInput(
            "argument 'times' to max_freq() contains only one unique value".to_string(),
        ))
    }
}

/// Which characteristic frequency bounds a default grid from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpperBound {
    /// [`pseudo_nyquist_freq`]; works for unsorted times.
    #[default]
    PseudoNyquist,
    /// [`max_freq`]; requires sorted times and can be much larger for
    /// clustered sampling.
    MaxFrequency,
}

/// Configuration for [`freq_gen`].
///
/// Unset bounds are derived from the sampling:
/// * `f_min` defaults to `1 / delta_t` (one cycle over the baseline),
/// * `f_max` defaults to the frequency selected by `upper_bound`,
/// * `f_step` defaults to `1 / (oversampling * delta_t)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGridConfig {
    /// Lowest frequency in the grid.
    pub f_min: Option<f64>,
    /// Highest frequency allowed in the grid.
    pub f_max: Option<f64>,
    /// Spacing between grid points.
    pub f_step: Option<f64>,
    /// Oversampling factor used by the default step (must be >= 1).
    pub oversampling: f64,
    /// Characteristic frequency used as the default upper bound.
    pub upper_bound: UpperBound,
}

impl Default for FrequencyGridConfig {
    fn default() -> Self {
        Self {
            f_min: None,
            f_max: None,
            f_step: None,
            oversampling: DEFAULT_OVERSAMPLING,
            upper_bound: UpperBound::PseudoNyquist,
        }
    }
}

impl FrequencyGridConfig {
    /// Create a config with every value derived from the sampling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fully explicit config.
    pub fn explicit(f_min: f64, f_max: f64, f_step: f64) -> Self {
        Self {
            f_min: Some(f_min),
            f_max: Some(f_max),
            f_step: Some(f_step),
            ..Default::default()
        }
    }

    /// Set the lowest frequency.
    pub fn with_min(mut self, f_min: f64) -> Self {
        self.f_min = Some(f_min);
        self
    }

    /// Set the highest frequency.
    pub fn with_max(mut self, f_max: f64) -> Self {
        self.f_max = Some(f_max);
        self
    }

    /// Set the grid spacing.
    pub fn with_step(mut self, f_step: f64) -> Self {
        self.f_step = Some(f_step);
        self
    }

    /// Set the oversampling factor of the default step.
    pub fn with_oversampling(mut self, oversampling: f64) -> Self {
        self.oversampling = oversampling;
        self
    }

    /// Choose the characteristic frequency used as the default upper bound.
    pub fn with_upper_bound(mut self, upper_bound: UpperBound) -> Self {
        self.upper_bound = upper_bound;
        self
    }
}

/// Creates an evenly spaced, ascending frequency grid for the given sampling.
///
/// Grid points are `f_min + k * f_step` for `k = 0, 1, ...` up to and
/// including `f_max`. Points are computed by multiplication, not repeated
/// addition, so long grids do not drift.
///
/// # Errors
/// * [`TimescalesError::InvalidArgument`] if the oversampling factor is below 1.
/// * [`TimescalesError::InvalidRange`] if `f_min <= 0`, `f_min > f_max`,
///   `f_step <= 0`, a bound is not finite, or the grid would exceed
///   [`MAX_GRID_LEN`] points.
/// * Sampling errors of [`delta_t`] (and of [`max_freq`] when it is the upper bound).
///
/// # Example
/// ```
/// use anofox_timescales::grid::{freq_gen, FrequencyGridConfig};
///
/// let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
/// let grid = freq_gen(&times, &FrequencyGridConfig::explicit(0.1, 0.5, 0.1)).unwrap();
/// assert_eq!(grid.len(), 5);
/// ```
pub fn freq_gen(times: &[f64], config: &FrequencyGridConfig) -> Result<Vec<f64>> {
    if !(config.oversampling >= 1.0 && config.oversampling.is_finite()) {
        return Err(TimescalesError::InvalidArgument(format!(
            "oversampling factor to freq_gen() must be a finite value >= 1 (gave {})",
            config.oversampling
        )));
    }

    // Validates the lightcurve even when every bound is explicit
    let baseline = delta_t(times)?;
    let f_min = config.f_min.unwrap_or(1.0 / baseline);
    let f_step = config
        .f_step
        .unwrap_or(1.0 / (config.oversampling * baseline));
    let f_max = match config.f_max {
        Some(f) => f,
        None => match config.upper_bound {
            UpperBound::PseudoNyquist => pseudo_nyquist_freq(times)?,
            UpperBound::MaxFrequency => max_freq(times)?,
        },
    };

    build_grid(f_min, f_max, f_step)
}

/// Builds `f_min, f_min + f_step, ... <= f_max` after checking the range.
fn build_grid(f_min: f64, f_max: f64, f_step: f64) -> Result<Vec<f64>> {
    if !(f_min.is_finite() && f_max.is_finite() && f_step.is_finite()) {
        return Err(TimescalesError::InvalidRange(format!(
            "freq_gen() bounds must be finite (f_min = {}, f_max = {}, f_step = {})",
            f_min, f_max, f_step
        )));
    }
    if f_min <= 0.0 {
        return Err(TimescalesError::InvalidRange(format!(
            "f_min = {} passed to freq_gen() must be positive",
            f_min
        )));
    }
    if f_min > f_max {
        return Err(TimescalesError::InvalidRange(format!(
            "f_min = {} passed to freq_gen() exceeds f_max = {}",
            f_min, f_max
        )));
    }
    if f_step <= 0.0 {
        return Err(TimescalesError::InvalidRange(format!(
            "f_step = {} passed to freq_gen() must be positive",
            f_step
        )));
    }

    let steps = (f_max - f_min) / f_step + ENDPOINT_SLACK;
    if !(steps.is_finite() && steps < MAX_GRID_LEN as f64) {
        return Err(TimescalesError::InvalidRange(format!(
            "freq_gen() would create {:.3e} points with f_step = {} (at most {} allowed)",
            steps + 1.0,
            f_step,
            MAX_GRID_LEN
        )));
    }
    let n_steps = steps.floor() as usize;
    let grid: Vec<f64> = (0..=n_steps)
        .map(|k| (f_min + k as f64 * f_step).min(f_max))
        .collect();

    debug!(
        "frequency grid: {} points over [{}, {}] with step {}",
        grid.len(),
        f_min,
        f_max,
        f_step
    );
    Ok(grid)
}
