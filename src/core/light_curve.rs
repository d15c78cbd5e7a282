//! Owned, validated lightcurve.

use crate::core::sampling::{check_lengths, check_times};
use crate::correlation::{ac_window, auto_corr};
use crate::dmdt::{dmdt, DmDtCloud};
use crate::error::{Result, TimescalesError};
use crate::grid::{
    delta_t, freq_gen, max_freq, offset_gen, pseudo_nyquist_freq, FrequencyGridConfig,
    OffsetGridConfig,
};
use crate::spectral::{
    dft, ls_normal_edf, ls_threshold, Complex64, EmpiricalDistribution, Periodogram,
    SimulationConfig,
};
use std::cmp::Ordering;

/// A brightness time series with ascending times and at least two distinct
/// observation epochs.
///
/// Every analysis in the crate is available as a free function on slices;
/// `LightCurve` validates once and forwards to them.
#[derive(Debug, Clone, PartialEq)]
pub struct LightCurve {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl LightCurve {
    /// Create a lightcurve from ascending times and one value per time.
    ///
    /// # Errors
    /// * [`TimescalesError::InvalidArgument`] if the lengths differ or a value is not finite
    /// * [`TimescalesError::DegenerateInput`] for fewer than two distinct times
    /// * [`TimescalesError::NotSorted`] if `times` is not ascending
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        check_lengths(&times, &values, "values", "LightCurve::new")?;
        if let Some(i) = times
            .iter()
            .chain(values.iter())
            .position(|v| !v.is_finite())
        {
            let (name, index) = if i < times.len() {
                ("times", i)
            } else {
                ("values", i - times.len())
            };
            return Err(TimescalesError::InvalidArgument(format!(
                "argument '{}' to LightCurve::new() has a non-finite entry at index {}",
                name, index
            )));
        }
        check_times(&times, "LightCurve::new")?;
        Ok(Self { times, values })
    }

    /// Create a lightcurve from observations in any order, sorting them by time.
    pub fn from_unsorted(times: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        check_lengths(&times, &values, "values", "LightCurve::from_unsorted")?;
        let mut pairs: Vec<(f64, f64)> = times.into_iter().zip(values).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        let (times, values) = pairs.into_iter().unzip();
        Self::new(times, values)
    }

    /// Observation times, ascending.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Flux or magnitude at each observation.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the lightcurve holds no observations.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time between first and last observation.
    pub fn baseline(&self) -> Result<f64> {
        delta_t(&self.times)
    }

    /// Pseudo-Nyquist frequency of this sampling. See [`pseudo_nyquist_freq`].
    pub fn pseudo_nyquist_freq(&self) -> Result<f64> {
        pseudo_nyquist_freq(&self.times)
    }

    /// Highest frequency this sampling can resolve. See [`max_freq`].
    pub fn max_freq(&self) -> Result<f64> {
        max_freq(&self.times)
    }

    /// Frequency grid for this sampling. See [`freq_gen`].
    pub fn frequency_grid(&self, config: &FrequencyGridConfig) -> Result<Vec<f64>> {
        freq_gen(&self.times, config)
    }

    /// Lag grid for this sampling. See [`offset_gen`].
    pub fn offset_grid(&self, config: &OffsetGridConfig) -> Result<Vec<f64>> {
        offset_gen(&self.times, config)
    }

    /// Fourier transform of the values at `freqs`. See [`dft`].
    pub fn dft(&self, freqs: &[f64]) -> Result<Vec<Complex64>> {
        dft(&self.times, &self.values, freqs)
    }

    /// Lomb-Scargle periodogram over `freqs`.
    pub fn periodogram(&self, freqs: &[f64]) -> Result<Periodogram> {
        Periodogram::compute(&self.times, &self.values, freqs)
    }

    /// Power that white noise at this sampling exceeds with probability `fap`.
    /// See [`ls_threshold`].
    pub fn significance_threshold(
        &self,
        freqs: &[f64],
        fap: f64,
        config: &SimulationConfig,
    ) -> Result<f64> {
        ls_threshold(&self.times, freqs, fap, config)
    }

    /// Distribution of the maximum white-noise power at this sampling.
    /// See [`ls_normal_edf`].
    pub fn noise_distribution(
        &self,
        freqs: &[f64],
        config: &SimulationConfig,
    ) -> Result<EmpiricalDistribution> {
        ls_normal_edf(&self.times, freqs, config)
    }

    /// Autocorrelation of the values at `offsets`. See [`auto_corr`].
    pub fn auto_corr(&self, offsets: &[f64], max_freq: Option<f64>) -> Result<Vec<f64>> {
        auto_corr(&self.times, &self.values, offsets, max_freq)
    }

    /// Autocorrelation window of this sampling. See [`ac_window`].
    pub fn ac_window(&self, offsets: &[f64], max_freq: Option<f64>) -> Result<Vec<f64>> {
        ac_window(&self.times, offsets, max_freq)
    }

    /// Cloud of magnitude and time differences over all pairs. See [`dmdt`].
    pub fn dmdt(&self) -> Result<DmDtCloud> {
        dmdt(&self.times, &self.values)
    }
}
