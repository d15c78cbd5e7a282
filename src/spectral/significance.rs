//! Monte-Carlo significance of Lomb-Scargle peaks.
//!
//! White-noise lightcurves are simulated at the real observation times and
//! run through the periodogram; the distribution of the highest peak per
//! simulation gives false-alarm thresholds that already account for the
//! number of frequencies searched, without analytic asymptotics.

use super::lomb_scargle::{center, ScarglePlan};
use crate::core::sampling::{check_frequencies, check_times};
use crate::error::{Result, TimescalesError};
use crate::parallel::iter_maybe_parallel;
use crate::utils::stats::{quantile_sorted, sort_floats};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;
use statrs::distribution::Normal;

/// Configuration for significance simulations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of white-noise lightcurves to simulate.
    pub n_sims: usize,
    /// Random seed for reproducibility (None for random).
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_sims: 1000,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a config with the given number of simulations.
    pub fn new(n_sims: usize) -> Self {
        Self {
            n_sims,
            ..Default::default()
        }
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Calculates the periodogram power corresponding to a false-alarm probability.
///
/// Simulates `config.n_sims` Gaussian white-noise lightcurves at `times`,
/// records the highest Lomb-Scargle power over `freqs` for each, and returns
/// the `1 - fap` quantile of those maxima. A peak in the real periodogram
/// above this power has (approximately) probability `fap` of arising from
/// noise anywhere on the grid.
///
/// # Errors
/// * [`TimescalesError::InvalidArgument`] if `fap` is not in `(0, 1)`,
///   `n_sims` is zero, or `freqs` is empty.
/// * Sampling and frequency errors of [`lomb_scargle`](super::lomb_scargle).
///
/// # Example
/// ```
/// use anofox_timescales::spectral::{ls_threshold, SimulationConfig};
///
/// let times: Vec<f64> = (0..50).map(|i| i as f64 * 1.3).collect();
/// let freqs: Vec<f64> = (1..100).map(|k| k as f64 * 0.004).collect();
/// let config = SimulationConfig::new(200).with_seed(42);
/// let threshold = ls_threshold(&times, &freqs, 0.01, &config).unwrap();
/// assert!(threshold > 1.0);
/// ```
pub fn ls_threshold(
    times: &[f64],
    freqs: &[f64],
    fap: f64,
    config: &SimulationConfig,
) -> Result<f64> {
    check_fap(fap, "ls_threshold")?;
    let mut maxima = simulate_max_powers(times, freqs, config, "ls_threshold")?;
    sort_floats(&mut maxima);
    Ok(quantile_sorted(&maxima, 1.0 - fap))
}

/// Calculates the empirical distribution function of the highest
/// periodogram peak of white noise sampled at `times`.
///
/// The result can be queried for any false-alarm probability without
/// rerunning the simulations.
///
/// # Errors
/// As for [`ls_threshold`], except that no false-alarm probability is involved.
pub fn ls_normal_edf(
    times: &[f64],
    freqs: &[f64],
    config: &SimulationConfig,
) -> Result<EmpiricalDistribution> {
    let mut maxima = simulate_max_powers(times, freqs, config, "ls_normal_edf")?;
    sort_floats(&mut maxima);
    Ok(EmpiricalDistribution::from_sorted(&maxima))
}

/// Empirical distribution function of simulated peak powers.
///
/// `powers` is strictly ascending and `probs[k]` is the fraction of
/// simulations whose highest peak is at most `powers[k]`; the last
/// probability is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalDistribution {
    powers: Vec<f64>,
    probs: Vec<f64>,
}

impl EmpiricalDistribution {
    /// Build from sorted samples, collapsing ties into a single step.
    fn from_sorted(sorted: &[f64]) -> Self {
        let n = sorted.len() as f64;
        let mut powers: Vec<f64> = Vec::with_capacity(sorted.len());
        let mut probs: Vec<f64> = Vec::with_capacity(sorted.len());

        for (i, &p) in sorted.iter().enumerate() {
            let prob = (i + 1) as f64 / n;
            match (powers.last(), probs.last_mut()) {
                (Some(&last), Some(last_prob)) if last == p => *last_prob = prob,
                _ => {
                    powers.push(p);
                    probs.push(prob);
                }
            }
        }

        Self { powers, probs }
    }

    /// Distinct simulated peak powers, ascending.
    pub fn powers(&self) -> &[f64] {
        &self.powers
    }

    /// Cumulative probability at each power.
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Number of distinct steps.
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    /// True if the distribution has no steps.
    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// Fraction of simulations whose highest peak is at most `power`.
    pub fn cdf(&self, power: f64) -> f64 {
        let k = self.powers.partition_point(|&p| p <= power);
        if k == 0 {
            0.0
        } else {
            self.probs[k - 1]
        }
    }

    /// Probability that noise alone produces a peak above `power`.
    pub fn false_alarm_probability(&self, power: f64) -> f64 {
        1.0 - self.cdf(power)
    }

    /// Power whose false-alarm probability is `fap`, interpolating linearly
    /// between the steps of the distribution.
    ///
    /// # Errors
    /// [`TimescalesError::InvalidArgument`] if `fap` is not in `(0, 1)`.
    pub fn threshold(&self, fap: f64) -> Result<f64> {
        check_fap(fap, "threshold")?;
        let target = 1.0 - fap;

        let k = self.probs.partition_point(|&p| p < target);
        if k == 0 {
            return Ok(self.powers[0]);
        }
        if k >= self.probs.len() {
            return Ok(self.powers[self.powers.len() - 1]);
        }

        let (p0, p1) = (self.probs[k - 1], self.probs[k]);
        let (x0, x1) = (self.powers[k - 1], self.powers[k]);
        Ok(x0 + (x1 - x0) * (target - p0) / (p1 - p0))
    }

    /// Consume the distribution, returning `(powers, probs)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.powers, self.probs)
    }
}

fn check_fap(fap: f64, op: &str) -> Result<()> {
    if fap > 0.0 && fap < 1.0 {
        Ok(())
    } else {
        Err(TimescalesError::InvalidArgument(format!(
            "false-alarm probability {} passed to {}() must lie strictly between 0 and 1",
            fap, op
        )))
    }
}

/// Highest periodogram power of each simulated white-noise lightcurve, in
/// simulation order.
///
/// Simulation `k` draws from a generator seeded with `base + k`, so the
/// result does not depend on how the trials are scheduled.
fn simulate_max_powers(
    times: &[f64],
    freqs: &[f64],
    config: &SimulationConfig,
    op: &str,
) -> Result<Vec<f64>> {
    if config.n_sims == 0 {
        return Err(TimescalesError::InvalidArgument(format!(
            "number of simulations passed to {}() must be at least 1",
            op
        )));
    }
    check_times(times, op)?;
    check_frequencies(freqs)?;
    if freqs.is_empty() {
        return Err(TimescalesError::InvalidArgument(format!(
            "frequency grid passed to {}() is empty",
            op
        )));
    }

    let normal =
        Normal::new(0.0, 1.0).map_err(|e| TimescalesError::InvalidArgument(e.to_string()))?;
    let base_seed = config
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen::<u64>());
    let plan = ScarglePlan::new(times, freqs);
    let n = times.len();

    debug!(
        "{}: simulating {} white-noise lightcurves of {} points over {} frequencies",
        op,
        config.n_sims,
        n,
        plan.len()
    );

    let maxima: Vec<f64> = iter_maybe_parallel!(0..config.n_sims)
        .map(|k| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(k as u64));
            let noise: Vec<f64> = (0..n).map(|_| rng.sample(&normal)).collect();
            let (centered, var) = center(&noise);
            let max_power = plan.max_power(times, &centered, var);
            trace!("{}: simulation {} peak power {}", op, k, max_power);
            max_power
        })
        .collect();

    Ok(maxima)
}
