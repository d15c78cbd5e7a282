//! Property-based tests for the timescale analysis engines.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated irregular sampling and fluxes.

use anofox_timescales::correlation::{ac_window, auto_corr};
use anofox_timescales::dmdt::{dmdt, hi_amp_bin_frac};
use anofox_timescales::grid::{
    delta_t, freq_gen, offset_gen, pseudo_nyquist_freq, FrequencyGridConfig, OffsetGridConfig,
    UpperBound,
};
use anofox_timescales::peaks::peak_find;
use anofox_timescales::spectral::{dft, lomb_scargle};
use proptest::prelude::*;

/// Strategy for ascending observation times with strictly positive gaps.
fn times_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        (
            -100.0..100.0_f64,
            prop::collection::vec(0.01..5.0_f64, len - 1),
        )
            .prop_map(|(start, gaps)| {
                let mut times = Vec::with_capacity(gaps.len() + 1);
                times.push(start);
                for gap in gaps {
                    let last = times[times.len() - 1];
                    times.push(last + gap);
                }
                times
            })
    })
}

/// Strategy for a lightcurve: times plus fluxes with non-zero variance.
fn lightcurve_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    times_strategy(min_len, max_len).prop_flat_map(|times| {
        let n = times.len();
        prop::collection::vec(-10.0..10.0_f64, n).prop_map(move |mut fluxes| {
            // Add a ramp to ensure non-zero variance
            for (i, f) in fluxes.iter_mut().enumerate() {
                *f += i as f64 * 0.01;
            }
            (times.clone(), fluxes)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn baseline_identities(times in times_strategy(2, 100)) {
        let n = times.len() as f64;
        let dt = delta_t(&times).unwrap();
        prop_assert!((dt - (times[times.len() - 1] - times[0])).abs() <= 1e-9 * dt.max(1.0));
        let pnf = pseudo_nyquist_freq(&times).unwrap();
        prop_assert!((pnf - 0.5 * n / dt).abs() <= 1e-9 * pnf);
    }

    #[test]
    fn default_grid_is_positive_and_ascending(times in times_strategy(3, 100)) {
        for bound in [UpperBound::PseudoNyquist, UpperBound::MaxFrequency] {
            let grid = freq_gen(&times, &FrequencyGridConfig::new().with_upper_bound(bound)).unwrap();
            prop_assert!(!grid.is_empty());
            prop_assert!(grid.iter().all(|&f| f > 0.0));
            prop_assert!(grid.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn default_grid_feeds_periodogram((times, fluxes) in lightcurve_strategy(5, 60)) {
        let grid = freq_gen(&times, &FrequencyGridConfig::default()).unwrap();
        let power = lomb_scargle(&times, &fluxes, &grid).unwrap();
        prop_assert_eq!(power.len(), grid.len());
        prop_assert!(power.iter().all(|&p| p.is_finite() && p >= 0.0));

        let spectrum = dft(&times, &fluxes, &grid).unwrap();
        prop_assert_eq!(spectrum.len(), grid.len());
    }

    #[test]
    fn autocorrelation_is_bounded((times, fluxes) in lightcurve_strategy(5, 60)) {
        let baseline = delta_t(&times).unwrap();
        let config = OffsetGridConfig::new().with_step(baseline / 40.0);
        let offsets = offset_gen(&times, &config).unwrap();

        let direct = auto_corr(&times, &fluxes, &offsets, None).unwrap();
        prop_assert_eq!(direct.len(), offsets.len());
        // Self-pairs always populate the zero-lag bin
        prop_assert!(!direct[0].is_nan());
        for r in direct.into_iter().filter(|r| !r.is_nan()) {
            prop_assert!((-1.0..=1.0).contains(&r));
        }

        let cutoff = 10.0 / baseline;
        let limited = auto_corr(&times, &fluxes, &offsets, Some(cutoff)).unwrap();
        prop_assert!((limited[0] - 1.0).abs() < 1e-9);
        prop_assert!(limited.iter().all(|r| (-1.0..=1.0).contains(r)));

        let window = ac_window(&times, &offsets, None).unwrap();
        prop_assert!(window.iter().all(|&w| w >= 0.0));
        // Zero lag always holds every self-pair
        prop_assert!(window[0] >= 1.0);
    }

    #[test]
    fn dmdt_cloud_shape((times, fluxes) in lightcurve_strategy(2, 40)) {
        let n = times.len();
        let cloud = dmdt(&times, &fluxes).unwrap();
        prop_assert_eq!(cloud.len(), n * (n - 1) / 2);
        prop_assert!(cloud.delta_t().windows(2).all(|w| w[0] <= w[1]));

        let edges = [0.0, 1.0, 5.0, 20.0, 1000.0];
        let fracs = hi_amp_bin_frac(cloud.delta_t(), cloud.delta_m(), &edges, 2.0).unwrap();
        prop_assert_eq!(fracs.len(), edges.len() - 1);
        for f in fracs.into_iter().filter(|f| !f.is_nan()) {
            prop_assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn peaks_are_ordered_interior_maxima(
        ys in prop::collection::vec(-5.0..5.0_f64, 0..200),
        min_prominence in 0.0..3.0_f64,
    ) {
        let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64 * 0.5).collect();
        let peaks = peak_find(&xs, &ys, min_prominence);
        prop_assert!(peaks.windows(2).all(|w| w[0].index < w[1].index));
        for peak in &peaks {
            prop_assert!(peak.index > 0 && peak.index + 1 < ys.len());
            prop_assert_eq!(peak.value, ys[peak.index]);
            prop_assert_eq!(peak.location, xs[peak.index]);
            prop_assert!(peak.value > ys[peak.index - 1]);
            prop_assert!(peak.prominence > min_prominence);
        }
    }
}
