//! End-to-end timescale analysis of a synthetic lightcurve.
//!
//! Run with `cargo run --example quickstart`.

use anofox_timescales::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<()> {
    // Nightly sampling with jitter and occasional weather gaps
    let mut rng = StdRng::seed_from_u64(2013);
    let mut times = Vec::new();
    let mut t = 0.0;
    for _ in 0..150 {
        t += 1.0 + rng.gen_range(-0.2..0.2) + if rng.gen_bool(0.15) { 2.0 } else { 0.0 };
        times.push(t);
    }
    let fluxes: Vec<f64> = times
        .iter()
        .map(|&t| (2.0 * std::f64::consts::PI * t / 9.4).sin() + 0.4 * rng.gen_range(-1.0..1.0))
        .collect();

    let lc = LightCurve::new(times, fluxes)?;
    println!(
        "{} observations over {:.1} days, pseudo-Nyquist {:.3}/day",
        lc.len(),
        lc.baseline()?,
        lc.pseudo_nyquist_freq()?
    );

    // Periodogram and its 1% false-alarm level
    let freqs = lc.frequency_grid(&FrequencyGridConfig::default())?;
    let periodogram = lc.periodogram(&freqs)?;
    let threshold =
        lc.significance_threshold(&freqs, 0.01, &SimulationConfig::new(500).with_seed(1))?;
    println!("1% false-alarm power: {:.2}", threshold);
    for peak in periodogram
        .peaks(1.0)
        .into_iter()
        .filter(|p| p.value > threshold)
    {
        println!(
            "  significant period {:.2} d (power {:.2}, prominence {:.2})",
            1.0 / peak.location,
            peak.value,
            peak.prominence
        );
    }

    // Autocorrelation on a half-day lag grid
    let offsets = lc.offset_grid(&OffsetGridConfig::new().with_step(0.5).with_max_offset(30.0))?;
    let acf = lc.auto_corr(&offsets, None)?;
    let acf_peaks = peak_find(&offsets, &acf, 0.2);
    if let Some(first) = acf_peaks.first() {
        println!("first ACF peak at lag {:.1} d (r = {:.2})", first.location, first.value);
    }

    // Variability amplitude by timescale
    let cloud = lc.dmdt()?;
    let edges = [0.0, 1.5, 3.0, 6.0, 12.0, 24.0];
    let median = cloud.delta_m_bin_quantile(&edges, 0.5)?;
    for (bin, m) in edges.windows(2).zip(median) {
        println!("  |dm| median for dt in [{:>4.1}, {:>4.1}): {:.3}", bin[0], bin[1], m);
    }

    Ok(())
}
