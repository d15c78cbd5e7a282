//! Prominence-filtered peak detection.
//!
//! Works on any sampled curve: periodograms, autocorrelation functions or
//! the lightcurve itself.

/// A local maximum of a sampled curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Abscissa of the peak (e.g. a frequency or a time).
    pub location: f64,
    /// Height of the peak.
    pub value: f64,
    /// Index of the peak in the input; the first index of a plateau.
    pub index: usize,
    /// Height above the higher of the two bounding minima.
    pub prominence: f64,
}

/// Finds the local maxima of `ys` whose prominence exceeds `min_prominence`.
///
/// A local maximum is a point strictly above its left neighbour whose run of
/// equal values ends in a strictly lower value; a plateau is reported at its
/// first index. The first and last samples are never peaks. The bounding
/// minima of a peak are the lowest values between it and the neighbouring
/// local maxima, or the ends of the series.
///
/// If `xs` and `ys` differ in length the extra samples of the longer one are
/// ignored. Peaks are returned in increasing index order.
///
/// # Example
/// ```
/// use anofox_timescales::peaks::peak_find;
///
/// let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let ys = [0.0, 3.0, 1.0, 4.0, 0.0];
/// let peaks = peak_find(&xs, &ys, 0.5);
/// assert_eq!(peaks.iter().map(|p| p.index).collect::<Vec<_>>(), vec![1, 3]);
/// assert!(peak_find(&xs, &ys, 5.0).is_empty());
/// ```
pub fn peak_find(xs: &[f64], ys: &[f64], min_prominence: f64) -> Vec<Peak> {
    let n = xs.len().min(ys.len());
    let ys = &ys[..n];
    let maxima = local_maxima(ys);

    maxima
        .iter()
        .enumerate()
        .filter_map(|(k, &(start, end))| {
            let left_bound = if k == 0 { 0 } else { maxima[k - 1].1 };
            let right_bound = maxima.get(k + 1).map_or(n - 1, |&(next, _)| next);

            let left_min = min_of(&ys[left_bound..=start]);
            let right_min = min_of(&ys[end..=right_bound]);
            let value = ys[start];
            let prominence = value - left_min.max(right_min);

            (prominence > min_prominence).then(|| Peak {
                location: xs[start],
                value,
                index: start,
                prominence,
            })
        })
        .collect()
}

/// First and last index of each local maximum (equal for a single point).
fn local_maxima(ys: &[f64]) -> Vec<(usize, usize)> {
    let n = ys.len();
    let mut maxima = Vec::new();
    if n < 3 {
        return maxima;
    }

    let mut i = 1;
    while i + 1 < n {
        if ys[i] > ys[i - 1] {
            let mut end = i;
            while end + 1 < n && ys[end + 1] == ys[i] {
                end += 1;
            }
            if end + 1 < n && ys[end + 1] < ys[i] {
                maxima.push((i, end));
            }
            i = end + 1;
        } else {
            i += 1;
        }
    }
    maxima
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}
