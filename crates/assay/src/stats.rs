//! Numeric primitives shared by the analysis stages.
//!
//! Functions that take `sorted` expect ascending input; callers sort once and
//! reuse the slice for every quantile.

use std::cmp::Ordering;

/// Sort floats ascending. NaN compares equal so it never panics.
pub fn sort_ascending(values: &mut [f64]) {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
}

/// Linear-interpolation percentile over pre-sorted values.
///
/// The rank is `p / 100 * (n - 1)`; the result blends the floor and ceiling
/// elements by the fractional part. Returns 0 for empty input.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let last = sorted.len() - 1;
    let rank = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(last);
    let weight = rank - lower as f64;

    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Median of pre-sorted values (midpoint average for even lengths).
pub fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 0 => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
        _ => sorted[n / 2],
    }
}

/// Arithmetic mean. Returns 0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Pearson correlation coefficient.
///
/// Both inputs are truncated to the shorter length, so callers must align
/// pairwise-complete values themselves. A zero denominator yields 0.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);

    // Centred sums keep large offsets (epoch millis) from cancelling out.
    let (mean_x, mean_y) = (mean(x), mean(y));
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let numerator = cov;
    let denominator = (var_x * var_y).sqrt();

    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    (numerator / denominator).clamp(-1.0, 1.0)
}
