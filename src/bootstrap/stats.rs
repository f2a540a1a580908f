//! bootstrap::stats — plug-in statistics and NA handling for windows.
//!
//! Purpose
//! -------
//! Hold the small numerical kernels shared by the estimator: the NA policy
//! applied to a raw window, the arithmetic mean, the per-resample statistic
//! pair `(mean, variance of the mean)`, and jackknife influence values used
//! by the BCa acceleration constant.
//!
//! Conventions
//! -----------
//! - A missing value is `NaN`; an NA *result* is `None`.
//! - The variance statistic of a sample of length `k` is the plug-in
//!   variance of its mean, `Σ(x − x̄)² / k²`, which equals
//!   `(k − 1)·s² / k²` with `s²` the unbiased sample variance.

/// Statistic pair computed on the original sample and on every resample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicateStat {
    /// Sample mean.
    pub mean: f64,
    /// Plug-in variance of the sample mean, `Σ(x − x̄)² / k²`.
    pub variance: f64,
}

/// Mean and plug-in variance of the mean of `sample`.
///
/// Returns `NaN` for both fields when `sample` is empty.
pub fn mean_and_variance(sample: &[f64]) -> ReplicateStat {
    let k = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / k;
    let sum_sq = sample.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>();
    ReplicateStat { mean, variance: sum_sq / (k * k) }
}

/// Apply the NA policy to a raw window.
///
/// With `drop_na` the `NaN`s are removed. Without it the window is returned
/// unchanged, `NaN`s included, so that any downstream mean is NA.
pub fn apply_na_policy(window: &[f64], drop_na: bool) -> Vec<f64> {
    if drop_na {
        window.iter().copied().filter(|v| !v.is_nan()).collect()
    } else {
        window.to_vec()
    }
}

/// Arithmetic mean under the NA policy; `None` when no value survives or
/// the result is `NaN`.
pub fn arithmetic_mean(window: &[f64], drop_na: bool) -> Option<f64> {
    let values = apply_na_policy(window, drop_na);
    if values.is_empty() {
        return None;
    }
    na_if_nan(mean_and_variance(&values).mean)
}

/// Map `NaN` to NA.
pub fn na_if_nan(value: f64) -> Option<f64> {
    if value.is_nan() { None } else { Some(value) }
}

/// Jackknife influence values of the mean, `L_i = (n − 1)(θ̄₍.₎ − θ₍₋ᵢ₎)`.
///
/// For the mean these reduce to `x_i − x̄`; the leave-one-out form is kept
/// so the acceleration constant follows its textbook definition. Returns an
/// empty vector when `sample.len() < 2`.
pub fn jackknife_influence(sample: &[f64]) -> Vec<f64> {
    let n = sample.len();
    if n < 2 {
        return Vec::new();
    }
    let total: f64 = sample.iter().sum();
    let leave_one_out: Vec<f64> = sample.iter().map(|&x| (total - x) / (n - 1) as f64).collect();
    let jack_mean = leave_one_out.iter().sum::<f64>() / n as f64;
    leave_one_out.iter().map(|&theta| (n - 1) as f64 * (jack_mean - theta)).collect()
}
