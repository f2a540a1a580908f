//! bootstrap::intervals — confidence intervals from bootstrap replicates.
//!
//! Purpose
//! -------
//! Turn the original-sample statistic `(t0, v0)` and the replicate
//! statistics `(t*, v*)` into a two-sided interval at confidence `c` for the
//! five classic families: normal, basic, studentized, percentile and BCa.
//!
//! Key behaviors
//! -------------
//! - Order statistics are read with [`norm_inter`]: rank `(R + 1)·α`, exact
//!   order statistic when that rank is integral, the extreme replicate when
//!   it falls outside `1..R`, and otherwise interpolation on the standard
//!   normal quantile scale between neighbouring order statistics.
//! - `Norm`: `t0 − bias ∓ sqrt(v0)·Φ⁻¹((1 + c)/2)` with
//!   `bias = mean(t*) − t0`.
//! - `Basic`: `2·t0 − q((1 + c)/2)`, `2·t0 − q((1 − c)/2)`.
//! - `Perc`: `q((1 − c)/2)`, `q((1 + c)/2)`.
//! - `Stud`: pivots `z* = (t* − t0)/sqrt(v*)`; bounds
//!   `t0 − sqrt(v0)·zq((1 + c)/2)`, `t0 − sqrt(v0)·zq((1 − c)/2)`.
//! - `Bca`: bias correction `w = Φ⁻¹(#{t* < t0}/R)`, acceleration
//!   `a = ΣL³ / (6·(ΣL²)^{3/2})` from jackknife influence values, levels
//!   `Φ(w + (w + zα)/(1 − a·(w + zα)))`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only finite replicate means enter the computations.
//! - A replicate distribution with fewer than two finite means, or whose
//!   range is within `min(1e-8, |t0|/1e6)`, has no interval. The same holds
//!   for non-finite BCa adjustments. These cases are reported as interval
//!   errors and turned into NA bounds by the estimator.
//!
//! Testing notes
//! -------------
//! - Unit tests check [`norm_inter`] on every branch, hand-computed normal
//!   bounds, the basic/percentile reflection, studentized symmetry, the BCa
//!   reduction to percentile when `w = a = 0`, and each degenerate path.
use crate::bootstrap::{
    config::IntervalType,
    errors::{EstimatorError, EstimatorResult},
    stats::{ReplicateStat, jackknife_influence},
};
use statrs::distribution::{ContinuousCDF, Normal};

/// Two-sided interval bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

/// Read the `alpha` quantile of sorted, finite `t` by normal-scale
/// interpolation of order statistics.
///
/// Panics
/// ------
/// - Never for non-empty `t` and `alpha` in `(0, 1)`; callers guarantee both.
pub fn norm_inter(t: &[f64], alpha: f64) -> f64 {
    let normal = Normal::standard();
    let r = t.len();
    let rk = (r as f64 + 1.0) * alpha;
    let k = rk.trunc() as usize;

    if k == 0 {
        return t[0];
    }
    if k >= r {
        return t[r - 1];
    }
    if k as f64 == rk {
        return t[k - 1];
    }

    let denom = (r + 1) as f64;
    let z_alpha = normal.inverse_cdf(alpha);
    let z_low = normal.inverse_cdf(k as f64 / denom);
    let z_high = normal.inverse_cdf((k + 1) as f64 / denom);
    let (tk, tk1) = (t[k - 1], t[k]);
    tk + (z_alpha - z_low) / (z_high - z_low) * (tk1 - tk)
}

/// Build the `kind` interval at level `confidence`.
///
/// Parameters
/// ----------
/// - `kind`: [`IntervalType`]
/// - `confidence`: `f64` in `(0, 1)`.
/// - `original`: statistic `(t0, v0)` of the sample being resampled.
/// - `replicates`: one statistic per bootstrap resample.
/// - `data`: the sample itself; used for BCa influence values.
///
/// Errors
/// ------
/// - `EstimatorError::InsufficientData` when fewer than two finite replicate
///   means (or studentized pivots) remain.
/// - `EstimatorError::DegenerateReplicates` when the replicate means are
///   numerically constant.
/// - `EstimatorError::NonFiniteAdjustment` when BCa's `w` or `a` is not finite.
pub fn build_interval(
    kind: IntervalType, confidence: f64, original: ReplicateStat, replicates: &[ReplicateStat],
    data: &[f64],
) -> EstimatorResult<Interval> {
    let t0 = original.mean;
    let mut t: Vec<f64> = replicates.iter().map(|s| s.mean).filter(|m| m.is_finite()).collect();
    if t.len() < 2 {
        return Err(EstimatorError::InsufficientData { len: t.len() });
    }
    t.sort_by(f64::total_cmp);

    let range = t[t.len() - 1] - t[0];
    let tolerance = 1e-8_f64.min(t0.abs() / 1e6);
    if range <= tolerance {
        return Err(EstimatorError::DegenerateReplicates { value: t0 });
    }

    let alpha_low = (1.0 - confidence) / 2.0;
    let alpha_high = (1.0 + confidence) / 2.0;

    match kind {
        IntervalType::Norm => {
            let bias = t.iter().sum::<f64>() / t.len() as f64 - t0;
            let merr = original.variance.sqrt() * Normal::standard().inverse_cdf(alpha_high);
            Ok(Interval { lower: t0 - bias - merr, upper: t0 - bias + merr })
        }
        IntervalType::Basic => Ok(Interval {
            lower: 2.0 * t0 - norm_inter(&t, alpha_high),
            upper: 2.0 * t0 - norm_inter(&t, alpha_low),
        }),
        IntervalType::Perc => {
            Ok(Interval { lower: norm_inter(&t, alpha_low), upper: norm_inter(&t, alpha_high) })
        }
        IntervalType::Stud => studentized(t0, original.variance, replicates, alpha_low, alpha_high),
        IntervalType::Bca => bca(&t, t0, data, alpha_low, alpha_high),
    }
}

fn studentized(
    t0: f64, v0: f64, replicates: &[ReplicateStat], alpha_low: f64, alpha_high: f64,
) -> EstimatorResult<Interval> {
    let mut z: Vec<f64> = replicates
        .iter()
        .map(|s| (s.mean - t0) / s.variance.sqrt())
        .filter(|z| z.is_finite())
        .collect();
    if z.len() < 2 {
        return Err(EstimatorError::InsufficientData { len: z.len() });
    }
    z.sort_by(f64::total_cmp);

    let scale = v0.sqrt();
    Ok(Interval {
        lower: t0 - scale * norm_inter(&z, alpha_high),
        upper: t0 - scale * norm_inter(&z, alpha_low),
    })
}

fn bca(t: &[f64], t0: f64, data: &[f64], alpha_low: f64, alpha_high: f64) -> EstimatorResult<Interval> {
    let normal = Normal::standard();

    let below = t.iter().filter(|&&x| x < t0).count();
    let w = normal.inverse_cdf(below as f64 / t.len() as f64);
    if !w.is_finite() {
        return Err(EstimatorError::NonFiniteAdjustment { name: "w", value: w });
    }

    let influence = jackknife_influence(data);
    let sum_sq: f64 = influence.iter().map(|l| l * l).sum();
    let sum_cube: f64 = influence.iter().map(|l| l * l * l).sum();
    let a = sum_cube / (6.0 * sum_sq.powf(1.5));
    if !a.is_finite() {
        return Err(EstimatorError::NonFiniteAdjustment { name: "a", value: a });
    }

    let adjust = |alpha: f64| {
        let z = w + normal.inverse_cdf(alpha);
        normal.cdf(w + z / (1.0 - a * z))
    };
    Ok(Interval {
        lower: norm_inter(t, adjust(alpha_low)),
        upper: norm_inter(t, adjust(alpha_high)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Every branch of `norm_inter`.
    // - Closed-form checks for norm, basic/perc reflection, stud symmetry and
    //   BCa reducing to perc.
    // - Degenerate replicate distributions and non-finite BCa adjustments.
    // -------------------------------------------------------------------------

    fn stats(means: &[f64], variance: f64) -> Vec<ReplicateStat> {
        means.iter().map(|&mean| ReplicateStat { mean, variance }).collect()
    }

    #[test]
    // Purpose
    // -------
    // Exercise the integral, extreme and interpolated branches.
    //
    // Given
    // -----
    // - `t = 1..=9` (R = 9).
    //
    // Expect
    // ------
    // - α = 0.5 → rank 5 exactly → 5.
    // - α = 0.05 → k = 0 → 1; α = 0.95 → k = R → 9.
    // - α = 0.25 and 0.75 interpolate strictly inside (2, 3) and (7, 8) and
    //   mirror each other around 5.
    fn norm_inter_covers_all_branches() {
        let t: Vec<f64> = (1..=9).map(f64::from).collect();

        assert_eq!(norm_inter(&t, 0.5), 5.0);
        assert_eq!(norm_inter(&t, 0.05), 1.0);
        assert_eq!(norm_inter(&t, 0.95), 9.0);

        let low = norm_inter(&t, 0.25);
        let high = norm_inter(&t, 0.75);
        assert!(low > 2.0 && low < 3.0);
        assert!(high > 7.0 && high < 8.0);
        assert_relative_eq!(low + high, 10.0, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Check the normal interval against a hand computation.
    //
    // Given
    // -----
    // - `t* = [1, 2, 3, 4]`, `t0 = 2`, `v0 = 0.25`, `c = 0.95`.
    //
    // Expect
    // ------
    // - bias 0.5, merr `0.5·1.959964`, bounds `1.5 ∓ merr`.
    fn norm_interval_matches_hand_computation() {
        let original = ReplicateStat { mean: 2.0, variance: 0.25 };
        let ci = build_interval(
            IntervalType::Norm, 0.95, original, &stats(&[1.0, 2.0, 3.0, 4.0], 0.1), &[],
        )
        .expect("interval");

        let merr = 0.5 * 1.959_963_984_540_054;
        assert_relative_eq!(ci.lower, 1.5 - merr, epsilon = 1e-9);
        assert_relative_eq!(ci.upper, 1.5 + merr, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify basic bounds are the percentile bounds reflected through `t0`.
    //
    // Given
    // -----
    // - 39 skewed replicate means, `t0 = 3`, `c = 0.9`.
    //
    // Expect
    // ------
    // - `basic.lower = 2·t0 − perc.upper`, `basic.upper = 2·t0 − perc.lower`.
    fn basic_reflects_percentile() {
        let means: Vec<f64> = (0..39).map(|i| 1.0 + (i as f64 / 10.0).powi(2)).collect();
        let original = ReplicateStat { mean: 3.0, variance: 0.5 };
        let reps = stats(&means, 0.5);

        let perc = build_interval(IntervalType::Perc, 0.9, original, &reps, &[]).expect("perc");
        let basic = build_interval(IntervalType::Basic, 0.9, original, &reps, &[]).expect("basic");

        assert!(perc.lower < perc.upper);
        assert_relative_eq!(basic.lower, 6.0 - perc.upper, epsilon = 1e-12);
        assert_relative_eq!(basic.upper, 6.0 - perc.lower, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check the studentized interval is centred on `t0` for symmetric pivots.
    //
    // Given
    // -----
    // - Replicate means symmetric around `t0 = 10` with a common variance;
    //   one replicate with zero variance (non-finite pivot, dropped).
    //
    // Expect
    // ------
    // - `lower < t0 < upper` and the midpoint equals `t0`.
    fn studentized_is_symmetric_for_symmetric_pivots() {
        let mut reps = stats(&[8.0, 9.0, 9.5, 10.5, 11.0, 12.0, 7.5, 12.5, 9.8], 1.0);
        reps.push(ReplicateStat { mean: 10.0, variance: 0.0 });
        reps.push(ReplicateStat { mean: 10.2, variance: 1.0 });
        let original = ReplicateStat { mean: 10.0, variance: 4.0 };

        let ci = build_interval(IntervalType::Stud, 0.8, original, &reps, &[]).expect("stud");

        assert!(ci.lower < 10.0 && ci.upper > 10.0);
        assert_relative_eq!((ci.lower + ci.upper) / 2.0, 10.0, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify BCa collapses to the percentile interval when `w = a = 0`.
    //
    // Given
    // -----
    // - Replicates symmetric around `t0 = 0` with none equal to it (so half
    //   lie below, `w = 0`), and symmetric data (so `a = 0`).
    //
    // Expect
    // ------
    // - BCa bounds equal percentile bounds.
    fn bca_reduces_to_percentile_without_adjustment() {
        let means: Vec<f64> = (1..=20).flat_map(|i| [i as f64, -(i as f64)]).collect();
        let reps = stats(&means, 1.0);
        let original = ReplicateStat { mean: 0.0, variance: 1.0 };
        let data = [-3.0, -1.0, 0.0, 1.0, 3.0];

        let perc = build_interval(IntervalType::Perc, 0.9, original, &reps, &data).expect("perc");
        let bca = build_interval(IntervalType::Bca, 0.9, original, &reps, &data).expect("bca");

        assert_relative_eq!(bca.lower, perc.lower, epsilon = 1e-9);
        assert_relative_eq!(bca.upper, perc.upper, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Exercise every interval error path.
    //
    // Given
    // -----
    // - Constant replicate means; a single finite mean; BCa replicates all
    //   above `t0`.
    //
    // Expect
    // ------
    // - `DegenerateReplicates`, `InsufficientData { len: 1 }`,
    //   `NonFiniteAdjustment { name: "w", .. }`.
    fn degenerate_distributions_are_errors() {
        let original = ReplicateStat { mean: 5.0, variance: 0.0 };
        for kind in [IntervalType::Norm, IntervalType::Basic, IntervalType::Perc] {
            assert_eq!(
                build_interval(kind, 0.95, original, &stats(&[5.0; 10], 0.0), &[5.0, 5.0]),
                Err(EstimatorError::DegenerateReplicates { value: 5.0 })
            );
        }

        let single = stats(&[5.0, f64::NAN, f64::INFINITY], 0.0);
        assert_eq!(
            build_interval(IntervalType::Basic, 0.95, original, &single, &[5.0, 5.0]),
            Err(EstimatorError::InsufficientData { len: 1 })
        );

        let above = stats(&[6.0, 7.0, 8.0], 1.0);
        assert!(matches!(
            build_interval(IntervalType::Bca, 0.95, original, &above, &[4.0, 6.0]),
            Err(EstimatorError::NonFiniteAdjustment { name: "w", .. })
        ));
    }
}
