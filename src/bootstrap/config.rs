//! bootstrap::config — validated estimator configuration.
//!
//! Purpose
//! -------
//! Describe how each row's window is summarised: plain mean or bootstrap
//! mean plus confidence interval, the interval family, the number of
//! replicates, and how replicates fan out over workers. The configuration is
//! validated once per rolling call and then shared read-only by every row
//! and every replicate.
//!
//! Key behaviors
//! -------------
//! - [`IntervalType`] and [`Parallelism`] parse from their conventional
//!   names via `FromStr`, failing with `InvalidIntervalType` /
//!   `InvalidParallelism`.
//! - [`EstimationConfig::new`] validates the confidence level, replicate
//!   count and worker count; its `Default` mirrors the documented call
//!   defaults (no confidence, keep NAs, basic interval, 1000 replicates,
//!   no parallelism, one worker, no fixed seed).
//!
//! Invariants & assumptions
//! ------------------------
//! - `confidence`, when set, lies strictly inside `(0, 1)`.
//! - `replicates >= 1` and `workers >= 1`.
use crate::bootstrap::errors::{EstimatorError, EstimatorResult};
use std::str::FromStr;

/// Bootstrap confidence-interval family.
///
/// - `Norm`: normal approximation with bootstrap bias correction.
/// - `Basic`: basic (reverse-percentile) interval.
/// - `Stud`: studentized interval using per-replicate variance estimates.
/// - `Perc`: percentile interval.
/// - `Bca`: bias-corrected and accelerated percentile interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalType {
    Norm,
    Basic,
    Stud,
    Perc,
    Bca,
}

impl FromStr for IntervalType {
    type Err = EstimatorError;

    /// Parse an interval type (case-insensitive).
    ///
    /// Accepts `"norm"`/`"normal"`, `"basic"`, `"stud"`/`"student"`,
    /// `"perc"`/`"percent"`, `"bca"`. Anything else returns
    /// `EstimatorError::InvalidIntervalType`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "norm" | "normal" => Ok(IntervalType::Norm),
            "basic" => Ok(IntervalType::Basic),
            "stud" | "student" => Ok(IntervalType::Stud),
            "perc" | "percent" => Ok(IntervalType::Perc),
            "bca" => Ok(IntervalType::Bca),
            _ => Err(EstimatorError::InvalidIntervalType { name: s.to_string() }),
        }
    }
}

/// Fan-out strategy for bootstrap replicates within one row.
///
/// - `None`: replicates are drawn sequentially on the calling thread.
/// - `Multicore`: replicates are individual tasks on a shared
///   work-stealing pool of `workers` threads.
/// - `Snow`: replicates are split into `workers` contiguous batches, one
///   batch per worker, and the batch results are concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parallelism {
    None,
    Multicore,
    Snow,
}

impl FromStr for Parallelism {
    type Err = EstimatorError;

    /// Parse a parallelism name (case-insensitive): `"none"`/`"no"`,
    /// `"multicore"`, `"snow"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "no" => Ok(Parallelism::None),
            "multicore" => Ok(Parallelism::Multicore),
            "snow" => Ok(Parallelism::Snow),
            _ => Err(EstimatorError::InvalidParallelism { name: s.to_string() }),
        }
    }
}

/// EstimationConfig — per-call estimator settings.
///
/// Fields
/// ------
/// - `confidence`: `Option<f64>`
///   Confidence level in `(0, 1)`. `None` means "mean only, no bootstrap".
/// - `drop_na`: `bool`
///   Remove `NaN` values from each window before estimating. When `false`,
///   any `NaN` in a window makes that row's result NA.
/// - `interval_type`: [`IntervalType`]
///   Interval family used when `confidence` is set.
/// - `replicates`: `usize`
///   Number of bootstrap resamples per row.
/// - `parallelism`: [`Parallelism`]
///   Replicate fan-out strategy.
/// - `workers`: `usize`
///   Worker count for `Multicore` / `Snow`; ignored for `None`.
/// - `seed`: `Option<u64>`
///   Base seed for all random streams. `None` draws a fresh base seed once
///   per rolling call.
///
/// Invariants
/// ----------
/// - Every value produced by [`EstimationConfig::new`] (or `Default`)
///   satisfies the constraints listed on the constructor. Hand-built values
///   are re-checked by [`EstimationConfig::validate`] when an estimator is
///   created.
///
/// Notes
/// -----
/// - With a fixed `seed`, results are identical for every `parallelism`
///   setting, because each replicate owns a counter-derived random stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimationConfig {
    pub confidence: Option<f64>,
    pub drop_na: bool,
    pub interval_type: IntervalType,
    pub replicates: usize,
    pub parallelism: Parallelism,
    pub workers: usize,
    pub seed: Option<u64>,
}

impl EstimationConfig {
    /// Construct a validated estimator configuration.
    ///
    /// Errors
    /// ------
    /// - `EstimatorError::InvalidConfidence { value }`
    ///   Returned when `confidence` is `Some(c)` with `c` not in `(0, 1)`.
    /// - `EstimatorError::InvalidReplicates { value }`
    ///   Returned when `replicates == 0`.
    /// - `EstimatorError::InvalidWorkerCount { value }`
    ///   Returned when `workers == 0`.
    pub fn new(
        confidence: Option<f64>, drop_na: bool, interval_type: IntervalType, replicates: usize,
        parallelism: Parallelism, workers: usize, seed: Option<u64>,
    ) -> EstimatorResult<Self> {
        let config = EstimationConfig {
            confidence,
            drop_na,
            interval_type,
            replicates,
            parallelism,
            workers,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the constraints of [`EstimationConfig::new`] on an existing value.
    ///
    /// Fields are public, so values built with struct-update syntax reach the
    /// estimator without passing through `new`; [`Estimator`] construction
    /// calls this before anything else.
    ///
    /// Errors
    /// ------
    /// - Same as [`EstimationConfig::new`].
    ///
    /// [`Estimator`]: crate::bootstrap::estimator::Estimator
    pub fn validate(&self) -> EstimatorResult<()> {
        if let Some(value) = self.confidence {
            if !(value > 0.0 && value < 1.0) {
                return Err(EstimatorError::InvalidConfidence { value });
            }
        }
        if self.replicates == 0 {
            return Err(EstimatorError::InvalidReplicates { value: self.replicates });
        }
        if self.workers == 0 {
            return Err(EstimatorError::InvalidWorkerCount { value: self.workers });
        }
        Ok(())
    }

    /// Whether rows carry confidence-interval bounds.
    pub fn wants_interval(&self) -> bool {
        self.confidence.is_some()
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        EstimationConfig {
            confidence: None,
            drop_na: false,
            interval_type: IntervalType::Basic,
            replicates: 1000,
            parallelism: Parallelism::None,
            workers: 1,
            seed: None,
        }
    }
}
