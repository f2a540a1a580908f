//! bootstrap — window mean and bootstrap confidence-interval estimation.
//!
//! Purpose
//! -------
//! Turn one lookback window into a result row: the arithmetic mean, and,
//! when a confidence level is configured, lower/upper bounds from a
//! nonparametric bootstrap of the mean with one of five interval families.
//!
//! Key behaviors
//! -------------
//! - [`EstimationConfig`] is validated once per call and shared read-only.
//! - [`Estimator`] binds the configuration to a [`ResampleEngine`] and a base
//!   seed, and maps every window to an [`Estimate`] without failing.
//! - Resampling fans out through [`SequentialEngine`], [`WorkStealingEngine`]
//!   or [`ChunkedEngine`] depending on [`Parallelism`].
//! - Interval construction lives in [`intervals`]; its per-row failures are
//!   absorbed as NA bounds.
//!
//! Invariants & assumptions
//! ------------------------
//! - Short windows (`≤ 1` raw values) are never resampled.
//! - With a fixed seed, results do not depend on the engine or worker count.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; end-to-end behavior over a series is
//!   covered by the integration tests of the rolling driver.

pub mod config;
pub mod engine;
pub mod errors;
pub mod estimator;
pub mod intervals;
pub mod stats;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::config::{EstimationConfig, IntervalType, Parallelism};
pub use self::engine::{
    ChunkedEngine, ResampleEngine, SequentialEngine, Statistic, WorkStealingEngine, build_engine,
};
pub use self::errors::{EstimatorError, EstimatorResult};
pub use self::estimator::{CiBounds, Estimate, EstimateStatus, Estimator, ResultRow, estimate};
pub use self::intervals::Interval;
pub use self::stats::ReplicateStat;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::config::{EstimationConfig, IntervalType, Parallelism};
    pub use super::engine::ResampleEngine;
    pub use super::errors::{EstimatorError, EstimatorResult};
    pub use super::estimator::{Estimate, EstimateStatus, Estimator, ResultRow};
}
