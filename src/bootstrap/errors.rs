//! bootstrap::errors — estimator configuration and interval failures.
//!
//! Purpose
//! -------
//! Provide [`EstimatorError`] and the [`EstimatorResult`] alias for the
//! bootstrap estimator. The enum groups two very different kinds of failure:
//!
//! - *Configuration* errors (unknown interval type or parallelism, invalid
//!   confidence level, replicate or worker counts, worker-pool setup). These
//!   are fatal and raised once, before any row is processed.
//! - *Interval* errors (too little data, degenerate replicate distribution,
//!   non-finite BCa adjustments). These are raised per row by the interval
//!   builders and are always absorbed by the estimator, which reports NA
//!   bounds for that row instead of aborting the rolling call.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of the accepted domain.
//! - The interval builders only ever return the second group; the first is
//!   raised by configuration parsing and estimator construction.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for estimator configuration and interval construction.
pub type EstimatorResult<T> = Result<T, EstimatorError>;

/// EstimatorError — failures in bootstrap configuration or interval building.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimatorError {
    // ---- Configuration ----
    /// Interval type is not one of norm, basic, stud, perc, bca.
    InvalidIntervalType { name: String },

    /// Parallelism is not one of none, multicore, snow.
    InvalidParallelism { name: String },

    /// Confidence level must lie strictly inside (0, 1).
    InvalidConfidence { value: f64 },

    /// Replicate count must be >= 1.
    InvalidReplicates { value: usize },

    /// Worker count must be >= 1.
    InvalidWorkerCount { value: usize },

    /// The replicate worker pool could not be created.
    WorkerPool { reason: String },

    // ---- Per-row interval construction ----
    /// Fewer than two usable values or replicate statistics.
    InsufficientData { len: usize },

    /// All replicate statistics are (numerically) equal.
    DegenerateReplicates { value: f64 },

    /// A BCa adjustment (`w` or `a`) is not finite.
    NonFiniteAdjustment { name: &'static str, value: f64 },
}

impl std::error::Error for EstimatorError {}

impl std::fmt::Display for EstimatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            EstimatorError::InvalidIntervalType { name } => write!(
                f,
                "Invalid interval type {name:?}. Expected one of 'norm', 'basic', 'stud', \
                 'perc', 'bca'."
            ),
            EstimatorError::InvalidParallelism { name } => write!(
                f,
                "Invalid parallelism {name:?}. Expected one of 'none', 'multicore', 'snow'."
            ),
            EstimatorError::InvalidConfidence { value } => {
                write!(f, "Confidence level must lie strictly between 0 and 1; got: {value}")
            }
            EstimatorError::InvalidReplicates { value } => {
                write!(f, "Number of bootstrap replicates must be >= 1; got: {value}")
            }
            EstimatorError::InvalidWorkerCount { value } => {
                write!(f, "Number of workers must be >= 1; got: {value}")
            }
            EstimatorError::WorkerPool { reason } => {
                write!(f, "Could not build the replicate worker pool: {reason}")
            }
            // ---- Per-row interval construction ----
            EstimatorError::InsufficientData { len } => {
                write!(f, "Need at least 2 usable values to build an interval; got: {len}")
            }
            EstimatorError::DegenerateReplicates { value } => {
                write!(f, "All bootstrap replicates are equal to {value}; no interval exists.")
            }
            EstimatorError::NonFiniteAdjustment { name, value } => {
                write!(f, "BCa adjustment '{name}' is not finite: {value}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<EstimatorError> for PyErr {
    fn from(err: EstimatorError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` payload embedding for representative variants.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure messages carry the offending payload.
    //
    // Given
    // -----
    // - `InvalidIntervalType { name: "wald" }`, `InvalidConfidence { value: 1.5 }`.
    //
    // Expect
    // ------
    // - Rendered strings contain `wald` and `1.5`.
    fn display_embeds_payloads() {
        let kind = EstimatorError::InvalidIntervalType { name: "wald".to_string() };
        let conf = EstimatorError::InvalidConfidence { value: 1.5 };

        assert!(kind.to_string().contains("wald"));
        assert!(conf.to_string().contains("1.5"));
    }
}
