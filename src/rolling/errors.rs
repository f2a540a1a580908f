//! Errors for rolling computations.
//!
//! [`RollingError`] is the error of a whole rolling call. It wraps the
//! fatal failures of the two lower layers so that `?` composes from window
//! validation and estimator setup up to the driver:
//!
//! - [`WindowError`]: unknown unit, invalid span, mismatched columns.
//! - [`EstimatorError`]: unknown interval type or parallelism, invalid
//!   confidence/replicate/worker settings, worker-pool setup.
//!
//! Per-row outcomes (short windows, NA means, degenerate intervals) never
//! surface here; they are NA values counted in the frame diagnostics.
use crate::{bootstrap::errors::EstimatorError, window::errors::WindowError};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for rolling calls.
pub type RollingResult<T> = Result<T, RollingError>;

/// Fatal error of a rolling call; raised before any row is processed.
#[derive(Debug, Clone, PartialEq)]
pub enum RollingError {
    /// Series assembly or window specification failed.
    Window(WindowError),

    /// Estimator configuration or engine setup failed.
    Estimator(EstimatorError),
}

impl std::error::Error for RollingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RollingError::Window(err) => Some(err),
            RollingError::Estimator(err) => Some(err),
        }
    }
}

impl std::fmt::Display for RollingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RollingError::Window(err) => write!(f, "{err}"),
            RollingError::Estimator(err) => write!(f, "{err}"),
        }
    }
}

impl From<WindowError> for RollingError {
    fn from(err: WindowError) -> RollingError {
        RollingError::Window(err)
    }
}

impl From<EstimatorError> for RollingError {
    fn from(err: EstimatorError) -> RollingError {
        RollingError::Estimator(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<RollingError> for PyErr {
    fn from(err: RollingError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
