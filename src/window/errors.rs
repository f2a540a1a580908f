//! window::errors — error type for window specification and selection.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used while assembling series,
//! parsing window units, validating lookback spans, and slicing windows out
//! of a sorted series.
//! These failures are all *fatal* to a rolling call: they are raised once,
//! before any row is processed, and never produced per row.
//!
//! Key behaviors
//! -------------
//! - Define [`WindowError`] with payloads carrying the offending value so
//!   callers can report exactly what was rejected.
//! - Define [`WindowResult<T>`] as the canonical result alias for the
//!   `window` subtree.
//! - Convert into a Python `ValueError` when the `python-bindings` feature
//!   is enabled.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of the accepted domain (e.g. the list of
//!   valid unit names) rather than internal details.
//! - Short windows are **not** errors; they are reported as NA values by
//!   the estimator and counted by the rolling driver.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for window parsing, validation, and selection.
pub type WindowResult<T> = Result<T, WindowError>;

/// WindowError — failures while building or applying a lookback window.
///
/// Variants
/// --------
/// - `InvalidUnit { name }`
///   The unit string is not one of years, months, weeks, days, hours,
///   minutes, or seconds.
/// - `InvalidSpan { value }`
///   The lookback span is not finite or not strictly positive.
/// - `IndexOutOfRange { index, len }`
///   A target row index does not address a row of the series.
/// - `LengthMismatch { timestamps, values }`
///   The timestamp and value columns of a series differ in length.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    /// Unit name is not one of the seven supported time units.
    InvalidUnit { name: String },

    /// Span must be finite and > 0.
    InvalidSpan { value: f64 },

    /// Row index must satisfy `index < len`.
    IndexOutOfRange { index: usize, len: usize },

    /// Timestamp and value columns must have equal length.
    LengthMismatch { timestamps: usize, values: usize },
}

impl std::error::Error for WindowError {}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::InvalidUnit { name } => write!(
                f,
                "Invalid window unit {name:?}. Expected one of 'years', 'months', 'weeks', \
                 'days', 'hours', 'minutes', 'seconds'."
            ),
            WindowError::InvalidSpan { value } => {
                write!(f, "Window span must be finite and > 0; got: {value}")
            }
            WindowError::IndexOutOfRange { index, len } => {
                write!(f, "Row index {index} is out of range for a series of length {len}.")
            }
            WindowError::LengthMismatch { timestamps, values } => write!(
                f,
                "Series columns differ in length: {timestamps} timestamps vs {values} values."
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<WindowError> for PyErr {
    fn from(err: WindowError) -> PyErr {
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
    // - `Display` messages embedding each variant's payload.
    //
    // They intentionally DO NOT cover:
    // - Where the errors are raised; see `units`, `spec`, and `selector`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure every variant's message mentions its payload.
    //
    // Given
    // -----
    // - One instance of each `WindowError` variant.
    //
    // Expect
    // ------
    // - The rendered string contains the offending name / value / index.
    fn display_embeds_payloads() {
        let unit = WindowError::InvalidUnit { name: "fortnights".to_string() };
        let span = WindowError::InvalidSpan { value: -2.0 };
        let index = WindowError::IndexOutOfRange { index: 7, len: 3 };
        let lengths = WindowError::LengthMismatch { timestamps: 4, values: 5 };

        assert!(unit.to_string().contains("fortnights"));
        assert!(span.to_string().contains("-2"));
        let msg = index.to_string();
        assert!(msg.contains('7') && msg.contains('3'));
        let msg = lengths.to_string();
        assert!(msg.contains('4') && msg.contains('5'));
    }
}
