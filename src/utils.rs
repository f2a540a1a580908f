//! utils — conversions shared by the Python bridge.
//!
//! The NA and timestamp conversions are plain Rust and always compiled; the
//! array extraction helpers exist only with the `python-bindings` feature.
use chrono::{DateTime, Utc};

/// Map NA to `NaN` for numeric output columns.
#[inline]
pub fn na_to_nan(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

/// Instants from integer nanoseconds since the Unix epoch
/// (`datetime64[ns].view("int64")` on the Python side).
pub fn timestamps_from_nanos(nanos: &[i64]) -> Vec<DateTime<Utc>> {
    nanos.iter().map(|&ns| DateTime::from_timestamp_nanos(ns)).collect()
}

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::rolling::params::RollingParams;

/// Accept a contiguous float64 ndarray, a pandas Series (via `to_numpy`) or
/// any float sequence.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Same as [`extract_f64_array`] for int64 nanosecond timestamps.
#[cfg(feature = "python-bindings")]
pub fn extract_i64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, i64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<i64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<i64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<i64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected int64 nanoseconds since the epoch as a 1-D numpy.ndarray, pandas.Series, \
             or sequence (hint: datetime64[ns].view('int64'))",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
pub fn build_rolling_params(
    unit: &str, span: f64, confidence: Option<f64>, drop_na: bool, interval_type: &str,
    replicates: usize, parallelism: &str, workers: usize, seed: Option<u64>,
) -> RollingParams {
    let mut params = RollingParams::new(unit, span)
        .drop_na(drop_na)
        .interval_type(interval_type)
        .replicates(replicates)
        .parallelism(parallelism)
        .workers(workers);
    params.confidence = confidence;
    params.seed = seed;
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    // Purpose
    // -------
    // Check nanosecond timestamps and NA mapping used by the bindings.
    //
    // Given
    // -----
    // - `0` and one day plus 1 ns in nanoseconds; `None` and `Some(2.5)`.
    //
    // Expect
    // ------
    // - The epoch and 1970-01-02T00:00:00.000000001; `NaN` and `2.5`.
    fn nanos_and_na_conversions() {
        let stamps = timestamps_from_nanos(&[0, 86_400_000_000_001]);
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).single().expect("epoch");

        assert_eq!(stamps[0], epoch);
        assert_eq!((stamps[1] - epoch).num_nanoseconds(), Some(86_400_000_000_001));
        assert!(na_to_nan(None).is_nan());
        assert_eq!(na_to_nan(Some(2.5)), 2.5);
    }
}
