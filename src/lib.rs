//! time_rolling — time-windowed rolling means with bootstrap confidence
//! intervals, with optional Python bindings.
//!
//! Purpose
//! -------
//! Compute, for every observation of an irregularly time-stamped series, the
//! mean of all *earlier* observations within a lookback span measured in
//! years, months, weeks, days, hours, minutes or seconds, optionally with a
//! nonparametric bootstrap confidence interval. When the `python-bindings`
//! feature is enabled, this file also defines the `_time_rolling` extension
//! module.
//!
//! Key behaviors
//! -------------
//! - [`window`]: observation containers, calendar-aware units, validated
//!   window specs and per-row window selection.
//! - [`bootstrap`]: estimator configuration, pluggable resampling engines,
//!   the five interval families, and the per-window estimator.
//! - [`rolling`]: the driver that sorts, selects, estimates and assembles a
//!   [`RollingFrame`](rolling::RollingFrame).
//! - With `python-bindings`: the `RollingMean` class under
//!   `_time_rolling.rolling`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Layers depend strictly downward: `rolling` → `bootstrap`, `window`.
//! - Fatal validation (unit, span, interval type, estimator settings) happens
//!   once per call; per-row degradations are NA values plus diagnostics.
//!
//! Conventions
//! -----------
//! - Missing input values are `NaN`; missing outputs are `None` in Rust and
//!   `NaN` in Python arrays.
//! - Python timestamps are int64 nanoseconds since the Unix epoch.
//! - Errors are rich enums internally and become `ValueError` at the PyO3
//!   boundary.
//!
//! Testing notes
//! -------------
//! - Unit tests live in each module; `tests/integration_rolling_pipeline.rs`
//!   runs the public API end to end.

pub mod bootstrap;
pub mod rolling;
pub mod utils;
pub mod window;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    rolling::{driver::RollingDriver, frame::RollingFrame},
    utils::{
        build_rolling_params, extract_f64_array, extract_i64_array, na_to_nan,
        timestamps_from_nanos,
    },
    window::series::TimeSeries,
};

/// RollingMean — Python-facing result of a time-windowed rolling mean.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `RollingMean(timestamps, values, unit, span, /, confidence=None,
/// drop_na=False, interval_type="basic", replicates=1000,
/// parallelism="none", workers=1, seed=None)`:
/// - `timestamps`: int64 nanoseconds since the epoch, any order.
/// - `values`: float64 values aligned with `timestamps`; `NaN` marks NA.
/// - Remaining arguments mirror [`RollingParams`](rolling::RollingParams).
///
/// Fields
/// ------
/// - `frame`: [`RollingFrame`] computed at construction.
/// - `nanos`: input timestamps, kept to return them unchanged.
///
/// Notes
/// -----
/// - All arrays are in ascending time order; `order` gives the input
///   position of every row so callers can realign other columns.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "time_rolling.rolling")]
pub struct RollingMean {
    frame: RollingFrame,
    nanos: Vec<i64>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl RollingMean {
    #[new]
    #[pyo3(
        signature = (
            timestamps,
            values,
            unit,
            span,
            confidence = None,
            drop_na = false,
            interval_type = "basic",
            replicates = 1000,
            parallelism = "none",
            workers = 1,
            seed = None,
        ),
        text_signature = "(timestamps, values, unit, span, /, confidence=None, drop_na=False, \
                          interval_type='basic', replicates=1000, parallelism='none', \
                          workers=1, seed=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, timestamps: &Bound<'py, PyAny>, values: &Bound<'py, PyAny>, unit: &str,
        span: f64, confidence: Option<f64>, drop_na: bool, interval_type: &str,
        replicates: usize, parallelism: &str, workers: usize, seed: Option<u64>,
    ) -> PyResult<Self> {
        let params = build_rolling_params(
            unit, span, confidence, drop_na, interval_type, replicates, parallelism, workers, seed,
        );
        let driver = RollingDriver::from_params(&params)?;

        let ts_arr = extract_i64_array(py, timestamps)?;
        let nanos = ts_arr
            .as_slice()
            .map_err(|_| PyValueError::new_err("timestamps must be a 1-D contiguous int64 array"))?
            .to_vec();
        let val_arr = extract_f64_array(py, values)?;
        let vals = val_arr
            .as_slice()
            .map_err(|_| PyValueError::new_err("values must be a 1-D contiguous float64 array"))?
            .to_vec();

        let series = TimeSeries::new(timestamps_from_nanos(&nanos), vals.into())?;
        let frame = py.allow_threads(|| driver.run(&series))?;
        Ok(RollingMean { frame, nanos })
    }

    /// Input position of every output row.
    #[getter]
    pub fn order(&self) -> Vec<usize> {
        self.frame.order.clone()
    }

    /// Sorted timestamps as int64 nanoseconds.
    #[getter]
    pub fn timestamps<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i64>> {
        let sorted: Vec<i64> = self.frame.order.iter().map(|&i| self.nanos[i]).collect();
        sorted.into_pyarray(py)
    }

    #[getter]
    pub fn values<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.frame.values.to_vec().into_pyarray(py)
    }

    /// Rolling mean; `NaN` where NA.
    #[getter]
    pub fn mean<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        let column: Vec<f64> = self.frame.means().into_iter().map(na_to_nan).collect();
        column.into_pyarray(py)
    }

    /// Lower confidence bound, or `None` when no confidence was requested.
    #[getter]
    pub fn lower_ci<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray1<f64>>> {
        self.frame.lower_cis().map(|col| {
            col.into_iter().map(na_to_nan).collect::<Vec<f64>>().into_pyarray(py)
        })
    }

    /// Upper confidence bound, or `None` when no confidence was requested.
    #[getter]
    pub fn upper_ci<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray1<f64>>> {
        self.frame.upper_cis().map(|col| {
            col.into_iter().map(na_to_nan).collect::<Vec<f64>>().into_pyarray(py)
        })
    }

    #[getter]
    pub fn column_names(&self) -> Vec<&'static str> {
        self.frame.column_names().to_vec()
    }

    /// Rows whose window held at most one earlier observation.
    #[getter]
    pub fn insufficient_window(&self) -> usize {
        self.frame.diagnostics.insufficient_window
    }

    #[getter]
    pub fn missing_mean(&self) -> usize {
        self.frame.diagnostics.missing_mean
    }

    /// Rows with a mean but NA bounds.
    #[getter]
    pub fn degenerate_interval(&self) -> usize {
        self.frame.diagnostics.degenerate_interval
    }

    pub fn __len__(&self) -> usize {
        self.frame.len()
    }
}

/// _time_rolling — PyO3 module initializer for the Python extension.
///
/// Key behaviors
/// -------------
/// - Create the `rolling` submodule holding [`RollingMean`] and attach it to
///   `_time_rolling`.
/// - Register it in `sys.modules` as `time_rolling.rolling` so dotted imports
///   work from the Python package.
///
/// Errors
/// ------
/// - `PyErr` if creating the submodule or touching `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _time_rolling<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let rolling_mod = PyModule::new(py, "rolling")?;
    rolling_mod.add_class::<RollingMean>()?;
    m.add_submodule(&rolling_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    py.import("sys")?.getattr("modules")?.set_item("time_rolling.rolling", rolling_mod)?;
    Ok(())
}
