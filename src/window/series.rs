//! window::series — time-stamped observation containers.
//!
//! Purpose
//! -------
//! Hold the irregularly time-stamped input of a rolling computation and its
//! time-ordered counterpart. Sorting is the only way to obtain a
//! [`SortedSeries`], so code that needs ascending timestamps (window
//! selection, the rolling driver) can demand it in its signature.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeries`] validates that the timestamp and value columns match in
//!   length; values may contain `NaN` to mark missing observations.
//! - [`TimeSeries::into_sorted`] performs a *stable* sort by timestamp:
//!   duplicate timestamps keep their original relative order.
//! - [`SortedSeries::order`] records, for every sorted row, its position in
//!   the original input so passthrough columns can be realigned.
//!
//! Invariants & assumptions
//! ------------------------
//! - `timestamps.len() == values.len()` for both container types.
//! - In a [`SortedSeries`], timestamps are non-decreasing and `order` is a
//!   permutation of `0..len`.
//! - Both containers are immutable once built; a rolling call only reads them.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based. Timestamps are `chrono::DateTime<Utc>`; values are
//!   stored in an `ndarray::Array1<f64>`.
use crate::window::errors::{WindowError, WindowResult};
use chrono::{DateTime, Utc};
use ndarray::Array1;

/// A single `(timestamp, value)` pair. `NaN` values mark missing data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Observation { timestamp, value }
    }
}

/// `TimeSeries` — observations in input order.
///
/// Fields
/// ------
/// - `timestamps`: `Vec<DateTime<Utc>>`
///   Observation instants, in any order.
/// - `values`: `Array1<f64>`
///   Observation values aligned with `timestamps`; `NaN` marks NA.
///
/// Invariants
/// ----------
/// - `timestamps.len() == values.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Array1<f64>,
}

impl TimeSeries {
    /// Build a series from aligned timestamp and value columns.
    ///
    /// Errors
    /// ------
    /// - `WindowError::LengthMismatch { timestamps, values }` when the two
    ///   columns differ in length.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Array1<f64>) -> WindowResult<Self> {
        if timestamps.len() != values.len() {
            return Err(WindowError::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }
        Ok(TimeSeries { timestamps, values })
    }

    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let (timestamps, values): (Vec<_>, Vec<_>) =
            observations.into_iter().map(|obs| (obs.timestamp, obs.value)).unzip();
        TimeSeries { timestamps, values: Array1::from(values) }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Stable-sort by timestamp, remembering each row's original position.
    pub fn into_sorted(self) -> SortedSeries {
        SortedSeries::from_series(&self)
    }
}

/// `SortedSeries` — observations in ascending time order.
///
/// Fields
/// ------
/// - `timestamps`: `Vec<DateTime<Utc>>`
///   Non-decreasing observation instants.
/// - `values`: `Array1<f64>`
///   Values permuted alongside `timestamps`.
/// - `order`: `Vec<usize>`
///   `order[i]` is the input position of sorted row `i`.
///
/// Invariants
/// ----------
/// - Timestamps are non-decreasing; ties keep input order (stable sort).
/// - `order` is a permutation of `0..len`.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Array1<f64>,
    order: Vec<usize>,
}

impl SortedSeries {
    /// Stable-sort a borrowed series by timestamp.
    pub fn from_series(series: &TimeSeries) -> Self {
        let mut order: Vec<usize> = (0..series.len()).collect();
        order.sort_by_key(|&i| series.timestamps[i]);

        let timestamps = order.iter().map(|&i| series.timestamps[i]).collect();
        let values = order.iter().map(|&i| series.values[i]).collect();
        SortedSeries { timestamps, values, order }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn get(&self, index: usize) -> Option<Observation> {
        let timestamp = *self.timestamps.get(index)?;
        Some(Observation { timestamp, value: self.values[index] })
    }
}
