//! window::selector — per-row lookback window extraction.
//!
//! Purpose
//! -------
//! For a target row of a [`SortedSeries`], collect the values of every
//! *earlier* row whose timestamp lies within the lookback span of the target.
//!
//! Key behaviors
//! -------------
//! - The first row always yields an empty window (no history yet).
//! - Row `j < index` is included iff `0 ≤ elapsed(t_j, t_index) ≤ span` in
//!   the window's unit. The target row's own value is never included, but
//!   earlier rows sharing its timestamp are (`elapsed = 0`).
//! - Scanning walks backwards from `index − 1` and stops as soon as the
//!   unit's lower bound proves every remaining row is out of span.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input is sorted (enforced by the `SortedSeries` type), so later
//!   rows never precede the target in time.
//! - Empty and single-element windows are valid outcomes, not errors; the
//!   estimator turns them into NA results.
//!
//! Conventions
//! -----------
//! - Window values are returned most-recent first. The estimators are
//!   commutative, so order carries no meaning.
use crate::window::{
    errors::{WindowError, WindowResult},
    series::SortedSeries,
    spec::WindowSpec,
};

/// Select the lookback window of row `index`.
///
/// Parameters
/// ----------
/// - `series`: `&SortedSeries`
///   Time-ordered observations.
/// - `index`: `usize`
///   0-based target row.
/// - `spec`: `&WindowSpec`
///   Lookback unit and span.
///
/// Returns
/// -------
/// `WindowResult<Vec<f64>>`
///   Values (including any `NaN`s) of qualifying earlier rows; empty for
///   `index == 0`.
///
/// Errors
/// ------
/// - `WindowError::IndexOutOfRange { index, len }` when `index >= len`.
pub fn select(series: &SortedSeries, index: usize, spec: &WindowSpec) -> WindowResult<Vec<f64>> {
    let Some(current) = series.get(index) else {
        return Err(WindowError::IndexOutOfRange { index, len: series.len() });
    };

    let timestamps = series.timestamps();
    let values = series.values();

    let mut window = Vec::new();
    for j in (0..index).rev() {
        let past = timestamps[j];
        if spec.exhausted(past, current.timestamp) {
            break;
        }
        if spec.contains(past, current.timestamp) {
            window.push(values[j]);
        }
    }
    Ok(window)
}
