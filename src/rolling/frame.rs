//! rolling::frame — assembled output of a rolling call.
//!
//! Purpose
//! -------
//! Hold the sorted input series augmented row-for-row with its result row,
//! together with aggregate diagnostics about degraded rows.
//!
//! Key behaviors
//! -------------
//! - [`RollingFrame`] has exactly one result row per input observation, in
//!   ascending time order; `order` maps every row back to its input position.
//! - Column accessors expose `mean` and, when a confidence level was
//!   requested, `lowerCI` / `upperCI`.
//! - [`RollingDiagnostics`] counts short windows, NA means and degenerate
//!   intervals so callers can warn that the span is too short.
//!
//! Invariants & assumptions
//! ------------------------
//! - `timestamps.len() == values.len() == order.len() == rows.len()`.
//! - `has_interval` is true iff every row carries `ci: Some(..)`.
use crate::bootstrap::estimator::{EstimateStatus, ResultRow};
use chrono::{DateTime, Utc};
use ndarray::Array1;

/// Per-call counts of degraded rows.
///
/// Fields
/// ------
/// - `insufficient_window`: rows whose raw window had at most one value.
/// - `missing_mean`: rows whose mean is NA for any reason (includes
///   `insufficient_window`).
/// - `degenerate_interval`: rows with a mean but NA confidence bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RollingDiagnostics {
    pub insufficient_window: usize,
    pub missing_mean: usize,
    pub degenerate_interval: usize,
}

impl RollingDiagnostics {
    /// Count one row outcome.
    pub fn record(&mut self, status: EstimateStatus) {
        match status {
            EstimateStatus::Estimated => {}
            EstimateStatus::InsufficientWindow => {
                self.insufficient_window += 1;
                self.missing_mean += 1;
            }
            EstimateStatus::MissingMean => self.missing_mean += 1,
            EstimateStatus::DegenerateInterval => self.degenerate_interval += 1,
        }
    }

    /// Emit one warning per non-zero counter.
    pub fn report(&self, rows: usize) {
        if self.insufficient_window > 0 {
            log::warn!(
                "{} of {rows} rows produced NA due to a short window (at most one earlier \
                 observation in span); consider a wider span",
                self.insufficient_window
            );
        }
        let na_policy = self.missing_mean - self.insufficient_window;
        if na_policy > 0 {
            log::warn!("{na_policy} of {rows} rows produced an NA mean due to missing values");
        }
        if self.degenerate_interval > 0 {
            log::warn!(
                "{} of {rows} rows have NA confidence bounds due to a degenerate bootstrap \
                 distribution",
                self.degenerate_interval
            );
        }
    }
}

/// RollingFrame — sorted series with one result row per observation.
///
/// Fields
/// ------
/// - `timestamps`: `Vec<DateTime<Utc>>` in ascending order.
/// - `values`: `Array1<f64>` aligned with `timestamps`.
/// - `order`: `Vec<usize>`; `order[i]` is the input position of row `i`.
/// - `rows`: `Vec<ResultRow>`; one per observation.
/// - `has_interval`: whether CI columns are present.
/// - `diagnostics`: [`RollingDiagnostics`] for the call.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingFrame {
    pub timestamps: Vec<DateTime<Utc>>,
    pub values: Array1<f64>,
    pub order: Vec<usize>,
    pub rows: Vec<ResultRow>,
    pub has_interval: bool,
    pub diagnostics: RollingDiagnostics,
}

impl RollingFrame {
    /// Frame with no rows.
    pub fn empty(has_interval: bool) -> Self {
        RollingFrame {
            timestamps: Vec::new(),
            values: Array1::zeros(0),
            order: Vec::new(),
            rows: Vec::new(),
            has_interval,
            diagnostics: RollingDiagnostics::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `mean` column.
    pub fn means(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.mean).collect()
    }

    /// The `lowerCI` column; `None` when no confidence level was requested.
    pub fn lower_cis(&self) -> Option<Vec<Option<f64>>> {
        self.has_interval.then(|| self.rows.iter().map(ResultRow::lower_ci).collect())
    }

    /// The `upperCI` column; `None` when no confidence level was requested.
    pub fn upper_cis(&self) -> Option<Vec<Option<f64>>> {
        self.has_interval.then(|| self.rows.iter().map(ResultRow::upper_ci).collect())
    }

    /// Names of the computed columns.
    pub fn column_names(&self) -> &'static [&'static str] {
        if self.has_interval { &["mean", "lowerCI", "upperCI"] } else { &["mean"] }
    }
}

/// A caller-supplied record paired with its result row.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingRecord<R> {
    pub record: R,
    pub row: ResultRow,
}
