//! rolling::driver — time-windowed rolling mean over a series.
//!
//! Purpose
//! -------
//! Orchestrate a rolling call: stable-sort the series by time, select each
//! row's lookback window, estimate it, and assemble a [`RollingFrame`] that
//! is aligned row-for-row with the sorted input.
//!
//! Key behaviors
//! -------------
//! - Validation (unit, span, interval type, estimator settings, worker pool)
//!   happens once, when a [`RollingDriver`] is built. A call that passes it
//!   always yields a complete frame.
//! - Rows are processed in ascending time order; row `i` reads only the raw
//!   history of the sorted series and draws from random stream `i` of the
//!   call's base seed. Without a configured seed a new base seed is drawn
//!   for every call, so repeated runs of one driver resample independently.
//! - Degraded rows are NA values. After the loop, one aggregate warning is
//!   logged per kind of degraded row.
//! - [`rolling_mean_records`] carries arbitrary caller records through the
//!   computation, returning them sorted and paired with their result rows.
//!
//! Invariants & assumptions
//! ------------------------
//! - `frame.len() == series.len()`; the first sorted row always has an empty
//!   window and therefore an all-NA result.
//! - The series and configuration are never mutated during a call.
//!
//! Downstream usage
//! ----------------
//! - Rust callers holding typed inputs use [`rolling_mean`]; callers holding
//!   names (`"days"`, `"bca"`, ...) go through [`RollingParams`] and
//!   [`RollingDriver::from_params`].
//! - The Python bindings build a driver from params and expose the frame
//!   columns as NumPy arrays.
use crate::{
    bootstrap::{config::EstimationConfig, engine::ResampleEngine, estimator::Estimator},
    rolling::{
        errors::RollingResult,
        frame::{RollingDiagnostics, RollingFrame, RollingRecord},
        params::RollingParams,
    },
    window::{
        selector::select,
        series::{SortedSeries, TimeSeries},
        spec::WindowSpec,
    },
};
use chrono::{DateTime, Utc};

/// RollingDriver — validated window spec and estimator for repeated calls.
#[derive(Debug)]
pub struct RollingDriver {
    spec: WindowSpec,
    estimator: Estimator,
}

impl RollingDriver {
    /// Build a driver using the engine selected by `config.parallelism`.
    ///
    /// Errors
    /// ------
    /// - `RollingError::Estimator(..)` when `config` fails
    ///   [`EstimationConfig::validate`] or the replicate pool cannot be
    ///   created.
    pub fn new(spec: WindowSpec, config: EstimationConfig) -> RollingResult<Self> {
        Ok(RollingDriver { spec, estimator: Estimator::new(config)? })
    }

    /// Build a driver around a caller-supplied resampling engine.
    ///
    /// Errors
    /// ------
    /// - `RollingError::Estimator(..)` when `config` fails
    ///   [`EstimationConfig::validate`].
    pub fn with_engine(
        spec: WindowSpec, config: EstimationConfig, engine: Box<dyn ResampleEngine>,
    ) -> RollingResult<Self> {
        Ok(RollingDriver { spec, estimator: Estimator::with_engine(config, engine)? })
    }

    /// Validate string-facing parameters and build a driver.
    ///
    /// Errors
    /// ------
    /// - Any error of [`RollingParams::build`] or [`RollingDriver::new`].
    pub fn from_params(params: &RollingParams) -> RollingResult<Self> {
        let (spec, config) = params.build()?;
        RollingDriver::new(spec, config)
    }

    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    pub fn config(&self) -> &EstimationConfig {
        self.estimator.config()
    }

    /// Sort `series` by time and compute every row.
    pub fn run(&self, series: &TimeSeries) -> RollingResult<RollingFrame> {
        self.run_sorted(&SortedSeries::from_series(series))
    }

    /// Compute every row of an already sorted series.
    ///
    /// Errors
    /// ------
    /// - Only window-selection errors, which cannot occur for indices taken
    ///   from the series itself.
    pub fn run_sorted(&self, series: &SortedSeries) -> RollingResult<RollingFrame> {
        let config = self.estimator.config();
        if series.is_empty() {
            return Ok(RollingFrame::empty(config.wants_interval()));
        }

        let base_seed = self.estimator.draw_base_seed();
        log::debug!(
            "rolling mean over {} rows: window {} {}, config {:?}, engine {}, seed {}",
            series.len(),
            self.spec.span(),
            self.spec.unit(),
            config,
            self.estimator.engine_name(),
            base_seed
        );

        let mut diagnostics = RollingDiagnostics::default();
        let mut rows = Vec::with_capacity(series.len());
        for index in 0..series.len() {
            let window = select(series, index, &self.spec)?;
            let estimate = self.estimator.estimate(&window, base_seed, index as u64);
            diagnostics.record(estimate.status);
            rows.push(estimate.row);
        }
        diagnostics.report(series.len());

        Ok(RollingFrame {
            timestamps: series.timestamps().to_vec(),
            values: series.values().clone(),
            order: series.order().to_vec(),
            rows,
            has_interval: config.wants_interval(),
            diagnostics,
        })
    }

    /// Sort caller records by time and pair each with its result row.
    pub fn run_records<R, T, V>(
        &self, records: Vec<R>, timestamp_fn: T, value_fn: V,
    ) -> RollingResult<Vec<RollingRecord<R>>>
    where
        T: Fn(&R) -> DateTime<Utc>,
        V: Fn(&R) -> f64,
    {
        let timestamps = records.iter().map(&timestamp_fn).collect();
        let values = records.iter().map(&value_fn).collect();
        let frame = self.run(&TimeSeries::new(timestamps, values)?)?;

        let mut rank = vec![0; frame.order.len()];
        for (sorted, &original) in frame.order.iter().enumerate() {
            rank[original] = sorted;
        }
        let mut indexed: Vec<(usize, R)> = records.into_iter().enumerate().collect();
        indexed.sort_by_key(|(original, _)| rank[*original]);

        Ok(indexed
            .into_iter()
            .zip(frame.rows)
            .map(|((_, record), row)| RollingRecord { record, row })
            .collect())
    }
}

/// Rolling mean (and optional bootstrap interval) of `series`.
///
/// Parameters
/// ----------
/// - `series`: `&TimeSeries`
///   Observations in any order; `NaN` marks missing values.
/// - `spec`: `&WindowSpec`
///   Lookback unit and span.
/// - `config`: `&EstimationConfig`
///   Estimator settings.
///
/// Returns
/// -------
/// `RollingResult<RollingFrame>`
///   The series sorted by time with one result row per observation.
///
/// Errors
/// ------
/// - `RollingError::Estimator(..)` when `config` fails
///   [`EstimationConfig::validate`] or the replicate pool cannot be
///   created. No rows are processed in that case.
pub fn rolling_mean(
    series: &TimeSeries, spec: &WindowSpec, config: &EstimationConfig,
) -> RollingResult<RollingFrame> {
    RollingDriver::new(*spec, *config)?.run(series)
}

/// Rolling mean over arbitrary records, preserving every record unchanged.
///
/// Records are stable-sorted by `timestamp_fn` and returned paired with
/// their result rows.
///
/// Errors
/// ------
/// - As for [`rolling_mean`].
pub fn rolling_mean_records<R, T, V>(
    records: Vec<R>, timestamp_fn: T, value_fn: V, spec: &WindowSpec, config: &EstimationConfig,
) -> RollingResult<Vec<RollingRecord<R>>>
where
    T: Fn(&R) -> DateTime<Utc>,
    V: Fn(&R) -> f64,
{
    RollingDriver::new(*spec, *config)?.run_records(records, timestamp_fn, value_fn)
}
