//! rolling — time-windowed rolling mean with optional bootstrap intervals.
//!
//! Purpose
//! -------
//! Top layer of the crate. Compose window selection and estimation over a
//! whole series: sort by time, compute one result row per observation, and
//! return the sorted series augmented with `mean` (and `lowerCI` /
//! `upperCI` when a confidence level is requested).
//!
//! Key behaviors
//! -------------
//! - [`RollingParams`] validates string-facing call parameters into a
//!   [`WindowSpec`](crate::window::WindowSpec) and an
//!   [`EstimationConfig`](crate::bootstrap::EstimationConfig).
//! - [`RollingDriver`] / [`rolling_mean`] / [`rolling_mean_records`] run the
//!   per-row loop and assemble a [`RollingFrame`] or paired records.
//! - [`RollingDiagnostics`] counts degraded rows; one aggregate warning per
//!   kind is logged through the `log` facade after each call.
//!
//! Invariants & assumptions
//! ------------------------
//! - All fatal validation happens before the first row; per-row problems are
//!   NA values, never errors.
//! - `frame.len() == series.len()` for every successful call.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; end-to-end scenarios are in
//!   `tests/integration_rolling_pipeline.rs`.

pub mod driver;
pub mod errors;
pub mod frame;
pub mod params;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::driver::{RollingDriver, rolling_mean, rolling_mean_records};
pub use self::errors::{RollingError, RollingResult};
pub use self::frame::{RollingDiagnostics, RollingFrame, RollingRecord};
pub use self::params::RollingParams;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::driver::{RollingDriver, rolling_mean, rolling_mean_records};
    pub use super::errors::{RollingError, RollingResult};
    pub use super::frame::{RollingDiagnostics, RollingFrame, RollingRecord};
    pub use super::params::RollingParams;
}
