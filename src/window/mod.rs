//! window — time-span lookback windows over irregular series.
//!
//! Purpose
//! -------
//! Provide the leaf layer of the rolling stack: the observation containers,
//! the seven lookback units with calendar-aware elapsed time, the validated
//! [`WindowSpec`], and [`select`], which extracts the values of all earlier
//! rows within the span of a target row.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeries`] / [`SortedSeries`] hold `(timestamp, value)` columns;
//!   sorting is stable and remembers input positions.
//! - [`WindowUnit`] parses from unit names and measures elapsed time with
//!   fixed-length semantics for weeks..seconds and calendar semantics for
//!   months and years.
//! - [`select`] applies the inclusive `0 ≤ elapsed ≤ span` rule to every
//!   earlier row and never includes the target row itself.
//!
//! Invariants & assumptions
//! ------------------------
//! - Unit and span validation happen once, when a [`WindowSpec`] is built;
//!   selection itself only fails for an out-of-range row index.
//! - Short (empty or single-value) windows are ordinary return values.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based. Instants are `chrono::DateTime<Utc>`; missing
//!   values are `NaN` and are passed through to the estimator untouched.
//! - This layer performs no logging and no allocation beyond the returned
//!   window vectors.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`units`] cover parsing and every unit conversion,
//!   including month-end clamping and leap years.
//! - Unit tests in [`selector`] cover the first-row rule, boundary
//!   inclusivity, ties, calendar windows and span monotonicity.

pub mod errors;
pub mod selector;
pub mod series;
pub mod spec;
pub mod units;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{WindowError, WindowResult};
pub use self::selector::select;
pub use self::series::{Observation, SortedSeries, TimeSeries};
pub use self::spec::WindowSpec;
pub use self::units::WindowUnit;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{WindowError, WindowResult};
    pub use super::selector::select;
    pub use super::series::{Observation, SortedSeries, TimeSeries};
    pub use super::spec::WindowSpec;
    pub use super::units::WindowUnit;
}
