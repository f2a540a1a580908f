//! window::spec — validated lookback specification.
//!
//! A [`WindowSpec`] pairs a [`WindowUnit`] with a strictly positive span.
//! It is validated once per rolling call and then shared read-only by every
//! row's window selection.
use crate::window::{
    errors::{WindowError, WindowResult},
    units::WindowUnit,
};
use chrono::{DateTime, Utc};

/// `WindowSpec` — lookback duration `span` expressed in `unit`.
///
/// Fields
/// ------
/// - `unit`: [`WindowUnit`]
///   Time unit of the span (calendar-aware for months/years).
/// - `span`: `f64`
///   Lookback length; finite and strictly positive. Fractional spans are
///   allowed (e.g. `0.5` days).
///
/// Invariants
/// ----------
/// - `span.is_finite() && span > 0.0` for every constructed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    unit: WindowUnit,
    span: f64,
}

impl WindowSpec {
    /// Construct a validated window specification.
    ///
    /// Errors
    /// ------
    /// - `WindowError::InvalidSpan { value }` when `span` is NaN, ±∞ or ≤ 0.
    pub fn new(unit: WindowUnit, span: f64) -> WindowResult<Self> {
        if !span.is_finite() || span <= 0.0 {
            return Err(WindowError::InvalidSpan { value: span });
        }
        Ok(WindowSpec { unit, span })
    }

    /// Parse the unit from its name and validate the span.
    ///
    /// The unit is checked first, so an unknown unit is always reported as
    /// `WindowError::InvalidUnit` even if the span is also invalid.
    pub fn parse(unit: &str, span: f64) -> WindowResult<Self> {
        let unit = WindowUnit::parse(unit)?;
        WindowSpec::new(unit, span)
    }

    pub fn unit(&self) -> WindowUnit {
        self.unit
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    /// Whether an observation at `past` belongs to the window of `current`.
    ///
    /// Inclusion rule: `0 ≤ elapsed(past, current) ≤ span`, both edges
    /// inclusive.
    pub fn contains(&self, past: DateTime<Utc>, current: DateTime<Utc>) -> bool {
        let elapsed = self.unit.elapsed(past, current);
        (0.0..=self.span).contains(&elapsed)
    }

    /// Whether `past` and everything before it is certainly out of span.
    pub fn exhausted(&self, past: DateTime<Utc>, current: DateTime<Utc>) -> bool {
        self.unit.elapsed_lower_bound(past, current) > self.span
    }
}
