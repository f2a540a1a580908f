//! window::units — time units and calendar-aware elapsed time.
//!
//! Purpose
//! -------
//! Declare the seven lookback units accepted by the rolling mean and measure
//! the time elapsed between two instants in any of them. Fixed-length units
//! (weeks down to seconds) use exact second counts; calendar units (months,
//! years) step through the calendar so that variable month and year lengths
//! are respected.
//!
//! Key behaviors
//! -------------
//! - [`WindowUnit`] parses case-insensitively from singular or plural names
//!   via `FromStr`, failing with [`WindowError::InvalidUnit`].
//! - [`WindowUnit::elapsed`] returns the signed duration `to − from`
//!   expressed in the unit as an `f64`.
//! - [`WindowUnit::elapsed_lower_bound`] gives a cheap bound used by the
//!   selector to stop scanning history early.
//!
//! Conventions
//! -----------
//! - Instants are `chrono::DateTime<Utc>`; a day is always 86 400 seconds.
//! - Calendar months are anchored at `from`: whole months are counted with
//!   `checked_add_months` (clamping to month end, so Jan 31 + 1 month is the
//!   last day of February) and the remainder is the fraction of the next
//!   anchored month that has elapsed. Years are 12-month steps.
use crate::window::errors::{WindowError, WindowResult};
use chrono::{DateTime, Datelike, Months, TimeDelta, Utc};
use std::str::FromStr;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_WEEK: f64 = 604_800.0;

/// Longest possible gap between consecutive month anchors.
const MAX_MONTH_SECONDS: f64 = 31.0 * SECONDS_PER_DAY;
/// Longest possible gap between consecutive year anchors.
const MAX_YEAR_SECONDS: f64 = 366.0 * SECONDS_PER_DAY;
/// Gregorian mean month, used only if calendar arithmetic overflows.
const MEAN_MONTH_SECONDS: f64 = 365.2425 * SECONDS_PER_DAY / 12.0;

/// Lookback unit for a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl FromStr for WindowUnit {
    type Err = WindowError;

    /// Parse a unit name (case-insensitive, singular or plural).
    ///
    /// Accepts `"years"`, `"months"`, `"weeks"`, `"days"`, `"hours"`,
    /// `"minutes"`, `"seconds"` and their singular forms. Anything else
    /// returns `WindowError::InvalidUnit`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let name = lowered.strip_suffix('s').unwrap_or(&lowered);
        match name {
            "year" => Ok(WindowUnit::Years),
            "month" => Ok(WindowUnit::Months),
            "week" => Ok(WindowUnit::Weeks),
            "day" => Ok(WindowUnit::Days),
            "hour" => Ok(WindowUnit::Hours),
            "minute" => Ok(WindowUnit::Minutes),
            "second" => Ok(WindowUnit::Seconds),
            _ => Err(WindowError::InvalidUnit { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for WindowUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WindowUnit::Years => "years",
            WindowUnit::Months => "months",
            WindowUnit::Weeks => "weeks",
            WindowUnit::Days => "days",
            WindowUnit::Hours => "hours",
            WindowUnit::Minutes => "minutes",
            WindowUnit::Seconds => "seconds",
        };
        write!(f, "{name}")
    }
}

impl WindowUnit {
    /// Parse a unit name, surfacing [`WindowError::InvalidUnit`] on failure.
    pub fn parse(name: &str) -> WindowResult<Self> {
        name.parse()
    }

    /// Whether the unit has a variable length on the calendar.
    pub fn is_calendar(&self) -> bool {
        matches!(self, WindowUnit::Years | WindowUnit::Months)
    }

    /// Length in seconds for fixed-length units; `None` for months/years.
    pub fn fixed_seconds(&self) -> Option<f64> {
        match self {
            WindowUnit::Weeks => Some(SECONDS_PER_WEEK),
            WindowUnit::Days => Some(SECONDS_PER_DAY),
            WindowUnit::Hours => Some(SECONDS_PER_HOUR),
            WindowUnit::Minutes => Some(SECONDS_PER_MINUTE),
            WindowUnit::Seconds => Some(1.0),
            WindowUnit::Years | WindowUnit::Months => None,
        }
    }

    /// Signed time elapsed from `from` to `to`, expressed in this unit.
    ///
    /// Parameters
    /// ----------
    /// - `from`: `DateTime<Utc>`
    ///   Earlier instant (the historical observation).
    /// - `to`: `DateTime<Utc>`
    ///   Later instant (the current observation).
    ///
    /// Returns
    /// -------
    /// `f64`
    ///   `to − from` in units of `self`; negative when `to < from`, zero
    ///   for equal instants.
    ///
    /// Notes
    /// -----
    /// - Weeks through seconds divide the exact `TimeDelta` by a constant.
    /// - Months and years count whole anchored calendar steps plus the
    ///   elapsed fraction of the next step, e.g. Jan 15 → Mar 1 is
    ///   `1 + 15/29` months in a leap year.
    /// - If calendar arithmetic overflows chrono's range, the Gregorian mean
    ///   month length is used instead.
    pub fn elapsed(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
        match self.fixed_seconds() {
            Some(unit_seconds) => delta_seconds(to - from) / unit_seconds,
            None => {
                let step = if *self == WindowUnit::Years { 12 } else { 1 };
                if to < from {
                    -calendar_steps(to, from, step)
                } else {
                    calendar_steps(from, to, step)
                }
            }
        }
    }

    /// Cheap lower bound on [`WindowUnit::elapsed`] for `from ≤ to`.
    ///
    /// The bound is non-decreasing as `from` moves further into the past,
    /// so once it exceeds a span every earlier instant is out of span too.
    pub fn elapsed_lower_bound(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
        if !self.is_calendar() {
            return self.elapsed(from, to);
        }
        let longest_step =
            if *self == WindowUnit::Years { MAX_YEAR_SECONDS } else { MAX_MONTH_SECONDS };
        delta_seconds(to - from) / longest_step - 1.0
    }
}

/// Exact seconds in a `TimeDelta`, including the sub-second part.
fn delta_seconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
}

fn add_months(instant: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let months = u32::try_from(months).ok()?;
    instant.checked_add_months(Months::new(months))
}

/// Elapsed calendar steps of `step` months from `from` to `to` (`from ≤ to`).
fn calendar_steps(from: DateTime<Utc>, to: DateTime<Utc>, step: i64) -> f64 {
    let month_gap =
        i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month());
    let mut whole = month_gap.div_euclid(step);

    loop {
        match add_months(from, whole * step) {
            Some(anchor) if anchor > to && whole > 0 => whole -= 1,
            Some(_) => break,
            None => return fallback_steps(from, to, step),
        }
    }

    let (Some(start), Some(end)) = (add_months(from, whole * step), add_months(from, (whole + 1) * step))
    else {
        return fallback_steps(from, to, step);
    };

    let step_seconds = delta_seconds(end - start);
    whole as f64 + delta_seconds(to - start) / step_seconds
}

fn fallback_steps(from: DateTime<Utc>, to: DateTime<Utc>, step: i64) -> f64 {
    delta_seconds(to - from) / (MEAN_MONTH_SECONDS * step as f64)
}
