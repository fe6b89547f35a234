// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Period value types.
//!
//! This module provides:
//! - [`Interval`]: bare inclusive `[start, end]` bounds, the value a unit
//!   rule produces.
//! - [`Period`]: an interval tagged with its [`Unit`] and the reference
//!   instant it was built from.
//! - [`TimeAnchor`]: anything that can stand for a single instant (an
//!   instant, or a period through its reference date).

use std::fmt;

use chrono::{DateTime, Datelike, SecondsFormat, TimeDelta, Utc};
use qtty::Days;

use crate::error::PeriodError;
use crate::unit::Unit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Inclusive bounds `[start, end]`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempoch_calendar::Interval;
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
/// let interval = Interval::new(start, end);
///
/// assert_eq!(interval.duration_days().value(), 1.5);
/// assert!(interval.contains(end));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Interval { start, end }
    }

    /// `end - start`.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// `end - start` in days as a floating-point quantity.
    pub fn duration_days(&self) -> Days {
        const NANOS_PER_DAY: f64 = 86_400_000_000_000.0;
        const SECONDS_PER_DAY: f64 = 86_400.0;

        let duration = self.duration();
        match duration.num_nanoseconds() {
            Some(ns) => Days::new(ns as f64 / NANOS_PER_DAY),
            // Spans too large for i64 nanoseconds.
            None => Days::new(duration.num_seconds() as f64 / SECONDS_PER_DAY),
        }
    }

    /// Whether `instant` lies in `[start, end]`, both ends included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.end.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// A span of time of a given unit.
///
/// Periods are immutable values: operations return new periods and never
/// touch their inputs. `start <= date <= end` always holds, and both bounds
/// are inclusive, so two adjacent periods of the same unit never share an
/// instant.
///
/// Periods are built through [`create_period`](crate::create_period) or
/// [`Period::custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Period {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    unit: Unit,
    date: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Period {
    pub(crate) fn from_parts(
        unit: Unit,
        date: DateTime<Utc>,
        bounds: Interval,
    ) -> Result<Self, PeriodError> {
        if bounds.start > bounds.end {
            return Err(PeriodError::invalid_period(format!(
                "`{unit}` period starts after it ends ({bounds})"
            )));
        }
        if !bounds.contains(date) {
            return Err(PeriodError::invalid_period(format!(
                "`{unit}` period {bounds} does not contain its reference date"
            )));
        }
        Ok(Self {
            unit,
            date,
            start: bounds.start,
            end: bounds.end,
        })
    }

    /// A `custom` period over caller-supplied bounds, with `date = start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use tempoch_calendar::{Period, Unit};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    /// let end = Utc.with_ymd_and_hms(2024, 5, 1, 17, 0, 0).unwrap();
    /// let shift = Period::custom(start, end).unwrap();
    ///
    /// assert_eq!(shift.unit(), &Unit::Custom);
    /// assert!(Period::custom(end, start).is_err());
    /// ```
    pub fn custom(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, PeriodError> {
        Self::from_parts(Unit::Custom, start, Interval::new(start, end))
    }

    /// Unit the period was built for (its `type`).
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Reference instant the period was built from.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive upper bound.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    pub fn duration(&self) -> TimeDelta {
        self.interval().duration()
    }

    pub fn duration_days(&self) -> Days {
        self.interval().duration_days()
    }

    /// Whether `target` falls inside the period, both ends included.
    ///
    /// A `stableMonth` only contains instants of its own calendar month; the
    /// leading and trailing days of neighbouring months that pad the grid are
    /// excluded.
    pub fn contains(&self, target: impl TimeAnchor) -> bool {
        let instant = target.anchor();
        if !self.interval().contains(instant) {
            return false;
        }
        match self.unit {
            Unit::StableMonth => {
                (instant.year(), instant.month()) == (self.date.year(), self.date.month())
            }
            _ => true,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.unit, self.interval())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(rename = "type")]
            unit: Unit,
            date: DateTime<Utc>,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Period::from_parts(raw.unit, raw.date, Interval::new(raw.start, raw.end))
            .map_err(serde::de::Error::custom)
    }
}

/// Something that stands for a single instant.
///
/// Instants anchor to themselves; periods anchor to their reference
/// [`date`](Period::date).
pub trait TimeAnchor {
    fn anchor(&self) -> DateTime<Utc>;
}

impl TimeAnchor for DateTime<Utc> {
    fn anchor(&self) -> DateTime<Utc> {
        *self
    }
}

impl TimeAnchor for Period {
    fn anchor(&self) -> DateTime<Utc> {
        self.date
    }
}

impl<T: TimeAnchor + ?Sized> TimeAnchor for &T {
    fn anchor(&self) -> DateTime<Utc> {
        (**self).anchor()
    }
}

/// Free-function form of [`Period::contains`].
pub fn contains(period: &Period, target: impl TimeAnchor) -> bool {
    period.contains(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_custom_period_creation() {
        let p = Period::custom(utc(2024, 1, 1, 0), utc(2024, 1, 3, 0)).unwrap();
        assert_eq!(p.unit(), &Unit::Custom);
        assert_eq!(p.date(), p.start());
        assert_eq!(p.duration().num_hours(), 48);
        assert_eq!(p.duration_days(), Days::new(2.0));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = Period::custom(utc(2024, 1, 3, 0), utc(2024, 1, 1, 0)).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_reference_date_outside_bounds_rejected() {
        let bounds = Interval::new(utc(2024, 1, 1, 0), utc(2024, 1, 2, 0));
        let err = Period::from_parts(Unit::Day, utc(2024, 1, 5, 0), bounds).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let p = Period::custom(utc(2024, 1, 1, 0), utc(2024, 1, 2, 0)).unwrap();
        assert!(p.contains(p.start()));
        assert!(p.contains(p.end()));
        assert!(!p.contains(utc(2024, 1, 2, 1)));
        assert!(contains(&p, &p));
    }

    #[test]
    fn test_stable_month_excludes_padding_days() {
        let bounds = Interval::new(utc(2026, 1, 26, 0), utc(2026, 3, 8, 23));
        let grid = Period::from_parts(Unit::StableMonth, utc(2026, 2, 10, 0), bounds).unwrap();
        assert!(grid.contains(utc(2026, 2, 1, 0)));
        assert!(grid.contains(utc(2026, 2, 28, 12)));
        assert!(!grid.contains(utc(2026, 1, 27, 0)));
        assert!(!grid.contains(utc(2026, 3, 2, 0)));
    }

    #[test]
    fn test_period_display() {
        let p = Period::custom(utc(2024, 1, 1, 0), utc(2024, 1, 2, 0)).unwrap();
        let display = p.to_string();
        assert!(display.starts_with("custom "));
        assert!(display.contains("2024-01-01T00:00:00.000Z"));
        assert!(display.contains(" to "));
    }
}
