// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Backend contract for wall-clock arithmetic.
//!
//! The period engine never does calendar arithmetic on its own for the
//! adapter units ([`AdapterUnit`]); it asks an [`Adapter`]. Every method is
//! pure: inputs are `Copy` instants and nothing is mutated.
//!
//! Arithmetic that leaves the backend's representable range returns `None`.
//! The engine turns that into [`PeriodError::OutOfRange`](crate::PeriodError::OutOfRange).
//!
//! Quarter and decade/century/millennium boundaries are *not* taken from
//! the adapter; they are derived locally so that every backend agrees on
//! them.

use std::fmt;

use chrono::{DateTime, Utc, Weekday};

use crate::duration::Duration;
use crate::unit::AdapterUnit;

/// Options forwarded to week-sensitive adapter calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterOptions {
    /// First day of the week.
    pub week_starts_on: Weekday,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            week_starts_on: Weekday::Mon,
        }
    }
}

/// Pluggable calendar backend.
///
/// # Contract
///
/// - `start_of(d, u) <= d <= end_of(d, u)`.
/// - `end_of` is inclusive: the last representable millisecond of the unit.
/// - `add` applies years/months before the fixed-length components and
///   clamps the day of month (`Jan 31 + 1 month = Feb 28/29`).
/// - `each_interval` yields the start of every `unit` that intersects
///   `[start, end]`, in order, beginning with the one containing `start`.
pub trait Adapter: fmt::Debug + Send + Sync {
    /// Short backend name used in diagnostics.
    fn name(&self) -> &str {
        "adapter"
    }

    /// First instant of the `unit` containing `date`.
    fn start_of(
        &self,
        date: DateTime<Utc>,
        unit: AdapterUnit,
        options: &AdapterOptions,
    ) -> Option<DateTime<Utc>>;

    /// Last instant (inclusive) of the `unit` containing `date`.
    fn end_of(
        &self,
        date: DateTime<Utc>,
        unit: AdapterUnit,
        options: &AdapterOptions,
    ) -> Option<DateTime<Utc>>;

    /// `date` moved forward by `duration`.
    fn add(&self, date: DateTime<Utc>, duration: &Duration) -> Option<DateTime<Utc>>;

    /// `date` moved backward by `duration`.
    fn subtract(&self, date: DateTime<Utc>, duration: &Duration) -> Option<DateTime<Utc>> {
        self.add(date, &duration.negated())
    }

    /// Whether `a` and `b` fall in the same `unit`.
    fn is_same(
        &self,
        a: DateTime<Utc>,
        b: DateTime<Utc>,
        unit: AdapterUnit,
        options: &AdapterOptions,
    ) -> bool {
        match (
            self.start_of(a, unit, options),
            self.start_of(b, unit, options),
        ) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    fn is_before(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        a < b
    }

    fn is_after(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        a > b
    }

    /// Representative date (the unit start) of every `unit` between `start`
    /// and `end`.
    ///
    /// The iterator may be unbounded for a misbehaving backend; callers are
    /// expected to cap it.
    fn each_interval(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        unit: AdapterUnit,
        options: &AdapterOptions,
    ) -> Box<dyn Iterator<Item = DateTime<Utc>> + '_>;
}
